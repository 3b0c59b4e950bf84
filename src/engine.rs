//! Read-only queries over the kept vehicles.
//!
//! Every operation works on the snapshot the keeper holds when it is called
//! and hands back references into it. Orderings follow the natural order of
//! the field involved; where nothing else is said, ties keep the keeper's
//! iteration order, which is unspecified.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::construct::{Vehicle, VehicleKeeper};
use crate::datatype::{Colour, Criterion, Decimal};
use crate::error::{CarlotError, Result};
use crate::settings::Compatibility;

#[derive(Debug, Clone, PartialEq)]
pub struct MileageStatistics {
    pub min: u32,
    pub max: u32,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceStatistics {
    pub min: Decimal,
    pub max: Decimal,
    /// Rounded to whole units, half up.
    pub average: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub mileage: MileageStatistics,
    pub price: PriceStatistics,
}
impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "MileageStatistics[min={}, max={}, average={}]",
            self.mileage.min, self.mileage.max, self.mileage.average
        )?;
        write!(
            f,
            "PriceStatistics[min={}, max={}, average={}]",
            self.price.min, self.price.max, self.price.average
        )
    }
}

fn by_model(a: &&Vehicle, b: &&Vehicle) -> Ordering {
    a.model().cmp(b.model())
}
fn by_price(a: &&Vehicle, b: &&Vehicle) -> Ordering {
    a.price().cmp(b.price())
}
fn by_colour(a: &&Vehicle, b: &&Vehicle) -> Ordering {
    a.colour().cmp(&b.colour())
}
fn by_mileage(a: &&Vehicle, b: &&Vehicle) -> Ordering {
    a.mileage().cmp(&b.mileage())
}

// The most expensive vehicle, the first one seen winning a tie.
fn most_expensive<'a, I: IntoIterator<Item = &'a Vehicle>>(vehicles: I) -> Option<&'a Vehicle> {
    vehicles
        .into_iter()
        .reduce(|best, v| if v.price() > best.price() { v } else { best })
}

pub struct Engine<'g> {
    keeper: &'g VehicleKeeper,
    compatibility: Compatibility,
}

impl<'g> Engine<'g> {
    pub fn new(keeper: &'g VehicleKeeper) -> Self {
        Self::with_compatibility(keeper, Compatibility::default())
    }
    pub fn with_compatibility(keeper: &'g VehicleKeeper, compatibility: Compatibility) -> Self {
        Self { keeper, compatibility }
    }
    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }
    pub fn all(&self) -> Vec<&'g Vehicle> {
        self.keeper.iter().collect()
    }

    /// Orders the vehicles by the given criterion.
    ///
    /// With [`Compatibility::Legacy`] the ordering reproduces earlier
    /// releases: `MODEL` orders by price, every other criterion orders by
    /// model (and `PRICE` lists each vehicle twice), and a descending sort
    /// always ends up ordered by price.
    pub fn sort(&self, criterion: Criterion, descending: bool) -> Vec<&'g Vehicle> {
        match self.compatibility {
            Compatibility::Corrected => self.sort_corrected(criterion, descending),
            Compatibility::Legacy => self.sort_legacy(criterion, descending),
        }
    }
    fn sort_corrected(&self, criterion: Criterion, descending: bool) -> Vec<&'g Vehicle> {
        let compare = match criterion {
            Criterion::Model => by_model,
            Criterion::Colour => by_colour,
            Criterion::Price => by_price,
            Criterion::Mileage => by_mileage,
        };
        let mut sorted = self.all();
        if descending {
            sorted.sort_by(|a, b| compare(b, a));
        } else {
            sorted.sort_by(compare);
        }
        sorted
    }
    fn sort_legacy(&self, criterion: Criterion, descending: bool) -> Vec<&'g Vehicle> {
        let (compare, passes): (fn(&&Vehicle, &&Vehicle) -> Ordering, usize) = match criterion {
            Criterion::Model => (by_price, 1),
            // PRICE used to fall through into COLOUR
            Criterion::Price => (by_model, 2),
            Criterion::Colour | Criterion::Mileage => (by_model, 1),
        };
        let mut sorted = Vec::new();
        for _ in 0..passes {
            let mut pass = self.all();
            pass.sort_by(compare);
            sorted.extend(pass);
            if descending {
                sorted.sort_by(|a, b| by_price(b, a));
            }
        }
        sorted
    }

    /// Vehicles with a mileage strictly greater than the threshold.
    pub fn filter_mileage_greater_than(&self, threshold: i64) -> Vec<&'g Vehicle> {
        self.keeper
            .iter()
            .filter(|v| i64::from(v.mileage()) > threshold)
            .collect()
    }

    /// The most expensive vehicle of every model, models in descending order.
    pub fn group_by_model_keeping_most_expensive(&self) -> Result<Vec<(&'g str, &'g Vehicle)>> {
        let mut groups: BTreeMap<&'g str, Vec<&'g Vehicle>> = BTreeMap::new();
        for vehicle in self.keeper.iter() {
            groups.entry(vehicle.model()).or_default().push(vehicle);
        }
        groups
            .into_iter()
            .rev()
            .map(|(model, group)| {
                most_expensive(group)
                    .map(|vehicle| (model, vehicle))
                    .ok_or_else(|| CarlotError::invalid_state("INVALID VALUE"))
            })
            .collect()
    }

    pub fn statistics(&self) -> Result<Statistics> {
        if self.keeper.is_empty() {
            return Err(CarlotError::invalid_state("no vehicles to summarise"));
        }
        let mileages = self.keeper.iter().map(|v| v.mileage());
        let (min, max, total) = mileages.fold((u32::MAX, u32::MIN, 0u64), |(min, max, total), m| {
            (min.min(m), max.max(m), total + u64::from(m))
        });
        let mileage = MileageStatistics {
            min,
            max,
            average: total as f64 / self.keeper.len() as f64,
        };

        let prices = || self.keeper.iter().map(|v| v.price());
        let min = prices().min().cloned();
        let max = match self.compatibility {
            Compatibility::Corrected => prices().max().cloned(),
            Compatibility::Legacy => prices().min().cloned(),
        };
        let average = Decimal::mean(prices()).map(|d| d.round_half_up());
        let price = match (min, max, average) {
            (Some(min), Some(max), Some(average)) => PriceStatistics { min, max, average },
            _ => return Err(CarlotError::invalid_state("no prices to summarise")),
        };
        Ok(Statistics { mileage, price })
    }

    /// Every vehicle sharing the highest price.
    pub fn highest_price_vehicles(&self) -> Result<Vec<&'g Vehicle>> {
        let highest = most_expensive(self.keeper.iter())
            .ok_or_else(|| CarlotError::invalid_state("VALUE IS NULL"))?
            .price();
        Ok(self
            .keeper
            .iter()
            .filter(|v| v.price() == highest)
            .collect())
    }

    /// For each component, the vehicles fitted with it. Components with fewer
    /// vehicles come first; equal counts are ordered by component name.
    pub fn component_to_vehicles(&self) -> Vec<(&'g str, Vec<&'g Vehicle>)> {
        let components: BTreeSet<&'g str> = self
            .keeper
            .iter()
            .flat_map(|v| v.components().iter().map(String::as_str))
            .collect();
        let mut mapped: Vec<(&'g str, Vec<&'g Vehicle>)> = components
            .into_iter()
            .map(|component| {
                let vehicles = self
                    .keeper
                    .iter()
                    .filter(|v| v.has_component(component))
                    .collect();
                (component, vehicles)
            })
            .collect();
        mapped.sort_by_key(|(_, vehicles)| vehicles.len());
        mapped
    }

    /// Vehicles priced within `[low, high]`, models in descending order.
    pub fn vehicles_in_price_range(&self, low: &Decimal, high: &Decimal) -> Vec<&'g Vehicle> {
        let mut found: Vec<_> = self
            .keeper
            .iter()
            .filter(|v| low <= v.price() && v.price() <= high)
            .collect();
        found.sort_by(|a, b| by_model(b, a));
        found
    }

    /// Number of vehicles per colour, colours in descending order.
    pub fn count_by_colour(&self) -> Vec<(Colour, usize)> {
        let mut counts: BTreeMap<Colour, usize> = BTreeMap::new();
        for vehicle in self.keeper.iter() {
            *counts.entry(vehicle.colour()).or_default() += 1;
        }
        counts.into_iter().rev().collect()
    }
}
