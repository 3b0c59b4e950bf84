// the keeper holds vehicles in a HashSet so that equal vehicles collapse into one
use core::hash::BuildHasherDefault;
use std::collections::HashSet;
use std::collections::hash_set::Iter;
use seahash::SeaHasher;

// used to validate model names and component names
use regex::Regex;
use lazy_static::lazy_static;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// used to print out readable forms of a construct
use std::fmt;

// our own stuff that we need
use crate::datatype::{Colour, Decimal};
use crate::error::{CarlotError, Result};
use crate::persist::{PersistenceMode, Persistor};

pub type VehicleHasher = BuildHasherDefault<SeaHasher>;

lazy_static! {
    static ref UPPERCASE_WORDS: Regex = Regex::new(r"^[A-Z\s]+$").expect("valid pattern");
}

/// True when the text consists of uppercase letters and whitespace only.
pub fn is_uppercase_words(text: &str) -> bool {
    UPPERCASE_WORDS.is_match(text)
}

// ------------- Vehicle -------------
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct Vehicle {
    model: String,
    price: Decimal,
    colour: Colour,
    mileage: u32,
    components: Vec<String>,
}

impl Vehicle {
    /// Starts an empty builder. A vehicle can only be obtained through it.
    pub fn builder() -> VehicleBuilder {
        VehicleBuilder::default()
    }
    // Fields are only exposed through getters, so a vehicle is immutable
    // once built. The keeper is the sole exception, see `sorted_components`.
    pub fn model(&self) -> &str {
        &self.model
    }
    pub fn price(&self) -> &Decimal {
        &self.price
    }
    pub fn colour(&self) -> Colour {
        self.colour
    }
    pub fn mileage(&self) -> u32 {
        self.mileage
    }
    pub fn components(&self) -> &[String] {
        &self.components
    }
    pub fn has_component(&self, component: &str) -> bool {
        self.components.iter().any(|c| c == component)
    }
    fn sorted_components(mut self) -> Self {
        self.components.sort();
        self
    }
}
impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Car{{model='{}', price={}, colour={}, mileage={}, components=[{}]}}",
            self.model,
            self.price,
            self.colour,
            self.mileage,
            self.components.join(", ")
        )
    }
}

// ------------- Builder -------------
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("model '{0}' must consist of uppercase letters and spaces only")]
    Model(String),
    #[error("price {0} must be strictly positive")]
    Price(String),
    #[error("mileage {0} must be strictly positive")]
    Mileage(i64),
    #[error("component '{0}' must consist of uppercase letters and spaces only")]
    Component(String),
    #[error("{0} was never accepted")]
    Missing(&'static str),
}

/// Accumulates vehicle fields one at a time.
///
/// A setter that receives malformed data logs a warning, remembers the
/// rejection and leaves the field unset. [`VehicleBuilder::build`] then refuses
/// to produce a vehicle and hands back every rejection together with the
/// fields that were never set.
#[derive(Default, Debug)]
pub struct VehicleBuilder {
    model: Option<String>,
    price: Option<Decimal>,
    colour: Option<Colour>,
    mileage: Option<u32>,
    components: Option<Vec<String>>,
    rejections: Vec<Rejection>,
}

impl VehicleBuilder {
    pub fn model(mut self, model: &str) -> Self {
        if is_uppercase_words(model) {
            self.model = Some(model.to_string());
        } else {
            warn!(model, "model validation");
            self.rejections.push(Rejection::Model(model.to_string()));
        }
        self
    }
    pub fn price(mut self, price: Decimal) -> Self {
        if price.is_positive() {
            self.price = Some(price);
        } else {
            warn!(%price, "price validation");
            self.rejections.push(Rejection::Price(price.to_string()));
        }
        self
    }
    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }
    pub fn mileage(mut self, mileage: i64) -> Self {
        match u32::try_from(mileage) {
            Ok(m) if m > 0 => self.mileage = Some(m),
            _ => {
                warn!(mileage, "mileage validation");
                self.rejections.push(Rejection::Mileage(mileage));
            }
        }
        self
    }
    pub fn components<S: AsRef<str>>(mut self, components: &[S]) -> Self {
        match components.iter().find(|c| !is_uppercase_words(c.as_ref())) {
            None => {
                self.components = Some(components.iter().map(|c| c.as_ref().to_string()).collect());
            }
            Some(bad) => {
                warn!(component = bad.as_ref(), "components validation");
                self.rejections.push(Rejection::Component(bad.as_ref().to_string()));
            }
        }
        self
    }
    /// Rejections recorded so far, in the order the setters were called.
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }
    pub fn build(self) -> Result<Vehicle> {
        let mut rejections = self.rejections;
        if self.model.is_none() { rejections.push(Rejection::Missing("model")); }
        if self.price.is_none() { rejections.push(Rejection::Missing("price")); }
        if self.colour.is_none() { rejections.push(Rejection::Missing("colour")); }
        if self.mileage.is_none() { rejections.push(Rejection::Missing("mileage")); }
        if self.components.is_none() { rejections.push(Rejection::Missing("components")); }
        match (self.model, self.price, self.colour, self.mileage, self.components) {
            (Some(model), Some(price), Some(colour), Some(mileage), Some(components))
                if rejections.is_empty() =>
            {
                Ok(Vehicle { model, price, colour, mileage, components })
            }
            _ => Err(CarlotError::Validation(rejections)),
        }
    }
}

// ------------- Keeper -------------
#[derive(Debug, Default)]
pub struct VehicleKeeper {
    kept: HashSet<Vehicle, VehicleHasher>,
}
impl VehicleKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashSet::default(),
        }
    }
    /// Keeps the vehicle and reports whether an equal one was already kept.
    pub fn keep(&mut self, vehicle: Vehicle) -> bool {
        !self.kept.insert(vehicle)
    }
    /// Drops the vehicle, reporting whether it was kept.
    pub fn forget(&mut self, vehicle: &Vehicle) -> bool {
        self.kept.remove(vehicle)
    }
    pub fn contains(&self, vehicle: &Vehicle) -> bool {
        self.kept.contains(vehicle)
    }
    pub fn iter(&self) -> Iter<'_, Vehicle> {
        self.kept.iter()
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    // Component order is part of a vehicle's identity, so the set has to be
    // rebuilt. Vehicles that only differed in component order collapse.
    fn sort_components(&mut self) {
        self.kept = self.kept.drain().map(Vehicle::sorted_components).collect();
    }
}

// ------------- Garage -------------
// The session's record store: a keeper of vehicles wired to its persistor.
pub struct Garage {
    keeper: VehicleKeeper,
    persistor: Persistor,
}

impl Garage {
    pub fn new(mode: PersistenceMode) -> Result<Self> {
        let persistor = Persistor::new(mode);
        let mut keeper = VehicleKeeper::new();
        // Restore the existing collection
        for vehicle in persistor.restore()? {
            if keeper.keep(vehicle) {
                debug!("duplicate vehicle in the source collapsed");
            }
        }
        info!(vehicles = keeper.len(), "garage restored");
        Ok(Self { keeper, persistor })
    }
    /// Adds the vehicle and rewrites the whole backing file when it was new.
    /// Returns whether the vehicle was new. A vehicle whose flush failed is
    /// not kept, so adding it again retries the flush.
    pub fn add(&mut self, vehicle: Vehicle) -> Result<bool> {
        if self.keeper.contains(&vehicle) {
            debug!("vehicle already kept, nothing to flush");
            return Ok(false);
        }
        self.keeper.keep(vehicle.clone());
        if let Err(e) = self.persistor.persist(&self.keeper) {
            self.keeper.forget(&vehicle);
            return Err(e);
        }
        Ok(true)
    }
    pub fn vehicles(&self) -> Iter<'_, Vehicle> {
        self.keeper.iter()
    }
    pub fn keeper(&self) -> &VehicleKeeper {
        &self.keeper
    }
    pub fn len(&self) -> usize {
        self.keeper.len()
    }
    pub fn is_empty(&self) -> bool {
        self.keeper.is_empty()
    }
    /// Sorts the components of every kept vehicle and returns all of them.
    /// Vehicles that only differed in component order become equal and are
    /// kept once, so fewer vehicles may come back than were held before.
    /// The backing file is left as it is.
    pub fn sort_components(&mut self) -> Vec<Vehicle> {
        self.keeper.sort_components();
        self.keeper.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(model: &str, components: &[&str]) -> Vehicle {
        Vehicle::builder()
            .model(model)
            .price(Decimal::from(100))
            .colour(Colour::Red)
            .mileage(10)
            .components(components)
            .build()
            .unwrap()
    }

    #[test]
    fn keeper_collapses_equal_vehicles() {
        let mut keeper = VehicleKeeper::new();
        assert!(!keeper.keep(vehicle("AUDI", &["ABS"])));
        assert!(keeper.keep(vehicle("AUDI", &["ABS"])));
        assert_eq!(keeper.len(), 1);
    }

    #[test]
    fn sorting_components_rebuilds_identity() {
        let mut keeper = VehicleKeeper::new();
        keeper.keep(vehicle("AUDI", &["GPS", "ABS"]));
        keeper.keep(vehicle("AUDI", &["ABS", "GPS"]));
        assert_eq!(keeper.len(), 2);
        keeper.sort_components();
        assert_eq!(keeper.len(), 1);
        assert!(keeper.contains(&vehicle("AUDI", &["ABS", "GPS"])));
    }
}
