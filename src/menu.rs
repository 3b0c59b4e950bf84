//! The numbered console menu.
//!
//! Reads one line per prompt from any `BufRead` and writes results to one
//! writer and diagnostics to another, so the binary binds it to the standard
//! streams and tests bind it to in-memory buffers. A failing action is
//! reported and abandoned; the loop itself only stops on `x`, at the end of
//! the input, or when the console can no longer be written to.

use std::fmt::Display;
use std::io::{BufRead, Write};

use tracing::{error, warn};

use crate::construct::{Garage, Vehicle};
use crate::datatype::{Colour, Criterion, Decimal};
use crate::engine::Engine;
use crate::error::{CarlotError, Result};
use crate::settings::Compatibility;

const OPTIONS: [&str; 11] = [
    "Add new car",
    "Show all cars",
    "Sort according to criteria",
    "Get model car map",
    "Get statistics",
    "Get the highest price cars",
    "Get cars with mileage greater than...",
    "Get car amount by colour map",
    "Sort car components",
    "Get component cars map",
    "Get cars by price between...",
];

pub struct Menu<R, W, E> {
    garage: Garage,
    compatibility: Compatibility,
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Menu<R, W, E> {
    pub fn new(garage: Garage, compatibility: Compatibility, input: R, out: W, err: E) -> Self {
        Self { garage, compatibility, input, out, err }
    }
    pub fn garage(&self) -> &Garage {
        &self.garage
    }
    pub fn into_garage(self) -> Garage {
        self.garage
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let choice = match self.read_line()? {
                Some(choice) => choice,
                None => return Ok(()),
            };
            writeln!(self.out)?;
            let outcome = match choice.trim().to_lowercase().as_str() {
                "1" => self.add_new_car(),
                "2" => self.show_all(),
                "3" => self.sort(),
                "4" => self.model_car_map(),
                "5" => self.statistics(),
                "6" => self.highest_price_cars(),
                "7" => self.mileage_greater_than(),
                "8" => self.amount_by_colour(),
                "9" => self.sort_components(),
                "10" => self.component_cars_map(),
                "11" => self.price_between(),
                "x" => return Ok(()),
                _ => {
                    writeln!(self.out, "Wrong option - choose again!")?;
                    Ok(())
                }
            };
            if let Err(e) = outcome {
                self.report(e)?;
            }
            writeln!(self.out)?;
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        for (number, option) in OPTIONS.iter().enumerate() {
            writeln!(self.out, "{}) {}", number + 1, option)?;
        }
        writeln!(self.out, "Press X to quit")?;
        write!(self.out, "Insert: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    // An exhausted input reads as an empty answer, which then fails to parse.
    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn report(&mut self, e: CarlotError) -> Result<()> {
        match &e {
            CarlotError::Invariant { .. } => warn!(error = %e, "action aborted"),
            CarlotError::Persistence(_) | CarlotError::Io(_) | CarlotError::Json(_) => {
                error!(error = %e, "action failed")
            }
            _ => (),
        }
        writeln!(self.err, "\n{}", e)?;
        Ok(())
    }

    fn add_new_car(&mut self) -> Result<()> {
        let model = self.prompt("Insert model: ")?;
        let price: Decimal = self.prompt("Insert price: ")?.parse()?;
        let colour: Colour = self.prompt("Insert colour: ")?.parse()?;
        let mileage = parse_integer(&self.prompt("Insert mileage: ")?)?;
        let components = self.prompt("Insert components separate with comma: ")?;
        let components = split_components(&components);

        let vehicle = Vehicle::builder()
            .colour(colour)
            .components(&components)
            .mileage(i64::from(mileage))
            .model(&model)
            .price(price)
            .build()?;
        if self.garage.add(vehicle)? {
            writeln!(self.out, "Car added")?;
        } else {
            writeln!(self.out, "Car already present")?;
        }
        Ok(())
    }

    fn show_all(&mut self) -> Result<()> {
        let engine = engine_for(&self.garage, self.compatibility);
        show_list(&mut self.out, &engine.all())
    }

    fn sort(&mut self) -> Result<()> {
        writeln!(self.out, "Choose below criterion: ")?;
        for criterion in Criterion::ALL {
            writeln!(self.out, "{}", criterion)?;
        }
        let criterion: Criterion = self.prompt("Insert: ")?.parse()?;
        let descending = self
            .prompt("Do you want descending sort (Y/N)? ")?
            .trim()
            .eq_ignore_ascii_case("y");
        writeln!(self.out)?;
        let engine = engine_for(&self.garage, self.compatibility);
        show_list(&mut self.out, &engine.sort(criterion, descending))
    }

    fn model_car_map(&mut self) -> Result<()> {
        let engine = engine_for(&self.garage, self.compatibility);
        show_map(&mut self.out, engine.group_by_model_keeping_most_expensive()?)
    }

    fn statistics(&mut self) -> Result<()> {
        let statistics = engine_for(&self.garage, self.compatibility).statistics()?;
        writeln!(self.out, "{}", statistics)?;
        Ok(())
    }

    fn highest_price_cars(&mut self) -> Result<()> {
        let engine = engine_for(&self.garage, self.compatibility);
        show_list(&mut self.out, &engine.highest_price_vehicles()?)
    }

    fn mileage_greater_than(&mut self) -> Result<()> {
        let threshold = parse_integer(&self.prompt("Insert boundary mileage: ")?)?;
        writeln!(self.out)?;
        let engine = engine_for(&self.garage, self.compatibility);
        show_list(&mut self.out, &engine.filter_mileage_greater_than(i64::from(threshold)))
    }

    fn amount_by_colour(&mut self) -> Result<()> {
        let counts = engine_for(&self.garage, self.compatibility).count_by_colour();
        show_map(&mut self.out, counts)
    }

    fn sort_components(&mut self) -> Result<()> {
        let vehicles = self.garage.sort_components();
        for vehicle in &vehicles {
            writeln!(self.out, "{}", vehicle)?;
        }
        Ok(())
    }

    fn component_cars_map(&mut self) -> Result<()> {
        let engine = engine_for(&self.garage, self.compatibility);
        for (component, vehicles) in engine.component_to_vehicles() {
            let listed: Vec<String> = vehicles.iter().map(|v| v.to_string()).collect();
            writeln!(self.out, "{} [{}]", component, listed.join(", "))?;
        }
        Ok(())
    }

    fn price_between(&mut self) -> Result<()> {
        let low: Decimal = self.prompt("Insert lower price: ")?.parse()?;
        let high: Decimal = self.prompt("Insert upper price: ")?.parse()?;
        writeln!(self.out)?;
        let engine = engine_for(&self.garage, self.compatibility);
        show_list(&mut self.out, &engine.vehicles_in_price_range(&low, &high))
    }
}

fn engine_for(garage: &Garage, compatibility: Compatibility) -> Engine<'_> {
    Engine::with_compatibility(garage.keeper(), compatibility)
}

// Whole numbers are read as 32-bit signed integers.
fn parse_integer(answer: &str) -> Result<i32> {
    answer
        .trim()
        .parse()
        .map_err(|_| CarlotError::parse(answer, "integer"))
}

/// Splits a comma separated answer into components. Trailing empty pieces
/// are dropped, but an answer without any comma is always one component.
pub fn split_components(answer: &str) -> Vec<&str> {
    let mut components: Vec<&str> = answer.split(',').collect();
    if components.len() > 1 {
        while components.last() == Some(&"") {
            components.pop();
        }
    }
    components
}

fn show_list<W: Write>(out: &mut W, vehicles: &[&Vehicle]) -> Result<()> {
    for vehicle in vehicles {
        writeln!(out, "{}", vehicle)?;
    }
    Ok(())
}

fn show_map<W: Write, K: Display, V: Display>(out: &mut W, entries: Vec<(K, V)>) -> Result<()> {
    for (key, value) in entries {
        writeln!(out, "{} {}", key, value)?;
    }
    Ok(())
}
