// used for decimal numbers
use bigdecimal::{BigDecimal, RoundingMode};

// used when reading and writing the JSON document
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// used when parsing console input
use std::str::FromStr;
// used to print out readable forms of a data type
use std::fmt;
use std::ops;

use crate::error::{CarlotError, Result};

// ------------- Decimal -------------
// Prices are exact decimals. The scale given on input is retained so that
// "120000.50" is written back as "120000.50", while equality and hashing are
// numeric (100 == 100.00).
#[derive(Eq, PartialEq, Hash, PartialOrd, Ord, Clone, Debug)]
pub struct Decimal(BigDecimal);

impl Decimal {
    pub fn is_positive(&self) -> bool {
        self.0 > BigDecimal::from(0)
    }
    /// Rounds to whole units, halves away from zero.
    pub fn round_half_up(&self) -> Decimal {
        Decimal(self.0.with_scale_round(0, RoundingMode::HalfUp))
    }
    /// Arithmetic mean of the given values, or `None` when there are none.
    pub fn mean<'a, I: IntoIterator<Item = &'a Decimal>>(values: I) -> Option<Decimal> {
        let (sum, count) = values
            .into_iter()
            .fold((BigDecimal::from(0), 0u64), |(sum, count), d| (sum + &d.0, count + 1));
        if count == 0 {
            return None;
        }
        Some(Decimal(sum / BigDecimal::from(count)))
    }
}
impl FromStr for Decimal {
    type Err = CarlotError;
    fn from_str(s: &str) -> Result<Decimal> {
        BigDecimal::from_str(s.trim())
            .map(Decimal)
            .map_err(|_| CarlotError::parse(s, "decimal number"))
    }
}
impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(BigDecimal::from(value))
    }
}
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl ops::Deref for Decimal {
    type Target = BigDecimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Written as a string so no precision is lost in the document.
impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;
    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a decimal number or a string holding one")
    }
    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Decimal, E> {
        BigDecimal::from_str(v).map(Decimal).map_err(E::custom)
    }
    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Decimal, E> {
        Ok(Decimal(BigDecimal::from(v)))
    }
    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Decimal, E> {
        Ok(Decimal(BigDecimal::from(v)))
    }
    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Decimal, E> {
        // the shortest representation that round-trips, not the binary expansion
        self.visit_str(&v.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Decimal, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

// ------------- Colour -------------
// Declaration order is the natural ordering used when counting by colour.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Colour {
    Black,
    Blue,
    Green,
    Red,
    Silver,
    White,
}

impl Colour {
    pub const ALL: [Colour; 6] = [
        Colour::Black,
        Colour::Blue,
        Colour::Green,
        Colour::Red,
        Colour::Silver,
        Colour::White,
    ];
    pub fn name(&self) -> &'static str {
        match self {
            Colour::Black => "BLACK",
            Colour::Blue => "BLUE",
            Colour::Green => "GREEN",
            Colour::Red => "RED",
            Colour::Silver => "SILVER",
            Colour::White => "WHITE",
        }
    }
}
impl FromStr for Colour {
    type Err = CarlotError;
    fn from_str(s: &str) -> Result<Colour> {
        Colour::ALL
            .iter()
            .find(|c| c.name() == s.trim())
            .copied()
            .ok_or_else(|| CarlotError::parse(s, "colour"))
    }
}
impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Criterion -------------
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Criterion {
    Model,
    Colour,
    Price,
    Mileage,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Model,
        Criterion::Colour,
        Criterion::Price,
        Criterion::Mileage,
    ];
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Model => "MODEL",
            Criterion::Colour => "COLOUR",
            Criterion::Price => "PRICE",
            Criterion::Mileage => "MILEAGE",
        }
    }
}
impl FromStr for Criterion {
    type Err = CarlotError;
    fn from_str(s: &str) -> Result<Criterion> {
        Criterion::ALL
            .iter()
            .find(|c| c.name() == s.trim())
            .copied()
            .ok_or_else(|| CarlotError::parse(s, "criterion"))
    }
}
impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
