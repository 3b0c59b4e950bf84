//! Carlot – an in-memory vehicle collection with a console front end.
//!
//! A collection of vehicles is read from a JSON document at startup and kept
//! in memory for the rest of the session. It can be browsed, sorted, filtered
//! and summarised, and new vehicles are appended to it. The whole document is
//! rewritten after every addition.
//!
//! * A [`construct::Vehicle`] couples a model, a price, a colour, a mileage and
//!   a list of components. Two vehicles with equal fields are the same vehicle.
//! * Vehicles are only produced by a [`construct::VehicleBuilder`], which
//!   validates each field as it is given and refuses to build when any field
//!   was rejected or never given.
//! * A [`construct::VehicleKeeper`] owns the vehicles and guarantees their
//!   uniqueness. The [`construct::Garage`] wires a keeper to its
//!   [`persist::Persistor`] and restores the collection on startup.
//! * The [`engine::Engine`] answers the read-only queries: sorting, filtering,
//!   grouping and statistics.
//!
//! ## Modules
//! * [`construct`] – Vehicles, their builder, the keeper and the garage.
//! * [`datatype`] – Exact decimal prices, colours and sort criteria.
//! * [`persist`] – JSON document persistence, or none at all for tests.
//! * [`engine`] – Queries over the kept vehicles.
//! * [`menu`] – The numbered console menu.
//! * [`settings`] – Layered settings read with the `config` crate.
//!
//! ## Compatibility
//! The application this replaces had two defects: descending sorts always
//! ordered by price (and ascending sorts used the wrong key), and the reported
//! maximum price was the minimum. [`settings::Compatibility::Legacy`]
//! reproduces both; the default [`settings::Compatibility::Corrected`] does not.
//!
//! ## Quick Start
//! ```
//! use carlot::construct::{Garage, Vehicle};
//! use carlot::datatype::{Colour, Decimal};
//! use carlot::engine::Engine;
//! use carlot::persist::PersistenceMode;
//!
//! let mut garage = Garage::new(PersistenceMode::InMemory).unwrap();
//! let vehicle = Vehicle::builder()
//!     .model("FIAT")
//!     .price(Decimal::from(20000))
//!     .colour(Colour::Red)
//!     .mileage(1200)
//!     .components(&["ABS"])
//!     .build()
//!     .unwrap();
//! assert!(garage.add(vehicle).unwrap());
//! let engine = Engine::new(garage.keeper());
//! assert_eq!(engine.highest_price_vehicles().unwrap().len(), 1);
//! ```

pub mod construct;
pub mod datatype;
pub mod engine;
pub mod error;
pub mod menu;
pub mod persist;
pub mod settings;
