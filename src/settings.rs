//! Session settings.
//!
//! Layered with the `config` crate, lowest priority first: built-in defaults,
//! an optional `carlot.toml` (or `.json`, `.yaml`) next to the process, and
//! `CARLOT_*` environment variables such as `CARLOT_SOURCE_FILE`.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Name of the optional settings file, without extension.
pub const SETTINGS_FILE: &str = "carlot";

/// How the engine treats the sort and statistics defects of earlier
/// releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    /// Sort by the requested criterion and report the true maximum price.
    #[default]
    Corrected,
    /// Reproduce the observed behavior: descending sorts always order by
    /// price, ascending sorts use the wrong key, and the maximum price is the
    /// minimum.
    Legacy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source_file: PathBuf,
    #[serde(default)]
    pub compatibility: Compatibility,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(SETTINGS_FILE)
    }
    /// Loads the settings, reading `name` (extension optional) when it exists.
    pub fn load_from(name: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("source_file", "cars.json")?
            .set_default("compatibility", "corrected")?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("CARLOT"))
            .build()?;
        Ok(settings.try_deserialize::<Settings>()?)
    }
}
