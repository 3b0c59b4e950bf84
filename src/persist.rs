// used for persistence
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::construct::{Vehicle, VehicleKeeper};
use crate::error::{CarlotError, Result};

/// Where the collection lives between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Nothing is read or written; used by tests.
    InMemory,
    /// A JSON document that is read at startup and overwritten on every flush.
    File(PathBuf),
}

// The document shape: { "cars": [ ... ] }
#[derive(Serialize, Deserialize)]
struct Document<V> {
    cars: Vec<V>,
}

pub struct Persistor {
    mode: PersistenceMode,
}

impl Persistor {
    pub fn new(mode: PersistenceMode) -> Self {
        Self { mode }
    }
    /// Reads every vehicle from the backing document. A missing file is an
    /// empty collection; a malformed one is an error.
    pub fn restore(&self) -> Result<Vec<Vehicle>> {
        let path = match &self.mode {
            PersistenceMode::InMemory => return Ok(Vec::new()),
            PersistenceMode::File(path) => path,
        };
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no collection found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let document: Document<Vehicle> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CarlotError::Persistence(format!("could not read {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), vehicles = document.cars.len(), "collection read");
        Ok(document.cars)
    }
    /// Overwrites the backing document with the full contents of the keeper.
    pub fn persist(&self, keeper: &VehicleKeeper) -> Result<()> {
        let path = match &self.mode {
            PersistenceMode::InMemory => return Ok(()),
            PersistenceMode::File(path) => path,
        };
        let document = Document { cars: keeper.iter().collect::<Vec<_>>() };
        write_document(path, &document)?;
        debug!(path = %path.display(), vehicles = keeper.len(), "collection flushed");
        Ok(())
    }
}

fn write_document<V: Serialize>(path: &Path, document: &Document<V>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.flush()?;
    Ok(())
}
