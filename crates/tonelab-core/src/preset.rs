//! Named preset persistence.
//!
//! A preset is a named [`AdjustmentSet`] snapshot. [`PresetStore`] keeps all
//! presets in one JSON file mapping name to adjustment values, e.g.
//! `{"warm sunset": {"Brightness": 20, "Temperature": 60}}`. Values
//! round-trip integer-exact, and adjustments that were never set stay absent
//! rather than being padded with zeros.
//!
//! Saving with an existing name overwrites it (last write wins); names list
//! in lexicographic order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::AdjustmentSet;

/// Errors that can occur reading or writing the preset file.
#[derive(Debug, Error)]
pub enum PresetError {
    /// Underlying file I/O failed.
    #[error("preset store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file exists but isn't valid preset JSON.
    #[error("malformed preset store: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// File-backed store of named adjustment presets.
///
/// The file is read on every query and rewritten whole on every mutation;
/// preset collections are small enough that this keeps the store free of
/// cached state without costing anything measurable.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// Open a store backed by the given file path.
    ///
    /// The file doesn't need to exist yet; a missing file reads as an empty
    /// store and is created on first save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save a preset, overwriting any existing preset with the same name.
    pub fn save(&self, name: &str, settings: &AdjustmentSet) -> Result<(), PresetError> {
        let mut presets = self.read_file()?;
        presets.insert(name.to_string(), settings.clone());
        self.write_file(&presets)?;
        log::debug!("saved preset {name:?} to {}", self.path.display());
        Ok(())
    }

    /// Load every stored preset, keyed by name.
    pub fn load_all(&self) -> Result<BTreeMap<String, AdjustmentSet>, PresetError> {
        self.read_file()
    }

    /// Delete a preset by name. Returns whether it existed.
    pub fn delete(&self, name: &str) -> Result<bool, PresetError> {
        let mut presets = self.read_file()?;
        let existed = presets.remove(name).is_some();
        if existed {
            self.write_file(&presets)?;
            log::debug!("deleted preset {name:?}");
        } else {
            log::warn!("delete of unknown preset {name:?}");
        }
        Ok(existed)
    }

    /// All preset names in lexicographic order.
    pub fn list_names(&self) -> Result<Vec<String>, PresetError> {
        Ok(self.read_file()?.into_keys().collect())
    }

    fn read_file(&self) -> Result<BTreeMap<String, AdjustmentSet>, PresetError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_file(&self, presets: &BTreeMap<String, AdjustmentSet>) -> Result<(), PresetError> {
        let json = serde_json::to_vec_pretty(presets)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
