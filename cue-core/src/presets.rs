//! Preset configuration loader.
//!
//! Loads tables, balls, and simulation settings from YAML files, so a
//! venue's table or a coarser planning timestep can be swapped in without
//! recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! presets/
//! ├── tables/
//! │   ├── eight_foot.yaml
//! │   ├── nine_foot.yaml
//! │   └── ...
//! ├── balls/
//! │   └── standard.yaml
//! └── simulations/
//!     ├── default.yaml
//!     └── coarse.yaml
//! ```
//!
//! Fields left out of a file take their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::simulation::SimulationConfig;
use crate::types::{Ball, Table, ValidationError};

/// Error type for preset loading operations.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Preset not found: {0}")]
    NotFound(String),

    #[error("Invalid preset {name}: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// Preset loader with configurable base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain `tables/`, `balls/`, and `simulations/` subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a table by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = PresetLoader::new("presets");
    /// let table = loader.load_table("nine_foot")?;
    /// ```
    pub fn load_table(&self, name: &str) -> Result<Table, PresetError> {
        let table: Table = self.load("tables", name)?;
        table.validate().map_err(|source| PresetError::Invalid {
            name: name.to_string(),
            source,
        })?;
        Ok(table)
    }

    /// Load a ball by name. Position and velocity usually stay at their defaults.
    pub fn load_ball(&self, name: &str) -> Result<Ball, PresetError> {
        let ball: Ball = self.load("balls", name)?;
        ball.validate().map_err(|source| PresetError::Invalid {
            name: name.to_string(),
            source,
        })?;
        Ok(ball)
    }

    /// Load simulation settings by name.
    pub fn load_simulation(&self, name: &str) -> Result<SimulationConfig, PresetError> {
        self.load("simulations", name)
    }

    pub fn list_tables(&self) -> Result<Vec<String>, PresetError> {
        self.list_presets("tables")
    }

    pub fn list_balls(&self) -> Result<Vec<String>, PresetError> {
        self.list_presets("balls")
    }

    pub fn list_simulations(&self) -> Result<Vec<String>, PresetError> {
        self.list_presets("simulations")
    }

    fn load<T: DeserializeOwned>(&self, subdir: &str, name: &str) -> Result<T, PresetError> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(PresetError::NotFound(name.to_string()));
        }
        debug!(path = %path.display(), "loading preset");
        let contents = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn list_presets(&self, subdir: &str) -> Result<Vec<String>, PresetError> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let file_name = entry?.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
