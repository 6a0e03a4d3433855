use crate::errors::{AppError, AppResult};
use crate::models::{CatalogEntry, LocationCatalog, Schema};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

pub mod identity;

pub use identity::{AppIdentity, AppPaths};

/// Static runtime configuration, read once at startup from `config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schema: Schema,
    #[serde(default = "default_locations")]
    pub locations: Vec<CatalogEntry>,
}

fn default_locations() -> Vec<CatalogEntry> {
    LocationCatalog::default().entries().to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            locations: default_locations(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or return defaults if not found.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Write this configuration to `path`, creating its directory.
    /// Returns false when the file exists and `force` is not set.
    pub fn write(&self, path: &Path, force: bool) -> AppResult<bool> {
        if path.exists() && !force {
            return Ok(false);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        debug!("config written to {}", path.display());
        Ok(true)
    }

    pub fn catalog(&self) -> LocationCatalog {
        LocationCatalog::new(self.locations.clone())
    }
}
