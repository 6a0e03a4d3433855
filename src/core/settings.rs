//! Persisted user settings.
//!
//! A small YAML mapping stored next to `config.yml`. Only `dataFilePath` is
//! managed here; any other keys found in the file are left untouched.

use crate::config::AppPaths;
use crate::errors::{AppError, AppResult};
use log::debug;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_FILE_PATH_KEY: &str = "dataFilePath";

pub struct SettingsStore {
    file: PathBuf,
}

impl SettingsStore {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn for_paths(paths: &AppPaths) -> Self {
        Self::new(paths.settings_file())
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Store the data file path; `None` is stored as the empty string.
    pub fn save_path(&self, path: Option<&str>) -> AppResult<()> {
        let mut map = self.read_mapping()?;
        map.insert(
            Value::String(DATA_FILE_PATH_KEY.to_string()),
            Value::String(path.unwrap_or_default().to_string()),
        );

        if let Some(dir) = self.file.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(&Value::Mapping(map))?;
        fs::write(&self.file, yaml).map_err(|e| {
            AppError::Settings(format!("cannot write {}: {}", self.file.display(), e))
        })?;

        debug!("{} = {:?} saved to {}", DATA_FILE_PATH_KEY, path, self.file.display());
        Ok(())
    }

    /// Stored data file path; a missing or empty value means unset.
    pub fn load_path(&self) -> AppResult<Option<String>> {
        let map = self.read_mapping()?;
        let value = map
            .get(Value::String(DATA_FILE_PATH_KEY.to_string()))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(value)
    }

    fn read_mapping(&self) -> AppResult<Mapping> {
        if !self.file.exists() {
            return Ok(Mapping::new());
        }
        let content = fs::read_to_string(&self.file).map_err(|e| {
            AppError::Settings(format!("cannot read {}: {}", self.file.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(Mapping::new());
        }

        match serde_yaml::from_str::<Value>(&content) {
            Ok(Value::Mapping(map)) => Ok(map),
            Ok(Value::Null) => Ok(Mapping::new()),
            Ok(_) => Err(AppError::Settings(format!(
                "{} is not a key/value mapping",
                self.file.display()
            ))),
            Err(e) => Err(AppError::Settings(format!(
                "cannot parse {}: {}",
                self.file.display(),
                e
            ))),
        }
    }
}
