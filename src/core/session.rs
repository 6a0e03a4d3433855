//! Long-lived application state driven by discrete user commands.

use crate::config::Config;
use crate::core::instance::InstanceGuard;
use crate::core::record_store::{RecordStore, SchemaStatus};
use crate::core::settings::SettingsStore;
use crate::errors::{AppError, AppResult};
use crate::models::{LocationCatalog, TripRecord};
use crate::ui::messages::warning;
use crate::utils::path::normalize_data_path;
use log::{info, warn};

/// A user action. Closing the window maps to `HideWindow`; only `Quit`
/// ends the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    QuickTrip {
        location: String,
        reason: Option<String>,
    },
    CustomTrip {
        location: String,
        miles: String,
        reason: Option<String>,
    },
    SelectDataFile(String),
    ClearDataFile,
    ShowWindow,
    HideWindow,
    Quit,
}

/// What a successfully handled command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Recorded(TripRecord),
    DataFileSelected(String, SchemaStatus),
    DataFileCleared,
    Visibility(bool),
    Exit,
}

pub struct AppContext {
    catalog: LocationCatalog,
    store: RecordStore,
    settings: SettingsStore,
    guard: Option<InstanceGuard>,
    data_file: Option<String>,
    writes_enabled: bool,
    visible: bool,
}

impl AppContext {
    pub fn new(config: &Config, settings: SettingsStore, guard: Option<InstanceGuard>) -> Self {
        Self {
            catalog: config.catalog(),
            store: RecordStore::new(config.schema),
            settings,
            guard,
            data_file: None,
            writes_enabled: false,
            visible: true,
        }
    }

    /// Load the persisted data file and validate it. On failure the path is
    /// kept for display but writing stays disabled.
    pub fn load_data_file(&mut self) -> AppResult<Option<SchemaStatus>> {
        self.writes_enabled = false;
        self.data_file = self.settings.load_path()?;

        let Some(path) = self.data_file.clone() else {
            return Ok(None);
        };
        let status = self.store.ensure_schema(&path)?;
        self.writes_enabled = true;
        Ok(Some(status))
    }

    /// Validate `input` as the data file and switch to it, saving it to
    /// settings when `persist` is set. A failure leaves the current state
    /// untouched.
    pub fn open_data_file(&mut self, input: &str, persist: bool) -> AppResult<(String, SchemaStatus)> {
        let path = normalize_data_path(input);
        let status = self.store.ensure_schema(&path)?;
        if persist {
            self.settings.save_path(Some(&path))?;
        }
        info!("data file selected: {} ({})", path, status.as_str());
        self.data_file = Some(path.clone());
        self.writes_enabled = true;
        Ok((path, status))
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn data_file(&self) -> Option<&str> {
        self.data_file.as_deref()
    }

    pub fn writes_enabled(&self) -> bool {
        self.writes_enabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn holds_instance_lock(&self) -> bool {
        self.guard.is_some()
    }

    pub fn handle(&mut self, cmd: AppCommand) -> AppResult<Outcome> {
        match cmd {
            AppCommand::QuickTrip { location, reason } => {
                let entry = self
                    .catalog
                    .find(&location)
                    .ok_or_else(|| AppError::UnknownLocation(location.clone()))?;
                let record = TripRecord::today(entry.name.clone(), entry.miles.clone(), reason);
                self.record(record)
            }
            AppCommand::CustomTrip {
                location,
                miles,
                reason,
            } => {
                let record = TripRecord::custom(&location, &miles, reason)?;
                self.record(record)
            }
            AppCommand::SelectDataFile(input) => {
                let (path, status) = self.open_data_file(&input, true)?;
                Ok(Outcome::DataFileSelected(path, status))
            }
            AppCommand::ClearDataFile => {
                self.settings.save_path(None)?;
                self.data_file = None;
                self.writes_enabled = false;
                Ok(Outcome::DataFileCleared)
            }
            AppCommand::ShowWindow => {
                self.visible = true;
                Ok(Outcome::Visibility(true))
            }
            AppCommand::HideWindow => {
                self.visible = false;
                Ok(Outcome::Visibility(false))
            }
            AppCommand::Quit => {
                if let Some(guard) = self.guard.take()
                    && let Err(e) = guard.release()
                {
                    warning(format!("Failed to release instance lock: {}", e));
                }
                Ok(Outcome::Exit)
            }
        }
    }

    fn record(&mut self, record: TripRecord) -> AppResult<Outcome> {
        let path = self.data_file.clone().ok_or(AppError::NoDataFile)?;
        if !self.writes_enabled {
            return Err(AppError::WritesDisabled);
        }
        if !self.store.schema().has_reason()
            && record.reason.as_deref().is_some_and(|r| !r.is_empty())
        {
            warn!("trip reason ignored: data file has no reason column");
        }

        match self.store.append(&path, &record) {
            Ok(()) => Ok(Outcome::Recorded(record)),
            Err(e) => {
                if e.is_data_file_error() {
                    self.writes_enabled = false;
                }
                Err(e)
            }
        }
    }
}
