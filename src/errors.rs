//! Unified application error type.
//! Every module (core, config, cli, utils) returns AppError so the front end
//! can report failures in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Data file
    // ---------------------------
    #[error("Invalid data file path: '{0}'")]
    InvalidPath(String),

    #[error("Cannot create directory '{path}': {reason}")]
    Directory { path: String, reason: String },

    #[error("Cannot create data file '{path}': {reason}")]
    FileCreate { path: String, reason: String },

    #[error("Cannot access data file '{path}': {reason}")]
    FileAccess { path: String, reason: String },

    #[error("Data file '{path}' has a newer layout ({found}); set `schema: current` in config.yml")]
    NewerLayout { path: String, found: String },

    #[error("Failed to write trip to '{path}': {reason}")]
    Append { path: String, reason: String },

    // ---------------------------
    // Single instance
    // ---------------------------
    #[error("Another instance is already running")]
    AlreadyRunning,

    #[error("Cannot create instance lock '{path}': {reason}")]
    LockCreate { path: String, reason: String },

    // ---------------------------
    // Config / settings
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Unknown location: '{0}'")]
    UnknownLocation(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("No data file configured (use `triplogger file <PATH>`)")]
    NoDataFile,

    #[error("Writing is disabled until a valid data file is selected")]
    WritesDisabled,

    // ---------------------------
    // Wrapped library errors
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    /// True for failures raised by the record store; a session stops
    /// writing after one of these until the data file is re-selected.
    pub fn is_data_file_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidPath(_)
                | AppError::Directory { .. }
                | AppError::FileCreate { .. }
                | AppError::FileAccess { .. }
                | AppError::NewerLayout { .. }
                | AppError::Append { .. }
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
