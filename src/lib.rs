//! triplogger library root.
//! Exposes the CLI parser, the high-level run() function and the core
//! modules a graphical front end would call.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::parser::{Cli, Commands};
use crate::config::{AppIdentity, AppPaths, Config};
use crate::core::{RecordStore, SettingsStore};
use crate::errors::{AppError, AppResult};

/// Everything a command needs, resolved once per invocation.
pub struct AppEnv {
    pub identity: AppIdentity,
    pub paths: AppPaths,
    pub config: Config,
    /// `--file` given on the command line.
    pub file_override: Option<String>,
}

impl AppEnv {
    pub fn settings(&self) -> SettingsStore {
        SettingsStore::for_paths(&self.paths)
    }

    pub fn store(&self) -> RecordStore {
        RecordStore::new(self.config.schema)
    }

    /// The data file to use: `--file` first, then the saved setting.
    pub fn data_file(&self) -> AppResult<String> {
        if let Some(file) = &self.file_override {
            return Ok(utils::path::normalize_data_path(file));
        }
        self.settings().load_path()?.ok_or(AppError::NoDataFile)
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, env: &AppEnv) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(&cli.command, env),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, env),
        Commands::File { .. } => cli::commands::file::handle(&cli.command, env),
        Commands::Check => cli::commands::check::handle(env),
        Commands::Locations => cli::commands::locations::handle(env),
        Commands::Trip { .. } => cli::commands::trip::handle(&cli.command, env),
        Commands::Custom { .. } => cli::commands::custom::handle(&cli.command, env),
        Commands::Run => cli::commands::run::handle(env),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let identity = AppIdentity::default();
    let paths = AppPaths::resolve(&identity, cli.config_dir.as_deref());
    let config = Config::load(&paths.config_file())?;

    let env = AppEnv {
        identity,
        paths,
        config,
        file_override: cli.file.clone(),
    };

    dispatch(&cli, &env)
}
