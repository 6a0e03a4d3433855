use crate::AppEnv;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{RecordStore, SettingsStore};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::normalize_data_path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file with the default location catalog
///  - the data file, when `--file` is given, which is also saved
pub fn handle(cmd: &Commands, env: &AppEnv) -> AppResult<()> {
    if let Commands::Init { force } = cmd {
        let config_file = env.paths.config_file();

        if Config::default().write(&config_file, *force)? {
            success(format!("Config file: {}", config_file.display()));
        } else {
            info(format!(
                "Config file already exists: {} (use --force to overwrite)",
                config_file.display()
            ));
        }

        // Reload: --force may have replaced a customised file.
        let config = Config::load(&config_file)?;
        let settings = SettingsStore::for_paths(&env.paths);

        if let Some(file) = &env.file_override {
            let path = normalize_data_path(file);
            let status = RecordStore::new(config.schema).ensure_schema(&path)?;
            settings.save_path(Some(&path))?;
            success(format!("Data file:   {} ({})", path, status.as_str()));
        } else {
            match settings.load_path()? {
                Some(path) => info(format!("Data file:   {}", path)),
                None => info("No data file selected yet. Use `triplogger file <PATH>`."),
            }
        }
    }

    Ok(())
}
