use crate::AppEnv;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::normalize_data_path;

/// Handle the `file` subcommand: show, select or clear the saved data file.
pub fn handle(cmd: &Commands, env: &AppEnv) -> AppResult<()> {
    if let Commands::File { path, clear } = cmd {
        let settings = env.settings();

        if *clear {
            settings.save_path(None)?;
            success("Data file cleared.");
            return Ok(());
        }

        match path {
            Some(p) => {
                let path = normalize_data_path(p);
                let status = env.store().ensure_schema(&path)?;
                settings.save_path(Some(&path))?;
                success(format!("Data file set to {} ({})", path, status.as_str()));
            }
            None => match settings.load_path()? {
                Some(saved) => println!("{}", saved),
                None => info("No data file selected."),
            },
        }
    }

    Ok(())
}
