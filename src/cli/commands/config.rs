use crate::AppEnv;
use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, env: &AppEnv) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = env.paths.config_file();

        if *print_config {
            println!("📄 Configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(&env.config)?);
        }

        if *edit_config {
            // The editor needs a file to open.
            if env.config.write(&path, false)? {
                info(format!("Created {}", path.display()));
            }

            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });
            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!("Configuration edited with '{}'", editor_to_use));
                }
                _ => {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));
                    match Command::new(&default_editor).arg(&path).status() {
                        Ok(s) if s.success() => success(format!(
                            "Configuration edited with fallback '{}'",
                            default_editor
                        )),
                        _ => {
                            return Err(AppError::Config(format!(
                                "cannot edit {} with '{}'",
                                path.display(),
                                default_editor
                            )));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
