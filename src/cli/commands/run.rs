use crate::AppEnv;
use crate::core::menu::run_menu;
use crate::core::{AppContext, InstanceGuard};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, warning};
use log::debug;
use std::io;

/// Handle the `run` command: the interactive, single-instance logger.
pub fn handle(env: &AppEnv) -> AppResult<()> {
    let token = env.identity.instance_token();
    let guard = match InstanceGuard::acquire(&env.paths.lock_dir, &token) {
        Ok(g) => g,
        Err(AppError::AlreadyRunning) => {
            debug!("{} already held, exiting", token);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let mut ctx = AppContext::new(&env.config, env.settings(), Some(guard));

    let loaded = match &env.file_override {
        Some(file) => ctx.open_data_file(file, false).map(|(_, status)| Some(status)),
        None => ctx.load_data_file(),
    };
    match loaded {
        Ok(Some(status)) => info(format!(
            "Data file {} ({})",
            ctx.data_file().unwrap_or_default(),
            status.as_str()
        )),
        Ok(None) => warning("No data file selected. Use 'f' to choose one."),
        Err(e) => {
            error(&e);
            warning("Trip logging disabled. Select a data file with 'f' to continue.");
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_menu(&mut ctx, stdin.lock(), &mut stdout)
}
