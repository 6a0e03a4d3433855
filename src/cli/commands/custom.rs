use crate::AppEnv;
use crate::cli::commands::trip::record;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::models::TripRecord;

/// Handle the `custom` command. Miles are stored as typed.
pub fn handle(cmd: &Commands, env: &AppEnv) -> AppResult<()> {
    if let Commands::Custom {
        location,
        miles,
        reason,
    } = cmd
    {
        record(env, TripRecord::custom(location, miles, reason.clone())?)?;
    }

    Ok(())
}
