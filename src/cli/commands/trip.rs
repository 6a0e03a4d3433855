use crate::AppEnv;
use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::models::TripRecord;
use crate::ui::messages::trip_recorded;

/// Handle the `trip` command: a quick entry with the catalog's miles.
pub fn handle(cmd: &Commands, env: &AppEnv) -> AppResult<()> {
    if let Commands::Trip { location, reason } = cmd {
        let catalog = env.config.catalog();
        let entry = catalog
            .find(location)
            .ok_or_else(|| AppError::UnknownLocation(location.clone()))?;

        record(env, TripRecord::today(entry.name.clone(), entry.miles.clone(), reason.clone()))?;
    }

    Ok(())
}

/// Validate the data file, then append `trip` to it.
pub(crate) fn record(env: &AppEnv, trip: TripRecord) -> AppResult<()> {
    let path = env.data_file()?;
    let store = env.store();

    store.ensure_schema(&path)?;
    store.append(&path, &trip)?;

    trip_recorded(&trip);
    Ok(())
}
