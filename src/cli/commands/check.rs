use crate::AppEnv;
use crate::core::SchemaStatus;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `check` command
pub fn handle(env: &AppEnv) -> AppResult<()> {
    let path = env.data_file()?;
    let store = env.store();

    match store.ensure_schema(&path)? {
        SchemaStatus::Created => success(format!("Created {} with header.", path)),
        SchemaStatus::Migrated => warning(format!(
            "Migrated {} to columns: {}",
            path,
            store.schema().headers().join(", ")
        )),
        SchemaStatus::Unchanged => info(format!("{} is up to date.", path)),
    }

    Ok(())
}
