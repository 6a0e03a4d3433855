use crate::AppEnv;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::table::{Column, Table};

/// Handle the `locations` command
pub fn handle(env: &AppEnv) -> AppResult<()> {
    let catalog = env.config.catalog();
    if catalog.is_empty() {
        warning("No locations configured.");
        return Ok(());
    }

    header(format!("Locations ({})", catalog.len()));
    let mut table = Table::new(vec![Column::new("#"), Column::new("Location"), Column::new("Miles")]);
    for (i, entry) in catalog.entries().iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), entry.name.clone(), entry.miles.clone()]);
    }
    print!("{}", table.render());

    Ok(())
}
