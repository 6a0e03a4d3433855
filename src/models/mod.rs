pub mod catalog;
pub mod schema;
pub mod trip;

pub use catalog::{CatalogEntry, LocationCatalog};
pub use schema::Schema;
pub use trip::TripRecord;
