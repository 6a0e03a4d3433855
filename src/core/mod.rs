pub mod instance;
pub mod menu;
pub mod record_store;
pub mod session;
pub mod settings;

pub use instance::InstanceGuard;
pub use record_store::{RecordStore, SchemaStatus};
pub use session::{AppCommand, AppContext, Outcome};
pub use settings::SettingsStore;
