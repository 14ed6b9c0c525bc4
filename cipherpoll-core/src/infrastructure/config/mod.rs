pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_file, CONFIG_FILE_NAME};
pub use types::{NotifyConfig, PollConfig, ServiceConfig, SubmitConfig, SyncConfig};
