pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_from_str, DEFAULT_CONFIG_PATH};
pub use schema::{DeploymentConfig, DEFAULT_SERVER_URL};
