use std::path::Path;

use log::debug;

use crate::config::schema::DeploymentConfig;
use crate::error::ConfigError;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "deployment.yaml";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DeploymentConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Loaded deployment config from {}", path.display());

    serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn load_config_from_str(content: &str) -> Result<DeploymentConfig, ConfigError> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
        path: Default::default(),
        message: e.to_string(),
    })
}
