use serde::{Deserialize, Serialize};

use crate::config::DeploymentConfig;
use crate::error::ConfigError;

/// Body of the `POST /deploy` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPayload {
    pub username: Option<String>,
    pub repo_url: String,
    pub branch: String,
    pub commit_hash: Option<String>,
    pub local_dir: String,
    pub exclude_ext: String,
}

impl DeploymentPayload {
    /// Builds the payload for `config`. Fails if the config has no `repo_url`.
    pub fn from_config(
        config: &DeploymentConfig,
        username: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            username,
            repo_url: config.repo_url()?.to_string(),
            branch: config.branch.clone(),
            commit_hash: config.commit_hash.clone(),
            local_dir: config.local_dir().to_string_lossy().into_owned(),
            exclude_ext: config.exclude_ext.clone(),
        })
    }
}
