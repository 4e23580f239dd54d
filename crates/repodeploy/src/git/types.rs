//! Pure data types for command execution and repository sync.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::DeploymentConfig;
use crate::deploy_log::DeployLog;
use crate::error::ConfigError;

/// Outcome of one external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Trimmed stdout on success, the error text otherwise.
    pub message: String,
}

impl CommandResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            message: output.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: error.into(),
        }
    }
}

/// What to synchronize and where.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub repo_url: String,
    pub branch: String,
    /// Commit to check out instead of pulling the branch tip.
    pub commit_hash: Option<String>,
    pub local_dir: PathBuf,
}

impl SyncRequest {
    /// Builds the request for `config`. Fails if the config has no `repo_url`.
    pub fn from_config(config: &DeploymentConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            repo_url: config.repo_url()?.to_string(),
            branch: config.branch.clone(),
            // An empty pin means "follow the branch".
            commit_hash: config.commit_hash.clone().filter(|h| !h.is_empty()),
            local_dir: config.local_dir().to_path_buf(),
        })
    }
}

/// Result of a synchronization: the last command run plus what was done.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub result: CommandResult,
    pub log: DeployLog,
}
