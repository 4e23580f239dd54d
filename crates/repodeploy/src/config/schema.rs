use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::error::ConfigError;

/// Deployment server used when neither the CLI nor the config names one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:9000";

/// Contents of a `deployment.yaml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Repository to deploy. Only checked when read through [`DeploymentConfig::repo_url`].
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Commit to pin instead of the branch tip.
    #[serde(default, deserialize_with = "deserialize_commit_hash")]
    pub commit_hash: Option<String>,
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,
    /// Files ending with this suffix keep their permissions during the read-only sweep.
    #[serde(default = "default_exclude_ext")]
    pub exclude_ext: String,
    /// Variables written to `<local_dir>/.env`, in file order.
    #[serde(default, deserialize_with = "deserialize_env")]
    pub env: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub server_url: Option<String>,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_local_dir() -> PathBuf {
    PathBuf::from("./test")
}

fn default_exclude_ext() -> String {
    ".ipynb".to_string()
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            repo_url: None,
            branch: default_branch(),
            commit_hash: None,
            local_dir: default_local_dir(),
            exclude_ext: default_exclude_ext(),
            env: None,
            server_url: None,
        }
    }
}

impl DeploymentConfig {
    /// Returns the repository URL, failing if the config never set one.
    pub fn repo_url(&self) -> Result<&str, ConfigError> {
        self.repo_url
            .as_deref()
            .ok_or(ConfigError::MissingKey("repo_url"))
    }

    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }
}

/// Renders a YAML scalar the way it reads in the file. Returns `None` for
/// mappings and sequences.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn deserialize_commit_hash<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(value) = value else {
        return Ok(None);
    };

    let hash = scalar_to_string(&value)
        .ok_or_else(|| D::Error::custom("commit_hash must be a scalar value"))?;

    Ok(Some(hash))
}

fn deserialize_env<'de, D>(deserializer: D) -> Result<Option<IndexMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<String, Value>>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    let mut env = IndexMap::with_capacity(raw.len());
    for (key, value) in raw {
        let value = scalar_to_string(&value).ok_or_else(|| {
            D::Error::custom(format!("env value for '{}' must be a scalar", key))
        })?;
        env.insert(key, value);
    }

    Ok(Some(env))
}
