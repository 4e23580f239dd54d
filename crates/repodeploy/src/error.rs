use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),

    #[error("Environment file error: {0}")]
    EnvFile(#[from] EnvFileError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Repository synchronization failed: {0}")]
    SyncFailed(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file {0} not found.")]
    NotFound(PathBuf),

    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in '{path}': {message}")]
    ParseYaml { path: PathBuf, message: String },

    #[error("Missing required config key '{0}'")]
    MissingKey(&'static str),
}

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Git task did not complete: {0}")]
    TaskFailed(String),
}

#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("Failed to change permissions of '{path}': {source}")]
    SetPermissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum EnvFileError {
    #[error("Failed to write env file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Deployment server returned a non-JSON response (HTTP {status}): {message}")]
    InvalidResponse { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, DeployError>;
