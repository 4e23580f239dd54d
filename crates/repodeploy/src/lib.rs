pub mod config;
pub mod deploy_log;
pub mod env_file;
pub mod error;
pub mod flow;
pub mod git;
pub mod permissions;
pub mod report;
pub mod user;

pub use config::{load_config, load_config_from_str, DeploymentConfig};
pub use deploy_log::{DeployLog, LogEntry};
pub use env_file::write_env_file;
pub use error::{
    ConfigError, DeployError, EnvFileError, GitError, PermissionError, ReportError, Result,
};
pub use flow::{run_deployment, FlowEvent, FlowOptions, FlowReport};
pub use git::{CommandResult, CommandRunner, RepoSynchronizer, SyncOutcome, SyncRequest, SystemRunner};
pub use permissions::{set_full, set_readonly};
pub use report::{DeploymentPayload, DeploymentReporter, ReportOutcome};
pub use user::resolve_username;
