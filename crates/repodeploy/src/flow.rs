//! The end-to-end deployment run.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::DeploymentConfig;
use crate::deploy_log::DeployLog;
use crate::env_file::write_env_file;
use crate::error::{DeployError, GitError, Result};
use crate::git::{CommandRunner, RepoSynchronizer, SyncOutcome, SyncRequest};
use crate::permissions::set_readonly;
use crate::report::{DeploymentPayload, DeploymentReporter, ReportOutcome};
use crate::user::resolve_username;

/// Knobs for [`run_deployment`] that do not come from the config file.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// Reported as the deploying user.
    pub username: Option<String>,
    /// Base URL of the deployment server.
    pub server_url: String,
    /// Clone or update the checkout before reporting.
    pub sync: bool,
    /// Run the read-only sweep once everything else is done.
    pub lock: bool,
}

impl FlowOptions {
    /// Options resolved from the process environment and `config`, with
    /// synchronization and locking off.
    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self {
            username: resolve_username(),
            server_url: config.server_url().to_string(),
            sync: false,
            lock: false,
        }
    }
}

/// A step of [`run_deployment`] that has just finished.
///
/// Events are emitted as soon as each step completes, so a later failure
/// does not hide what earlier steps did.
#[derive(Debug, Clone, Copy)]
pub enum FlowEvent<'a> {
    /// Synchronization ran, successfully or not.
    Synced(&'a SyncOutcome),
    /// The deployment server was contacted.
    Reported(&'a ReportOutcome),
    EnvFileWritten(&'a Path),
    /// The read-only sweep finished.
    Locked(&'a DeployLog),
}

/// Everything a deployment run did.
#[derive(Debug)]
pub struct FlowReport {
    pub outcome: ReportOutcome,
    /// Path of the `.env` file, when the config has an `env` section.
    pub env_file: Option<PathBuf>,
    /// Present when synchronization ran.
    pub sync: Option<SyncOutcome>,
    pub log: DeployLog,
}

/// Runs a deployment: optional sync, report, `.env` file, optional lock.
///
/// `on_event` sees each step right after it completes. A failed sync aborts
/// before the server hears about the deployment. An unreachable server does
/// not abort the run.
pub async fn run_deployment<R, F>(
    config: &DeploymentConfig,
    options: &FlowOptions,
    runner: R,
    mut on_event: F,
) -> Result<FlowReport>
where
    R: CommandRunner + Send + 'static,
    F: FnMut(FlowEvent<'_>),
{
    let mut log = DeployLog::new();

    let sync = if options.sync {
        let request = SyncRequest::from_config(config)?;
        let outcome = synchronize_blocking(runner, request).await?;
        on_event(FlowEvent::Synced(&outcome));
        log.extend(outcome.log.clone());
        if !outcome.result.success {
            return Err(DeployError::SyncFailed(outcome.result.message));
        }
        Some(outcome)
    } else {
        None
    };

    let payload = DeploymentPayload::from_config(config, options.username.clone())?;
    let reporter = DeploymentReporter::new(&options.server_url)?;
    let outcome = reporter.report(&payload).await?;
    on_event(FlowEvent::Reported(&outcome));
    if !outcome.is_success() {
        warn!("Deployment was not acknowledged by {}", reporter.endpoint());
    }

    let env_file = match &config.env {
        Some(env) => {
            let path = write_env_file(config.local_dir(), env)?;
            on_event(FlowEvent::EnvFileWritten(&path));
            Some(path)
        }
        None => None,
    };

    if options.lock {
        let sweep = set_readonly(config.local_dir(), &config.exclude_ext)?;
        on_event(FlowEvent::Locked(&sweep));
        log.extend(sweep);
    }

    info!(
        "Deployment run finished for {}",
        config.local_dir().display()
    );

    Ok(FlowReport {
        outcome,
        env_file,
        sync,
        log,
    })
}

/// Git runs block until the child exits, so they go to the blocking pool.
async fn synchronize_blocking<R>(runner: R, request: SyncRequest) -> Result<SyncOutcome>
where
    R: CommandRunner + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || {
        RepoSynchronizer::new(runner).synchronize(&request)
    })
    .await
    .map_err(|e| GitError::TaskFailed(e.to_string()))??;

    Ok(outcome)
}
