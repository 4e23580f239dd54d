//! Clone-or-update of the deployed checkout.

use std::path::Path;

use log::warn;

use super::runner::CommandRunner;
use super::types::{CommandResult, SyncOutcome, SyncRequest};
use crate::deploy_log::DeployLog;
use crate::error::GitError;

const GIT: &str = "git";

/// Brings a local checkout in line with a remote branch or commit.
pub struct RepoSynchronizer<R> {
    runner: R,
}

impl<R: CommandRunner> RepoSynchronizer<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Clones the repository if `local_dir` is missing, otherwise fetches,
    /// then checks out the pinned commit or pulls the branch.
    ///
    /// Stops at the first failed command and returns its result. Nothing is
    /// rolled back.
    pub fn synchronize(&self, request: &SyncRequest) -> Result<SyncOutcome, GitError> {
        let mut log = DeployLog::new();
        let dir = request.local_dir.as_path();

        let result = if !dir.exists() {
            log.push(format!(
                "Cloning repository {} into {}",
                request.repo_url,
                dir.display()
            ));
            let target = dir.to_string_lossy();
            self.git(&[
                "clone",
                "-b",
                request.branch.as_str(),
                request.repo_url.as_str(),
                target.as_ref(),
            ])?
        } else {
            log.push("Repository already exists. Fetching latest changes.");
            self.git_in(dir, &["fetch"])?
        };

        if !result.success {
            warn!("Repository sync aborted: {}", result.message);
            return Ok(SyncOutcome { result, log });
        }

        let result = match &request.commit_hash {
            Some(hash) => {
                log.push(format!("Checking out specific commit {}", hash));
                self.git_in(dir, &["checkout", hash.as_str()])?
            }
            None => {
                log.push(format!(
                    "Pulling latest commit from branch {}",
                    request.branch
                ));
                let checkout = self.git_in(dir, &["checkout", request.branch.as_str()])?;
                if checkout.success {
                    self.git_in(dir, &["pull", "origin", request.branch.as_str()])?
                } else {
                    checkout
                }
            }
        };

        if !result.success {
            warn!("Repository sync failed: {}", result.message);
        }

        Ok(SyncOutcome { result, log })
    }

    fn git(&self, args: &[&str]) -> Result<CommandResult, GitError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run(GIT, &args)
    }

    /// Runs `git -C <dir> <args>`.
    fn git_in(&self, dir: &Path, args: &[&str]) -> Result<CommandResult, GitError> {
        let mut full = vec!["-C".to_string(), dir.to_string_lossy().into_owned()];
        full.extend(args.iter().map(|a| a.to_string()));
        self.runner.run(GIT, &full)
    }
}
