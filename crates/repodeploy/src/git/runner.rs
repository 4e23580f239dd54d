//! External command execution.

use std::process::Command;
use std::sync::Arc;

use log::debug;

use super::parse::{command_stdout, format_command_error, format_command_line};
use super::types::CommandResult;
use crate::error::GitError;

/// Runs an external program to completion.
///
/// A non-zero exit is reported as a failed [`CommandResult`], not as an
/// error. `Err` is reserved for programs that could not be started at all.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult, GitError>;
}

/// Runs commands as child processes of the current process. Blocks until the
/// child exits; there is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult, GitError> {
        let command_line = format_command_line(program, args);
        debug!("Running {}", command_line);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| GitError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        if output.status.success() {
            Ok(CommandResult::ok(command_stdout(&output)))
        } else {
            let error = format_command_error(&command_line, &output);
            debug!("{} failed: {}", command_line, error);
            Ok(CommandResult::failed(error))
        }
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult, GitError> {
        (**self).run(program, args)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Arc<R> {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult, GitError> {
        (**self).run(program, args)
    }
}
