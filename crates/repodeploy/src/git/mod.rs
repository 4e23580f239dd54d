//! Git checkout management through the `git` command line tool.

pub mod parse;
pub mod runner;
pub mod sync;
pub mod types;

pub use runner::{CommandRunner, SystemRunner};
pub use sync::RepoSynchronizer;
pub use types::*;
