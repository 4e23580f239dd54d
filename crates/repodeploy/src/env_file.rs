use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::error::EnvFileError;

pub const ENV_FILE_NAME: &str = ".env";

/// Renders one `KEY = 'VALUE'` line per entry. Values are quoted as-is.
pub fn render_env(env: &IndexMap<String, String>) -> String {
    let mut content = String::new();
    for (key, value) in env {
        let _ = writeln!(content, "{} = '{}'", key, value);
    }
    content
}

/// Writes `<dir>/.env`, replacing any existing file.
pub fn write_env_file(dir: &Path, env: &IndexMap<String, String>) -> Result<PathBuf, EnvFileError> {
    let path = dir.join(ENV_FILE_NAME);
    debug!("Writing {} entries to {}", env.len(), path.display());

    std::fs::write(&path, render_env(env)).map_err(|e| EnvFileError::WriteFile {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}
