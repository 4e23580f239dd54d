//! Permission sweeps over a deployed checkout.

use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::deploy_log::DeployLog;
use crate::error::PermissionError;

const READ_ONLY_MODE: u32 = 0o444;
const FULL_MODE: u32 = 0o777;

/// Makes every file under `dir` read-only for owner, group and other,
/// except files whose name ends with `exclude_ext`.
///
/// The first failure aborts the sweep; files already changed stay changed.
pub fn set_readonly(dir: &Path, exclude_ext: &str) -> Result<DeployLog, PermissionError> {
    let mut log = DeployLog::new();

    for_each_file(dir, |path| {
        let excluded = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(exclude_ext))
            .unwrap_or(false);
        if excluded {
            debug!("Skipping excluded file {}", path.display());
            return Ok(());
        }

        apply_mode(path, READ_ONLY_MODE)?;
        log.push(format!("Set {} to read-only.", path.display()));
        Ok(())
    })?;

    Ok(log)
}

/// Gives every file under `dir` full read, write and execute permission.
pub fn set_full(dir: &Path) -> Result<DeployLog, PermissionError> {
    let mut log = DeployLog::new();

    for_each_file(dir, |path| {
        apply_mode(path, FULL_MODE)?;
        log.push(format!("Set {} to full permission.", path.display()));
        Ok(())
    })?;

    Ok(log)
}

fn for_each_file<F>(dir: &Path, mut visit: F) -> Result<(), PermissionError>
where
    F: FnMut(&Path) -> Result<(), PermissionError>,
{
    // Unreadable or missing directories are skipped, not fatal.
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping {}: {}", e.path().unwrap_or(dir).display(), e);
                continue;
            }
        };

        // Symlinks are not followed, so only real files show up here.
        if entry.file_type().is_file() {
            visit(entry.path())?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> Result<(), PermissionError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
        PermissionError::SetPermissions {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(not(unix))]
fn apply_mode(path: &Path, mode: u32) -> Result<(), PermissionError> {
    let map_err = |e| PermissionError::SetPermissions {
        path: path.to_path_buf(),
        source: e,
    };
    let mut permissions = std::fs::metadata(path).map_err(map_err)?.permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    std::fs::set_permissions(path, permissions).map_err(map_err)
}
