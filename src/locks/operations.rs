//! Lock acquisition.

use super::guard::LockGuard;
use super::metadata::LockMetadata;
use crate::error::{GenesisError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Name of the lock file inside a project directory.
pub const LOCK_FILE: &str = ".codegenesis.lock";

/// Take the lock on `project_dir`, which must exist.
///
/// Fails with `LockError` (exit code 4) naming the holder when another run
/// has it.
pub fn acquire_workspace_lock(project_dir: &Path, action: &str) -> Result<LockGuard> {
    let lock_path = project_dir.join(LOCK_FILE);
    let metadata = LockMetadata::new(action);

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&lock_path)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                let holder = match read_holder(project_dir) {
                    Some(meta) => format!(
                        "\nLock: {} (created {} ago by {}, pid {})\nAction: {}",
                        lock_path.display(),
                        meta.age_string(),
                        meta.owner,
                        meta.pid.map_or_else(|| "unknown".to_string(), |p| p.to_string()),
                        meta.action
                    ),
                    None => format!("\nLock: {}", lock_path.display()),
                };
                GenesisError::LockError(format!(
                    "project directory is in use by another codegenesis run{}\n\n\
                     If no other run is active, delete the lock file and retry.",
                    holder
                ))
            } else {
                GenesisError::LockError(format!(
                    "failed to acquire lock '{}': {}",
                    lock_path.display(),
                    e
                ))
            }
        })?;

    let json = metadata.to_json()?;
    if let Err(e) = file.write_all(json.as_bytes()).and_then(|()| file.sync_all()) {
        let _ = fs::remove_file(&lock_path);
        return Err(GenesisError::LockError(format!(
            "failed to write lock metadata: {}",
            e
        )));
    }

    tracing::debug!(path = %lock_path.display(), action, "lock acquired");
    Ok(LockGuard::new(lock_path))
}

/// Metadata of the current holder, if the directory is locked.
pub fn read_holder(project_dir: &Path) -> Option<LockMetadata> {
    let lock_path = project_dir.join(LOCK_FILE);
    if !lock_path.exists() {
        return None;
    }
    LockMetadata::from_file(lock_path).ok()
}
