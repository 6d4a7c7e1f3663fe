//! Creating files and directories without clobbering.

use crate::error::{GenesisError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// What [`write_if_absent`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    /// The file already existed and was left untouched.
    Skipped,
}

/// Create `path` with `content` unless something already exists there.
///
/// The existence check and the creation are one `create_new` open, so a
/// file appearing concurrently is never overwritten. Parent directories are
/// created as needed.
pub fn write_if_absent<P: AsRef<Path>>(path: P, content: &str) -> Result<WriteOutcome> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::info!(path = %path.display(), "file exists; skipped");
            return Ok(WriteOutcome::Skipped);
        }
        Err(e) => {
            return Err(GenesisError::UserError(format!(
                "failed to create '{}': {}",
                path.display(),
                e
            )));
        }
    };

    file.write_all(content.as_bytes()).map_err(|e| {
        GenesisError::UserError(format!("failed to write '{}': {}", path.display(), e))
    })?;

    tracing::info!(path = %path.display(), "created");
    Ok(WriteOutcome::Created)
}

/// Create a directory and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        GenesisError::UserError(format!(
            "failed to create directory '{}': {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_if_absent_creates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("README.md");

        assert_eq!(write_if_absent(&path, "# demo\n").unwrap(), WriteOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# demo\n");
    }

    #[test]
    fn test_write_if_absent_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("LICENSE");
        fs::write(&path, "custom license").unwrap();

        assert_eq!(write_if_absent(&path, "MIT License").unwrap(), WriteOutcome::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom license");
    }

    #[test]
    fn test_write_if_absent_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("src").join("Main.java");

        write_if_absent(&path, "public class Main {}\n").unwrap();

        assert!(path.is_file());
    }
}
