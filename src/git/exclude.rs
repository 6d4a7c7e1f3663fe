//! Local ignore rules in `.git/info/exclude`.

use crate::error::{GenesisError, Result};
use std::fs;
use std::path::Path;

const EXCLUDE_HEADER: &str = "# codegenesis";

/// Add `entry` to the repository's exclude file unless it is already there.
///
/// Unlike `.gitignore` the exclude file is never committed, so the entry
/// affects this clone only. Requires `.git` to exist.
pub fn exclude_from_git(repo_root: &Path, entry: &str) -> Result<()> {
    let git_dir = repo_root.join(".git");
    if !git_dir.is_dir() {
        return Err(GenesisError::GitError(format!(
            "'{}' is not a git repository root",
            repo_root.display()
        )));
    }

    let exclude_path = git_dir.join("info").join("exclude");
    let existing = match fs::read_to_string(&exclude_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(GenesisError::GitError(format!(
                "failed to read '{}': {}",
                exclude_path.display(),
                e
            )));
        }
    };

    if existing.lines().any(|line| line.trim() == entry) {
        return Ok(());
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    if !content.contains(EXCLUDE_HEADER) {
        content.push_str(EXCLUDE_HEADER);
        content.push('\n');
    }
    content.push_str(entry);
    content.push('\n');

    crate::fs::atomic_write_file(&exclude_path, &content)?;
    tracing::debug!(entry, "added to .git/info/exclude");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{CommandRunner, GitCommand, ProcessRunner};
    use crate::test_support::create_test_repo;
    use tempfile::TempDir;

    #[test]
    fn test_excluded_file_is_not_staged() {
        let temp_dir = create_test_repo();
        let path = temp_dir.path();
        fs::write(path.join(".codegenesis.lock"), "{}").unwrap();

        exclude_from_git(path, ".codegenesis.lock").unwrap();

        let runner = ProcessRunner::new(path);
        let status = runner
            .run(&GitCommand::git(["status", "--porcelain"]))
            .unwrap();
        assert!(status.is_empty());
    }

    #[test]
    fn test_exclude_is_idempotent_and_keeps_existing_rules() {
        let temp_dir = create_test_repo();
        let exclude_path = temp_dir.path().join(".git/info/exclude");
        fs::create_dir_all(exclude_path.parent().unwrap()).unwrap();
        fs::write(&exclude_path, "*.swp").unwrap();

        exclude_from_git(temp_dir.path(), ".codegenesis.lock").unwrap();
        exclude_from_git(temp_dir.path(), ".codegenesis.lock").unwrap();

        let content = fs::read_to_string(&exclude_path).unwrap();
        assert_eq!(content, "*.swp\n# codegenesis\n.codegenesis.lock\n");
    }

    #[test]
    fn test_exclude_requires_repository() {
        let temp_dir = TempDir::new().unwrap();
        assert!(exclude_from_git(temp_dir.path(), ".codegenesis.lock").is_err());
    }
}
