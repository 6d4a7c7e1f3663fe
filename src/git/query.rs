//! Read-only repository queries.
//!
//! These never mutate the repository. They are used for preconditions and
//! for the final report.

use super::command::GitCommand;
use super::runner::CommandRunner;
use crate::error::Result;
use std::path::Path;

/// Whether `dir` is the root of a git working tree.
///
/// Checks for `.git` directly rather than asking git, so a project folder
/// nested inside another repository is still treated as uninitialized.
pub fn is_repository_root(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// Check if a branch exists locally.
pub fn branch_exists<R: CommandRunner + ?Sized>(runner: &R, branch: &str) -> bool {
    runner
        .run(&GitCommand::git([
            "rev-parse",
            "--verify",
            "--quiet",
            &format!("refs/heads/{}", branch),
        ]))
        .is_ok()
}

/// Whether HEAD points at a commit (false for a freshly initialized repo).
pub fn has_commits<R: CommandRunner + ?Sized>(runner: &R) -> bool {
    runner
        .run(&GitCommand::git(["rev-parse", "--verify", "--quiet", "HEAD"]))
        .is_ok()
}

/// Name of the checked-out branch. Works on an unborn branch too.
pub fn current_branch<R: CommandRunner + ?Sized>(runner: &R) -> Result<String> {
    let output = runner.run(&GitCommand::git(["symbolic-ref", "--short", "HEAD"]))?;
    Ok(output.stdout)
}

/// All local branch names, sorted by git.
pub fn local_branches<R: CommandRunner + ?Sized>(runner: &R) -> Result<Vec<String>> {
    let output = runner.run(&GitCommand::git([
        "for-each-ref",
        "--format=%(refname:short)",
        "refs/heads",
    ]))?;
    Ok(output.lines().into_iter().map(str::to_string).collect())
}

/// Files tracked at the tip of `reference`.
pub fn tracked_files<R: CommandRunner + ?Sized>(runner: &R, reference: &str) -> Result<Vec<String>> {
    let output = runner.run(&GitCommand::git(["ls-tree", "-r", "--name-only", reference]))?;
    Ok(output.lines().into_iter().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::ProcessRunner;
    use crate::test_support::create_test_repo;
    use tempfile::TempDir;

    #[test]
    fn test_branch_exists() {
        let temp_dir = create_test_repo();
        let runner = ProcessRunner::new(temp_dir.path());

        assert!(branch_exists(&runner, "main"));
        assert!(!branch_exists(&runner, "nonexistent"));
    }

    #[test]
    fn test_current_branch_and_listing() {
        let temp_dir = create_test_repo();
        let runner = ProcessRunner::new(temp_dir.path());
        runner.run(&GitCommand::create_branch("dev")).unwrap();

        assert_eq!(current_branch(&runner).unwrap(), "dev");
        assert_eq!(local_branches(&runner).unwrap(), vec!["dev", "main"]);
    }

    #[test]
    fn test_has_commits_on_fresh_repo() {
        let temp_dir = TempDir::new().unwrap();
        let runner = ProcessRunner::new(temp_dir.path());
        assert!(!is_repository_root(temp_dir.path()));

        runner.run(&GitCommand::init()).unwrap();
        assert!(is_repository_root(temp_dir.path()));
        assert!(!has_commits(&runner));
    }

    #[test]
    fn test_tracked_files() {
        let temp_dir = create_test_repo();
        let runner = ProcessRunner::new(temp_dir.path());

        assert_eq!(tracked_files(&runner, "main").unwrap(), vec!["README.md"]);
    }
}
