use crate::git::{CommandFailure, CommandOutput, CommandRunner, GitCommand, ProcessRunner};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The working directory is process-global; hold the lock even if a
        // #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub(crate) const TEST_NAME: &str = "Test User";
pub(crate) const TEST_EMAIL: &str = "test@example.com";

/// A runner that spawns real git with a fixed test identity.
pub(crate) fn test_runner(dir: &Path) -> ProcessRunner {
    ProcessRunner::new(dir).with_identity(TEST_NAME, TEST_EMAIL)
}

/// A repository on `main` with one commit containing `README.md`.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name regardless of init.defaultBranch.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", TEST_EMAIL]);
    git(path, &["config", "user.name", TEST_NAME]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// An empty bare repository usable as a push target.
pub(crate) fn create_bare_remote() -> TempDir {
    let bare = TempDir::new().unwrap();
    git(bare.path(), &["init", "--bare"]);
    bare
}

/// Branch names present in a bare remote.
pub(crate) fn remote_branches(bare: &Path) -> Vec<String> {
    let output = Command::new("git")
        .current_dir(bare)
        .args(["for-each-ref", "--format=%(refname:short)", "refs/heads"])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Number of commits reachable from `reference`.
pub(crate) fn commit_count<R: CommandRunner + ?Sized>(runner: &R, reference: &str) -> usize {
    let output = runner
        .run(&GitCommand::git(["rev-list", "--count", reference]))
        .unwrap();
    output.stdout.parse().unwrap()
}

/// Whether a remote with this name is configured.
pub(crate) fn remote_exists<R: CommandRunner + ?Sized>(runner: &R, remote: &str) -> bool {
    let remotes = runner.run(&GitCommand::git(["remote"])).unwrap();
    remotes.lines().contains(&remote)
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

/// A fake runner that records commands instead of spawning processes.
///
/// Every command succeeds unless it matches a scripted failure.
pub(crate) struct RecordingRunner {
    workdir: PathBuf,
    calls: RefCell<Vec<GitCommand>>,
    failures: Vec<(GitCommand, String)>,
}

impl RecordingRunner {
    pub(crate) fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
            calls: RefCell::new(Vec::new()),
            failures: Vec::new(),
        }
    }

    /// Make `command` fail with `diagnostic`.
    pub(crate) fn failing_on(mut self, command: GitCommand, diagnostic: &str) -> Self {
        self.failures.push((command, diagnostic.to_string()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<GitCommand> {
        self.calls.borrow().clone()
    }

    /// Recorded commands rendered as strings, for readable assertions.
    pub(crate) fn rendered(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput, CommandFailure> {
        self.calls.borrow_mut().push(command.clone());
        match self.failures.iter().find(|(cmd, _)| cmd == command) {
            Some((_, diagnostic)) => Err(CommandFailure {
                command: command.to_string(),
                exit_code: Some(128),
                diagnostic: diagnostic.clone(),
                timed_out: false,
            }),
            None => Ok(CommandOutput::default()),
        }
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}
