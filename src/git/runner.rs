//! Command execution for git.
//!
//! Every git invocation goes through a [`CommandRunner`]. The process-backed
//! [`ProcessRunner`] binds a working directory, captures stdout/stderr and
//! enforces a per-command timeout; tests substitute a recording fake.

use super::command::GitCommand;
use crate::error::GenesisError;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default upper bound for a single git command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Captured output of a successful command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// A command that did not succeed.
///
/// `diagnostic` is the raw stderr text (stdout when stderr is empty). The
/// runner never interprets it.
#[derive(Debug, Clone)]
pub struct CommandFailure {
    pub command: String,
    pub exit_code: Option<i32>,
    pub diagnostic: String,
    pub timed_out: bool,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timed_out {
            write!(f, "`{}` timed out: {}", self.command, self.diagnostic)
        } else {
            match self.exit_code {
                Some(code) => write!(
                    f,
                    "`{}` failed (exit code {}): {}",
                    self.command, code, self.diagnostic
                ),
                None => write!(f, "`{}` failed: {}", self.command, self.diagnostic),
            }
        }
    }
}

impl From<CommandFailure> for GenesisError {
    fn from(failure: CommandFailure) -> Self {
        GenesisError::GitError(failure.to_string())
    }
}

/// Executes git commands against one repository directory.
pub trait CommandRunner {
    /// Run a command to completion.
    fn run(&self, command: &GitCommand) -> Result<CommandOutput, CommandFailure>;

    /// The working directory every command runs in.
    fn workdir(&self) -> &Path;
}

/// Runs commands as child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    workdir: PathBuf,
    timeout: Duration,
    env: Vec<(String, String)>,
}

impl ProcessRunner {
    pub fn new<P: Into<PathBuf>>(workdir: P) -> Self {
        Self {
            workdir: workdir.into(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
            env: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an environment variable to every spawned command.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the author and committer identity for commits made by this runner.
    pub fn with_identity(self, name: &str, email: &str) -> Self {
        self.with_env("GIT_AUTHOR_NAME", name)
            .with_env("GIT_AUTHOR_EMAIL", email)
            .with_env("GIT_COMMITTER_NAME", name)
            .with_env("GIT_COMMITTER_EMAIL", email)
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput, CommandFailure> {
        let rendered = command.to_string();
        tracing::debug!(command = %rendered, cwd = %self.workdir.display(), "running");

        let failure = |diagnostic: String| CommandFailure {
            command: rendered.clone(),
            exit_code: None,
            diagnostic,
            timed_out: false,
        };

        let mut process = Command::new(command.program());
        process
            .args(command.args())
            .current_dir(&self.workdir)
            // Never block on a credential prompt.
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.env {
            process.env(key, value);
        }

        let mut child = process
            .spawn()
            .map_err(|e| failure(format!("failed to execute {}: {} (is git installed?)", command.program(), e)))?;

        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());

        let waited = wait_with_timeout(&mut child, self.timeout)
            .map_err(|e| failure(format!("failed to check process status: {}", e)))?;

        let Some(status) = waited else {
            // Helpers spawned by git (git-remote-https, aliases) can keep the
            // pipes open after the kill. The readers are left detached.
            drop(stdout_reader);
            drop(stderr_reader);
            tracing::error!(command = %rendered, timeout_secs = self.timeout.as_secs(), "command timed out");
            return Err(CommandFailure {
                command: rendered,
                exit_code: None,
                diagnostic: format!("killed after {}s", self.timeout.as_secs()),
                timed_out: true,
            });
        };

        let output = CommandOutput {
            stdout: collect(stdout_reader),
            stderr: collect(stderr_reader),
        };

        if status.success() {
            Ok(output)
        } else {
            let diagnostic = if output.stderr.is_empty() {
                output.stdout
            } else {
                output.stderr
            };
            tracing::error!(command = %rendered, %diagnostic, "command failed");
            Err(CommandFailure {
                command: rendered,
                exit_code: status.code(),
                diagnostic,
                timed_out: false,
            })
        }
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}

/// Read a child pipe to the end on a helper thread so a chatty command
/// cannot fill the pipe buffer and stall.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).trim().to_string()
        })
    })
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

/// Wait for a child process with timeout.
///
/// Returns `None` if the process had to be killed.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(20);

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            // SIGKILL on Unix, TerminateProcess on Windows.
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(poll_interval);
    }
}
