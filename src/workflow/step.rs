//! Named workflow steps and the sequencer that runs them.
//!
//! Every git command issued by setup and finalize is wrapped in a [`Step`].
//! A failing command becomes `GenesisError::StepFailed` carrying the step
//! and the raw diagnostic, so `?` is the short-circuit: the first failure
//! stops the sequence and names where it stopped.

use super::progress::{Progress, ProgressEvent};
use crate::error::{GenesisError, Result};
use crate::git::{CommandOutput, CommandRunner, GitCommand};
use std::fmt;

/// One operation in the setup or finalize sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    InitRepository,
    CreateInitialBranch { branch: String },
    EmptyCommit { branch: String },
    AddRemote { remote: String },
    Push { branch: String, remote: String, force: bool },
    Fetch { remote: String },
    Checkout { branch: String },
    CreateBranch { branch: String, from: String },
    StageFiles,
    Commit { branch: String },
    Merge { from: String, into: String },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::InitRepository => write!(f, "initialize repository"),
            Step::CreateInitialBranch { branch } => write!(f, "create initial branch {}", branch),
            Step::EmptyCommit { branch } => write!(f, "empty commit on {}", branch),
            Step::AddRemote { remote } => write!(f, "add remote {}", remote),
            Step::Push {
                branch,
                remote,
                force: true,
            } => write!(f, "force-push {} to {}", branch, remote),
            Step::Push { branch, remote, .. } => write!(f, "push {} to {}", branch, remote),
            Step::Fetch { remote } => write!(f, "fetch {}", remote),
            Step::Checkout { branch } => write!(f, "checkout {}", branch),
            Step::CreateBranch { branch, from } => write!(f, "create branch {} from {}", branch, from),
            Step::StageFiles => write!(f, "stage project files"),
            Step::Commit { branch } => write!(f, "commit project files on {}", branch),
            Step::Merge { from, into } => write!(f, "merge {} into {}", from, into),
        }
    }
}

/// Runs steps against a repository and reports each one.
pub struct Sequencer<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    progress: &'a Progress,
}

impl<'a, R: CommandRunner + ?Sized> Sequencer<'a, R> {
    pub fn new(runner: &'a R, progress: &'a Progress) -> Self {
        Self { runner, progress }
    }

    pub fn runner(&self) -> &'a R {
        self.runner
    }

    /// Run one step. A failed command ends the sequence with `StepFailed`.
    pub fn run(&self, step: Step, command: GitCommand) -> Result<CommandOutput> {
        self.progress.emit(ProgressEvent::StepStarted(step.clone()));

        match self.runner.run(&command) {
            Ok(output) => {
                tracing::info!(step = %step, "step completed");
                self.progress.emit(ProgressEvent::StepCompleted(step));
                Ok(output)
            }
            Err(failure) => {
                let detail = if failure.timed_out {
                    format!("timed out ({})", failure.diagnostic)
                } else {
                    failure.diagnostic
                };
                tracing::error!(step = %step, %detail, "step failed");
                self.progress.emit(ProgressEvent::StepFailed {
                    step: step.clone(),
                    detail: detail.clone(),
                });
                Err(GenesisError::StepFailed { step, detail })
            }
        }
    }

    /// Record a step that was deliberately not run.
    pub fn skip(&self, step: Step, reason: &str) {
        tracing::info!(step = %step, reason, "step skipped");
        self.progress.emit(ProgressEvent::StepSkipped {
            step,
            reason: reason.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingRunner;
    use tempfile::TempDir;

    #[test]
    fn test_step_display() {
        let push = Step::Push {
            branch: "main".to_string(),
            remote: "origin".to_string(),
            force: true,
        };
        assert_eq!(push.to_string(), "force-push main to origin");

        let merge = Step::Merge {
            from: "dev".to_string(),
            into: "feature-x".to_string(),
        };
        assert_eq!(merge.to_string(), "merge dev into feature-x");
    }

    #[test]
    fn test_failure_carries_step_and_diagnostic() {
        let temp_dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new(temp_dir.path())
            .failing_on(GitCommand::checkout("dev"), "error: pathspec 'dev' did not match");
        let progress = Progress::silent();
        let seq = Sequencer::new(&runner, &progress);

        seq.run(Step::Checkout { branch: "main".to_string() }, GitCommand::checkout("main"))
            .unwrap();
        let err = seq
            .run(Step::Checkout { branch: "dev".to_string() }, GitCommand::checkout("dev"))
            .unwrap_err();

        match err {
            GenesisError::StepFailed { step, detail } => {
                assert_eq!(step, Step::Checkout { branch: "dev".to_string() });
                assert_eq!(detail, "error: pathspec 'dev' did not match");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_progress_events_are_emitted() {
        let temp_dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new(temp_dir.path());
        let (progress, events) = Progress::channel();
        let seq = Sequencer::new(&runner, &progress);

        seq.run(Step::StageFiles, GitCommand::stage_all()).unwrap();
        seq.skip(
            Step::Fetch { remote: "origin".to_string() },
            "no remote configured",
        );
        drop(progress);

        let received: Vec<ProgressEvent> = events.iter().collect();
        assert_eq!(received.len(), 3);
        assert_eq!(received[0], ProgressEvent::StepStarted(Step::StageFiles));
        assert_eq!(received[1], ProgressEvent::StepCompleted(Step::StageFiles));
        assert!(matches!(received[2], ProgressEvent::StepSkipped { .. }));
    }
}
