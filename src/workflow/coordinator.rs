//! The workflow state machine.

use super::progress::{Progress, ProgressEvent};
use super::step::{Sequencer, Step};
use crate::error::{GenesisError, Result};
use crate::git::{CommandRunner, GitCommand, query};
use crate::sync::{self, RemoteBinding};
use crate::topology::{self, BranchLayout, BranchName};
use serde::Serialize;
use std::fmt;

/// Message for the empty commit that starts `main`.
pub const MAIN_COMMIT_MESSAGE: &str = "Initial empty commit";

/// Message for the commit that records the project files on `dev`.
pub const DEV_COMMIT_MESSAGE: &str = "Initial project setup on dev";

/// The two phases of a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Finalize,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Finalize => write!(f, "finalize"),
        }
    }
}

/// Where a workflow is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingSetup,
    AwaitingFinalize,
    Done,
}

/// What a workflow will build: the branch names and the optional remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowPlan {
    pub layout: BranchLayout,
    pub remote: Option<RemoteBinding>,
}

/// Outcome of a completed workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowReport {
    /// Branches pushed to the remote, in push order.
    pub pushed: Vec<String>,
    /// Branches that exist only locally.
    pub local_only: Vec<String>,
    /// Branch checked out when the workflow finished.
    pub active_branch: String,
    pub remote_url: Option<String>,
}

/// Runs setup and finalize against one repository directory.
///
/// The runner's working directory must not be shared with another workflow
/// while this one is alive.
pub struct Workflow<R: CommandRunner> {
    runner: R,
    plan: WorkflowPlan,
    state: State,
    progress: Progress,
    pushed: Vec<String>,
}

impl<R: CommandRunner> Workflow<R> {
    pub fn new(runner: R, plan: WorkflowPlan) -> Self {
        Self {
            runner,
            plan,
            state: State::AwaitingSetup,
            progress: Progress::silent(),
            pushed: Vec::new(),
        }
    }

    /// Report step and phase events to `progress`.
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Initialize the repository, seed the remote and create the branch
    /// skeleton. Leaves `dev` checked out, ready for the project files.
    pub fn setup(&mut self) -> Result<()> {
        self.expect_state(State::AwaitingSetup, Phase::Setup)?;
        self.progress.emit(ProgressEvent::PhaseStarted(Phase::Setup));

        let pushed = {
            let seq = Sequencer::new(&self.runner, &self.progress);
            let layout = &self.plan.layout;
            let remote = self.plan.remote.as_ref();

            initialize(&seq, &layout.main)?;

            let mut pushed = Vec::new();
            if let Some(binding) = remote {
                pushed.extend(sync::bind_and_seed(&seq, binding, layout.main.as_str())?);
            }
            pushed.extend(topology::create_topology(&seq, layout, remote)?);
            pushed
        };

        self.pushed = pushed;
        self.state = State::AwaitingFinalize;
        self.progress.emit(ProgressEvent::PhaseCompleted(Phase::Setup));
        Ok(())
    }

    /// Commit everything in the working tree on `dev` and spread it to the
    /// feature branches, pushing when a remote is bound.
    ///
    /// The boilerplate files (at least `.gitignore`) must already be written:
    /// everything not ignored is staged.
    pub fn finalize(&mut self) -> Result<WorkflowReport> {
        self.expect_state(State::AwaitingFinalize, Phase::Finalize)?;
        self.progress.emit(ProgressEvent::PhaseStarted(Phase::Finalize));

        let pushed = {
            let seq = Sequencer::new(&self.runner, &self.progress);
            let layout = &self.plan.layout;

            seq.run(Step::StageFiles, GitCommand::stage_all())?;
            seq.run(
                Step::Commit {
                    branch: layout.dev.to_string(),
                },
                GitCommand::commit(DEV_COMMIT_MESSAGE, false),
            )?;

            match &self.plan.remote {
                Some(binding) => sync::propagate(&seq, binding, layout)?,
                None => {
                    topology::populate_features(&seq, layout)?;
                    Vec::new()
                }
            }
        };

        self.pushed.extend(pushed);
        self.state = State::Done;
        self.progress.emit(ProgressEvent::PhaseCompleted(Phase::Finalize));
        Ok(self.report())
    }

    fn report(&self) -> WorkflowReport {
        let local_only = self
            .plan
            .layout
            .all()
            .map(BranchName::to_string)
            .filter(|branch| !self.pushed.contains(branch))
            .collect();

        let active_branch = match query::current_branch(&self.runner) {
            Ok(branch) if !branch.is_empty() => branch,
            _ => self.plan.layout.dev.to_string(),
        };

        WorkflowReport {
            pushed: self.pushed.clone(),
            local_only,
            active_branch,
            remote_url: self.plan.remote.as_ref().map(|r| r.url.clone()),
        }
    }

    fn expect_state(&self, expected: State, phase: Phase) -> Result<()> {
        if self.state == expected {
            return Ok(());
        }
        let reason = match self.state {
            State::AwaitingSetup => "setup has not completed",
            State::AwaitingFinalize => "setup already completed; run finalize next",
            State::Done => "the workflow already finished",
        };
        Err(GenesisError::UserError(format!(
            "cannot run {}: {}",
            phase, reason
        )))
    }
}

/// Refuse a directory that `setup` cannot build on. Read-only.
///
/// The one such case is a repository with history but no `main`, since
/// `main` must start with a single empty commit.
pub fn check_preconditions<R: CommandRunner + ?Sized>(runner: &R, main: &BranchName) -> Result<()> {
    let dir = runner.workdir();
    if query::is_repository_root(dir)
        && !query::branch_exists(runner, main.as_str())
        && query::has_commits(runner)
    {
        return Err(GenesisError::UserError(format!(
            "'{}' is already a git repository with history but has no '{}' branch.\n\n\
             The '{}' branch must start empty. Use a fresh directory, or create '{}' yourself\n\
             (git switch --orphan {} && git commit --allow-empty -m \"{}\").",
            dir.display(),
            main,
            main,
            main,
            main,
            MAIN_COMMIT_MESSAGE
        )));
    }
    Ok(())
}

/// Make sure the repository exists and `main` has its empty first commit.
///
/// - no repository: `git init`, create `main`, empty commit
/// - repository with `main`: nothing to do
/// - repository without commits: create `main`, empty commit
/// - repository with history but no `main`: refused by [`check_preconditions`]
fn initialize<R: CommandRunner + ?Sized>(seq: &Sequencer<'_, R>, main: &BranchName) -> Result<()> {
    let runner = seq.runner();
    check_preconditions(runner, main)?;

    if !query::is_repository_root(runner.workdir()) {
        seq.run(Step::InitRepository, GitCommand::init())?;
    } else if query::branch_exists(runner, main.as_str()) {
        tracing::info!(branch = %main, "repository already initialized");
        return Ok(());
    }

    seq.run(
        Step::CreateInitialBranch {
            branch: main.to_string(),
        },
        GitCommand::create_branch(main.as_str()),
    )?;
    seq.run(
        Step::EmptyCommit {
            branch: main.to_string(),
        },
        GitCommand::commit(MAIN_COMMIT_MESSAGE, true),
    )?;
    Ok(())
}
