//! Branch topology for new projects.
//!
//! Every project gets the same skeleton:
//!
//! - `main`: empty, one empty commit
//! - `staging`: forked from `main`, one extra empty commit so it can be pushed
//! - `dev`: forked from `main`, receives the project files at finalize
//! - feature branches: forked from `dev`, receive the files by merging `dev`
//!
//! The engine issues the commands in a fixed order and stops at the first
//! failure. Nothing is rolled back.

mod branch_name;


pub use branch_name::BranchName;

use crate::error::{GenesisError, Result};
use crate::git::{CommandRunner, GitCommand};
use crate::sync::RemoteBinding;
use crate::workflow::{Sequencer, Step};
use std::collections::HashSet;

/// Message for the empty commit that gives `staging` its own history.
pub const STAGING_COMMIT_MESSAGE: &str = "Initial empty commit on staging";

/// The branch names of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchLayout {
    pub main: BranchName,
    pub dev: BranchName,
    pub staging: BranchName,
    pub features: Vec<BranchName>,
}

impl BranchLayout {
    /// Build a layout, rejecting duplicate names.
    pub fn new(
        main: BranchName,
        dev: BranchName,
        staging: BranchName,
        features: Vec<BranchName>,
    ) -> Result<Self> {
        let layout = Self {
            main,
            dev,
            staging,
            features,
        };

        let mut seen = HashSet::new();
        for branch in layout.all() {
            if !seen.insert(branch.as_str()) {
                return Err(GenesisError::UserError(format!(
                    "branch '{}' is listed more than once; main, dev, staging and feature branches must all differ",
                    branch
                )));
            }
        }

        Ok(layout)
    }

    /// `main`/`dev`/`staging` plus the given feature branch names.
    pub fn standard<S: AsRef<str>>(features: &[S]) -> Result<Self> {
        let features = features
            .iter()
            .map(|f| BranchName::new(f.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(
            BranchName::new("main")?,
            BranchName::new("dev")?,
            BranchName::new("staging")?,
            features,
        )
    }

    /// Every branch in creation order: main, dev, staging, features.
    pub fn all(&self) -> impl Iterator<Item = &BranchName> {
        [&self.main, &self.dev, &self.staging]
            .into_iter()
            .chain(self.features.iter())
    }
}

/// Create dev, staging and the feature branches from an existing `main`.
///
/// Staging is pushed only when `remote` is bound. Leaves `dev` checked out.
/// Returns the branches pushed.
pub fn create_topology<R: CommandRunner + ?Sized>(
    seq: &Sequencer<'_, R>,
    layout: &BranchLayout,
    remote: Option<&RemoteBinding>,
) -> Result<Vec<String>> {
    let main = layout.main.as_str();
    let dev = layout.dev.as_str();
    let staging = layout.staging.as_str();
    let mut pushed = Vec::new();

    checkout(seq, main)?;
    create_branch(seq, dev, main)?;
    checkout(seq, main)?;
    create_branch(seq, staging, main)?;

    seq.run(
        Step::EmptyCommit {
            branch: staging.to_string(),
        },
        GitCommand::commit(STAGING_COMMIT_MESSAGE, true),
    )?;

    match remote {
        Some(binding) => {
            binding.push(seq, staging, false)?;
            pushed.push(staging.to_string());
        }
        None => seq.skip(
            Step::Push {
                branch: staging.to_string(),
                remote: crate::sync::DEFAULT_REMOTE.to_string(),
                force: false,
            },
            "no remote configured",
        ),
    }

    for feature in &layout.features {
        checkout(seq, dev)?;
        create_branch(seq, feature.as_str(), dev)?;
    }

    checkout(seq, dev)?;
    Ok(pushed)
}

/// Merge `dev` into every feature branch locally, then return to `dev`.
///
/// Used by finalize when there is no remote to propagate to.
pub fn populate_features<R: CommandRunner + ?Sized>(
    seq: &Sequencer<'_, R>,
    layout: &BranchLayout,
) -> Result<()> {
    let dev = layout.dev.as_str();
    for feature in &layout.features {
        checkout(seq, feature.as_str())?;
        merge_branch(seq, dev, feature.as_str())?;
    }
    checkout(seq, dev)
}

pub(crate) fn checkout<R: CommandRunner + ?Sized>(seq: &Sequencer<'_, R>, branch: &str) -> Result<()> {
    seq.run(
        Step::Checkout {
            branch: branch.to_string(),
        },
        GitCommand::checkout(branch),
    )?;
    Ok(())
}

fn create_branch<R: CommandRunner + ?Sized>(
    seq: &Sequencer<'_, R>,
    branch: &str,
    from: &str,
) -> Result<()> {
    seq.run(
        Step::CreateBranch {
            branch: branch.to_string(),
            from: from.to_string(),
        },
        GitCommand::create_branch(branch),
    )?;
    Ok(())
}

/// Merge `from` into the checked-out branch `into`.
///
/// A failed merge is terminal. The merge is aborted first so the working
/// tree is not left with conflict markers.
pub(crate) fn merge_branch<R: CommandRunner + ?Sized>(
    seq: &Sequencer<'_, R>,
    from: &str,
    into: &str,
) -> Result<()> {
    let step = Step::Merge {
        from: from.to_string(),
        into: into.to_string(),
    };
    if let Err(err) = seq.run(step, GitCommand::merge(from)) {
        if let Err(abort) = seq.runner().run(&GitCommand::merge_abort()) {
            tracing::debug!(diagnostic = %abort.diagnostic, "merge --abort had nothing to abort");
        }
        return Err(err);
    }
    Ok(())
}
