//! Remote synchronization.
//!
//! Two operations, one per workflow phase:
//!
//! - [`bind_and_seed`] (setup): add the remote, force-push the still-empty
//!   `main` so local history wins over anything the host auto-created, then
//!   fetch.
//! - [`propagate`] (finalize): push `dev`, then merge `dev` into each feature
//!   branch and push it, then return to `dev`.
//!
//! A failure stops the operation. Branches already pushed stay pushed.

#[cfg(test)]
mod tests;

use crate::error::Result;
use crate::git::{CommandRunner, GitCommand};
use crate::topology::{self, BranchLayout};
use crate::workflow::{Sequencer, Step};

/// Name given to the single remote a project is bound to.
pub const DEFAULT_REMOTE: &str = "origin";

/// The remote a repository pushes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBinding {
    pub name: String,
    pub url: String,
}

impl RemoteBinding {
    /// A binding under the default remote name.
    pub fn origin(url: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_REMOTE.to_string(),
            url: url.into(),
        }
    }

    /// Push one branch to this remote.
    pub fn push<R: CommandRunner + ?Sized>(
        &self,
        seq: &Sequencer<'_, R>,
        branch: &str,
        force: bool,
    ) -> Result<()> {
        seq.run(
            Step::Push {
                branch: branch.to_string(),
                remote: self.name.clone(),
                force,
            },
            GitCommand::push(&self.name, branch, force),
        )?;
        Ok(())
    }
}

/// Add the remote, force-push the active branch and fetch.
///
/// Returns the branches pushed.
pub fn bind_and_seed<R: CommandRunner + ?Sized>(
    seq: &Sequencer<'_, R>,
    binding: &RemoteBinding,
    active_branch: &str,
) -> Result<Vec<String>> {
    seq.run(
        Step::AddRemote {
            remote: binding.name.clone(),
        },
        GitCommand::remote_add(&binding.name, &binding.url),
    )?;
    binding.push(seq, active_branch, true)?;
    seq.run(
        Step::Fetch {
            remote: binding.name.clone(),
        },
        GitCommand::fetch(&binding.name),
    )?;
    Ok(vec![active_branch.to_string()])
}

/// Push `dev`, then bring every feature branch up to date with it and push.
///
/// Returns the branches pushed, in push order. On failure the error names
/// the step; branches pushed before it are not reported here but remain on
/// the remote.
pub fn propagate<R: CommandRunner + ?Sized>(
    seq: &Sequencer<'_, R>,
    binding: &RemoteBinding,
    layout: &BranchLayout,
) -> Result<Vec<String>> {
    let dev = layout.dev.as_str();
    let mut pushed = Vec::new();

    binding.push(seq, dev, false)?;
    pushed.push(dev.to_string());

    for feature in &layout.features {
        let feature = feature.as_str();
        topology::checkout(seq, feature)?;
        topology::merge_branch(seq, dev, feature)?;
        binding.push(seq, feature, false)?;
        pushed.push(feature.to_string());
    }

    topology::checkout(seq, dev)?;
    Ok(pushed)
}
