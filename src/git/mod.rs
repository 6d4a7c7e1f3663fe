//! Git plumbing for codegenesis.
//!
//! All git operations go through this module:
//!
//! - [`GitCommand`]: the structured command vocabulary (init, checkout,
//!   create-branch, stage, commit, remote, fetch, push, merge)
//! - [`CommandRunner`]: executes one command in the repository directory
//! - `query`: read-only lookups used for preconditions and reporting
//! - [`exclude_from_git`]: keep codegenesis' own files out of the index
//!
//! Command failures carry the raw diagnostic text; interpreting it is left
//! to the caller.

mod command;
mod exclude;
pub mod query;
mod runner;

pub use command::GitCommand;
pub use exclude::exclude_from_git;
pub use runner::{
    CommandFailure, CommandOutput, CommandRunner, DEFAULT_COMMAND_TIMEOUT, ProcessRunner,
};
