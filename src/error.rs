//! Error types for codegenesis.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::workflow::Step;
use thiserror::Error;

/// Main error type for codegenesis operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum GenesisError {
    /// Invalid input or a violated precondition. Raised before any git
    /// command runs, so nothing on disk has changed.
    #[error("{0}")]
    UserError(String),

    /// A named workflow step failed. `detail` is the raw diagnostic text
    /// captured from the failing command.
    #[error("{step} failed: {detail}")]
    StepFailed { step: Step, detail: String },

    /// A git command failed outside of a named workflow step.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// The project directory is locked by another run.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    /// The remote-repository provider refused a required operation.
    #[error("Remote provider failed: {0}")]
    RemoteError(String),
}

impl GenesisError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenesisError::UserError(_) => exit_codes::USER_ERROR,
            GenesisError::StepFailed { .. } | GenesisError::GitError(_) => exit_codes::GIT_FAILURE,
            GenesisError::LockError(_) => exit_codes::LOCK_FAILURE,
            GenesisError::RemoteError(_) => exit_codes::REMOTE_FAILURE,
        }
    }

    /// The failed step, if this error came out of the workflow.
    pub fn failed_step(&self) -> Option<&Step> {
        match self {
            GenesisError::StepFailed { step, .. } => Some(step),
            _ => None,
        }
    }
}

/// Result type alias for codegenesis operations.
pub type Result<T> = std::result::Result<T, GenesisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = GenesisError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.failed_step().is_none());
    }

    #[test]
    fn step_failure_maps_to_git_exit_code() {
        let err = GenesisError::StepFailed {
            step: Step::CreateBranch {
                branch: "dev".to_string(),
                from: "main".to_string(),
            },
            detail: "fatal: a branch named 'dev' already exists".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::GIT_FAILURE);
        assert_eq!(
            err.to_string(),
            "create branch dev from main failed: fatal: a branch named 'dev' already exists"
        );
        assert!(err.failed_step().is_some());
    }

    #[test]
    fn lock_and_remote_errors_have_own_exit_codes() {
        assert_eq!(
            GenesisError::LockError("held".to_string()).exit_code(),
            exit_codes::LOCK_FAILURE
        );
        assert_eq!(
            GenesisError::RemoteError("403".to_string()).exit_code(),
            exit_codes::REMOTE_FAILURE
        );
    }
}
