//! Exit code constants for the codegenesis CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, failed precondition)
//! - 3: Git operation failure
//! - 4: Lock acquisition failure
//! - 5: Remote provider failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid branch names, wrong workflow phase.
pub const USER_ERROR: i32 = 1;

/// Git operation failure: a step of setup or finalize exited non-zero.
pub const GIT_FAILURE: i32 = 3;

/// Lock acquisition failure: another run holds the project directory.
pub const LOCK_FAILURE: i32 = 4;

/// Remote provider failure: the hosting API refused a required operation.
pub const REMOTE_FAILURE: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, GIT_FAILURE, LOCK_FAILURE, REMOTE_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }
}
