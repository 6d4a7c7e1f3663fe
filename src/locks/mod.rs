//! Workspace lock.
//!
//! Two runs must never drive git in the same project directory at once.
//! Each run holds `.codegenesis.lock` in the project directory for its whole
//! duration.
//!
//! # Lock File
//!
//! The file is created with **create_new** semantics (exclusive create), so
//! only one process can hold it. It contains JSON metadata:
//! - `owner`: `user@HOST`
//! - `pid`: the process ID
//! - `created_at`: RFC3339 timestamp
//! - `action`: what the holder is doing
//!
//! The file lives in the working tree, so once the repository exists it is
//! listed in `.git/info/exclude` and never staged.
//!
//! # RAII Guard
//!
//! [`LockGuard`] deletes the file when dropped. A failed deletion is logged,
//! never a panic.

mod guard;
mod metadata;
mod operations;


pub use guard::LockGuard;
pub use metadata::LockMetadata;
pub(crate) use metadata::owner_string;
pub use operations::{LOCK_FILE, acquire_workspace_lock, read_holder};
