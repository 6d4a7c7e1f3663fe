//! Filesystem helpers.
//!
//! Boilerplate files are written with [`write_if_absent`], which never
//! replaces an existing file. Files codegenesis owns and rewrites (such as
//! git's exclude list) go through [`atomic_write_file`].

mod atomic;
mod create;

pub use atomic::atomic_write_file;
pub use create::{WriteOutcome, ensure_dir, write_if_absent};
