//! Command implementations for codegenesis.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod new;
mod templates;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::New(args) => new::cmd_new(args),
        Command::Templates(args) => templates::cmd_templates(args),
    }
}
