//! Configuration model for codegenesis.
//!
//! Settings come from a YAML file (`--config <path>`, or `codegenesis.yaml`
//! in the current directory when present). Unknown fields are ignored and
//! every field has a default, so an empty or missing file is valid.
//!
//! GitHub credentials are not part of the file. They are read from the
//! environment (after loading `.env`) into [`Credentials`] and handed to the
//! provider explicitly.

mod credentials;
mod model;
mod operations;


pub use credentials::{Credentials, OWNER_VAR, TOKEN_VAR};
pub use model::Config;
pub use operations::DEFAULT_CONFIG_FILE;
