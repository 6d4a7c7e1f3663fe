//! GitHub credentials.

use std::fmt;

/// Environment variable holding the personal access token.
pub const TOKEN_VAR: &str = "GITHUB_PAT";

/// Environment variable holding the account that owns created repositories.
pub const OWNER_VAR: &str = "GITHUB_USERNAME";

/// Token and owner for the GitHub API. Both are required for any call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub owner: Option<String>,
}

impl Credentials {
    pub fn new(token: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            owner: Some(owner.into()),
        }
    }

    /// Read credentials from the environment, loading `.env` first if the
    /// current directory has one. Blank values count as missing.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded environment from .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
        }

        Self {
            token: non_blank_var(TOKEN_VAR),
            owner: non_blank_var(OWNER_VAR),
        }
    }

    /// Token and owner, if both are present.
    pub fn pair(&self) -> Option<(&str, &str)> {
        Some((self.token.as_deref()?, self.owner.as_deref()?))
    }

    pub fn is_complete(&self) -> bool {
        self.pair().is_some()
    }
}

// Keep the token out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .finish()
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
