//! Choosing a repository name and creating the repository.

use super::RemoteProvider;
use crate::error::{GenesisError, Result};
use regex::Regex;
use std::sync::LazyLock;

static REPO_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("Invalid repository name regex"));

/// What to create, and which names may be used for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRequest {
    /// Names to try, in order. The first is the preferred name.
    pub candidates: Vec<String>,
    /// Delete an existing repository instead of moving to the next name.
    pub overwrite_existing: bool,
    pub private: bool,
    pub license_key: Option<String>,
    pub default_branch: String,
}

/// Result of provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned {
    Created {
        name: String,
        url: String,
        /// An existing repository of the same name was deleted first.
        replaced: bool,
    },
    /// No repository; the project stays local.
    LocalOnly { reason: String },
}

impl Provisioned {
    pub fn url(&self) -> Option<&str> {
        match self {
            Provisioned::Created { url, .. } => Some(url),
            Provisioned::LocalOnly { .. } => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Provisioned::Created { name, .. } => Some(name),
            Provisioned::LocalOnly { .. } => None,
        }
    }
}

/// Check a repository name against what GitHub accepts.
pub fn validate_repo_name(name: &str) -> Result<()> {
    if name == "." || name == ".." || !REPO_NAME.is_match(name) {
        return Err(GenesisError::UserError(format!(
            "invalid repository name '{}': use letters, digits, '.', '-' and '_' only",
            name
        )));
    }
    Ok(())
}

/// Resolve a usable name and create the repository.
///
/// For each candidate: an unused name is created; an existing one is
/// deleted and recreated when `overwrite_existing` is set, otherwise the next
/// candidate is tried. Running out of candidates, or a failed creation,
/// degrades to [`Provisioned::LocalOnly`]. A failed deletion is a
/// `RemoteError`: the caller asked for that repository to be replaced.
pub fn provision<P: RemoteProvider + ?Sized>(
    provider: &P,
    request: &RepoRequest,
) -> Result<Provisioned> {
    for name in &request.candidates {
        validate_repo_name(name)?;
    }

    for name in &request.candidates {
        let mut replaced = false;

        if provider.repository_exists(name) {
            if !request.overwrite_existing {
                tracing::warn!(repo = %name, "repository already exists; trying the next name");
                continue;
            }
            if !provider.delete_repository(name) {
                return Err(GenesisError::RemoteError(format!(
                    "repository '{}' exists and could not be deleted.\n\n\
                     Check that the token has the delete_repo scope, or pick another name with --repo-name.",
                    name
                )));
            }
            replaced = true;
        }

        let Some(url) = provider.create_repository(
            name,
            &request.default_branch,
            request.private,
            request.license_key.as_deref(),
        ) else {
            return Ok(Provisioned::LocalOnly {
                reason: format!("failed to create repository '{}'", name),
            });
        };

        return Ok(Provisioned::Created {
            name: name.clone(),
            url,
            replaced,
        });
    }

    Ok(Provisioned::LocalOnly {
        reason: match request.candidates.as_slice() {
            [] => "no repository name given".to_string(),
            [only] => format!("repository '{}' already exists", only),
            names => format!("repositories {} already exist", names.join(", ")),
        },
    })
}
