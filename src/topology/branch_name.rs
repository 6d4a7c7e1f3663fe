//! Validated branch names.

use crate::error::{GenesisError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Characters and sequences git refuses in a ref name, plus whitespace.
static FORBIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\x00-\x1f\x7f~^:?*\[\\]|\.\.|@\{|//").expect("Invalid branch name regex")
});

/// A branch name that git will accept and that contains no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    /// Validate and wrap a branch name.
    ///
    /// Surrounding whitespace is trimmed first; whitespace inside the name is
    /// rejected.
    pub fn new(raw: &str) -> Result<Self> {
        let name = raw.trim();
        let invalid = |reason: &str| {
            Err(GenesisError::UserError(format!(
                "invalid branch name '{}': {}",
                raw, reason
            )))
        };

        if name.is_empty() {
            return invalid("name is empty");
        }
        if let Some(found) = FORBIDDEN.find(name) {
            let what = found.as_str();
            return if what.trim().is_empty() {
                invalid("branch names cannot contain spaces")
            } else {
                invalid(&format!("contains '{}'", what.escape_default()))
            };
        }
        if name == "@" {
            return invalid("'@' is reserved");
        }
        if name.starts_with('-') || name.starts_with('/') {
            return invalid("must not start with '-' or '/'");
        }
        if name.ends_with('/') || name.ends_with('.') || name.ends_with(".lock") {
            return invalid("must not end with '/', '.' or '.lock'");
        }
        if name.split('/').any(|part| part.starts_with('.')) {
            return invalid("path components must not start with '.'");
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_names() {
        for name in ["main", "dev", "feature-x", "feature/login", "release_1.2", "fix-42"] {
            assert_eq!(BranchName::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(BranchName::new("  feature-x \n").unwrap().as_str(), "feature-x");
    }

    #[test]
    fn test_rejects_embedded_whitespace() {
        let err = BranchName::new("feature x").unwrap_err();
        assert!(matches!(err, GenesisError::UserError(_)));
        assert!(err.to_string().contains("cannot contain spaces"));

        assert!(BranchName::new("feature\tx").is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(BranchName::new("").is_err());
        assert!(BranchName::new("   ").is_err());
    }

    #[test]
    fn test_rejects_git_ref_violations() {
        for name in [
            "a..b", "a~1", "a^", "a:b", "a?", "a*", "a[b", "a\\b", "a@{1}", "@", "-flag",
            "/lead", "trail/", "dot.", "x.lock", ".hidden", "a/.b", "a//b",
        ] {
            assert!(BranchName::new(name).is_err(), "{} should be rejected", name);
        }
    }
}
