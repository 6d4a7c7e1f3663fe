//! Config loading, validation, and derived values.

use super::model::Config;
use crate::error::{GenesisError, Result};
use crate::topology::{BranchLayout, BranchName};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// File looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "codegenesis.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Returns `UserError` when the file cannot be read or parsed, or when a
    /// value fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            GenesisError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the explicit config file if given, else `codegenesis.yaml` in
    /// `cwd` if it exists, else defaults.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = cwd.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!(path = %fallback.display(), "using config file");
            return Self::load(fallback);
        }

        Ok(Self::default())
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml reads an empty document as unit, not as an empty map.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| GenesisError::UserError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            GenesisError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - branch names must be valid and pairwise distinct
    /// - `remote` must be non-empty and contain no whitespace
    /// - both timeouts must be positive
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (field, value) in [
            ("main_branch", &self.main_branch),
            ("dev_branch", &self.dev_branch),
            ("staging_branch", &self.staging_branch),
        ] {
            BranchName::new(value).map_err(|e| {
                GenesisError::UserError(format!("config validation failed: {}: {}", field, e))
            })?;
            if !seen.insert(value.trim()) {
                return Err(GenesisError::UserError(format!(
                    "config validation failed: {} '{}' is already used by another branch setting",
                    field, value
                )));
            }
        }

        if self.remote.trim().is_empty() || self.remote.chars().any(char::is_whitespace) {
            return Err(GenesisError::UserError(format!(
                "config validation failed: remote '{}' must be a non-empty name without spaces",
                self.remote
            )));
        }

        if self.command_timeout_secs == 0 {
            return Err(GenesisError::UserError(
                "config validation failed: command_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(GenesisError::UserError(
                "config validation failed: http_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The branch layout for a project with the given feature branches.
    pub fn branch_layout<S: AsRef<str>>(&self, features: &[S]) -> Result<BranchLayout> {
        let features = features
            .iter()
            .map(|f| BranchName::new(f.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        BranchLayout::new(
            BranchName::new(&self.main_branch)?,
            BranchName::new(&self.dev_branch)?,
            BranchName::new(&self.staging_branch)?,
            features,
        )
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
