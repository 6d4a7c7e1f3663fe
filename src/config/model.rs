//! Config struct definition and defaults.

use serde::{Deserialize, Serialize};

/// Settings for project creation.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Branch topology
    // =========================================================================
    /// Branch that holds only the empty initial commit (default: "main").
    pub main_branch: String,

    /// Branch that receives the project files (default: "dev").
    pub dev_branch: String,

    /// Empty release branch forked from main (default: "staging").
    pub staging_branch: String,

    /// Name the remote is bound under (default: "origin").
    pub remote: String,

    // =========================================================================
    // Execution
    // =========================================================================
    /// Seconds before a single git command is killed.
    pub command_timeout_secs: u64,

    /// Email for the commits codegenesis makes. When unset, git's own
    /// configuration decides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_user_email: Option<String>,

    // =========================================================================
    // Boilerplate
    // =========================================================================
    /// License key used when `--license` is not given.
    pub default_license: String,

    /// Languages used for `.gitignore` when `--language` is not given.
    pub default_languages: Vec<String>,

    // =========================================================================
    // GitHub
    // =========================================================================
    /// Base URL of the GitHub REST API.
    pub github_api_url: String,

    /// Seconds before a GitHub API request is abandoned.
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_branch: "main".to_string(),
            dev_branch: "dev".to_string(),
            staging_branch: "staging".to_string(),
            remote: crate::sync::DEFAULT_REMOTE.to_string(),
            command_timeout_secs: 60,
            git_user_email: None,
            default_license: "mit".to_string(),
            default_languages: Vec::new(),
            github_api_url: "https://api.github.com".to_string(),
            http_timeout_secs: 10,
        }
    }
}
