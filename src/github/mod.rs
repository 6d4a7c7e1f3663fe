//! Remote repository provider.
//!
//! [`RemoteProvider`] is everything the rest of the crate needs from a
//! hosting service: template listings and content for the boilerplate
//! files, and creating, deleting and probing repositories. [`GitHubClient`]
//! implements it against the GitHub REST API. [`provision`] picks the
//! repository name and creates it before the workflow runs.
//!
//! Provider operations never fail loudly. Missing credentials or a failed
//! request produce the fallback value, and callers degrade to local-only.

mod client;
mod provision;
mod types;


pub use client::GitHubClient;
pub use provision::{Provisioned, RepoRequest, provision, validate_repo_name};
pub use types::LicenseTemplate;

/// Operations on a repository host, all scoped to one owner account.
pub trait RemoteProvider {
    /// Names accepted by [`RemoteProvider::gitignore_content`].
    fn gitignore_templates(&self) -> Vec<String>;

    fn license_templates(&self) -> Vec<LicenseTemplate>;

    /// License text with `[year]`/`[fullname]` placeholders left in.
    fn license_content(&self, key: &str) -> Option<String>;

    fn gitignore_content(&self, language: &str) -> Option<String>;

    fn repository_exists(&self, name: &str) -> bool;

    /// Returns whether the repository was deleted.
    fn delete_repository(&self, name: &str) -> bool;

    /// Create a repository and return its clone URL.
    fn create_repository(
        &self,
        name: &str,
        default_branch: &str,
        private: bool,
        license_key: Option<&str>,
    ) -> Option<String>;
}
