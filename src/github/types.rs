//! Request and response bodies for the GitHub REST API.

use serde::{Deserialize, Serialize};

/// A license GitHub can generate, as listed by `GET /licenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseTemplate {
    pub key: String,
    pub name: String,
}

/// `GET /licenses/{key}`; only the text is used.
#[derive(Debug, Deserialize)]
pub(crate) struct LicenseDetail {
    pub body: String,
}

/// `GET /gitignore/templates/{name}`; only the text is used.
#[derive(Debug, Deserialize)]
pub(crate) struct GitignoreTemplate {
    pub source: String,
}

/// Body of `POST /user/repos`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRepository<'a> {
    pub name: &'a str,
    pub private: bool,
    /// GitHub seeds the repository with a first commit; it is replaced by the
    /// force-push of the local `main`.
    pub auto_init: bool,
    pub default_branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_template: Option<&'a str>,
}

/// Fields of a created repository the client reads.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedRepository {
    #[serde(default)]
    pub clone_url: Option<String>,
}
