//! GitHub REST client.
//!
//! Every operation needs both a token and an owner. When either is missing,
//! or a request fails for any reason, the operation logs and returns its
//! fallback value (empty list, `None`, `false`) instead of an error.

use super::RemoteProvider;
use super::types::{
    CreateRepository, CreatedRepository, GitignoreTemplate, LicenseDetail, LicenseTemplate,
};
use crate::config::{Config, Credentials};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use regex::Regex;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use std::time::Duration;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const AGENT: &str = "codegenesis";

/// Template names and license keys as GitHub spells them ("C++",
/// "Objective-C", "apache-2.0"). Anything else never reaches a URL path.
static TEMPLATE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9+._-]*$").expect("Invalid template name regex")
});

/// Failure of a single request. Never leaves the client.
#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub struct GitHubClient {
    http: Client,
    api_url: String,
    credentials: Credentials,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>, credentials: Credentials, timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));

        // Building only fails when the TLS backend cannot initialize; fall
        // back to a default client, which then fails per request.
        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to configure HTTP client; using defaults");
                Client::new()
            });

        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &Config, credentials: Credentials) -> Self {
        Self::new(&config.github_api_url, credentials, config.http_timeout())
    }

    /// Whether calls can be made at all.
    pub fn is_available(&self) -> bool {
        self.credentials.is_complete()
    }

    fn owner(&self) -> Option<&str> {
        self.credentials.pair().map(|(_, owner)| owner)
    }

    /// An authenticated request, or `None` (logged) without credentials.
    fn request(&self, method: Method, path: &str, purpose: &str) -> Option<RequestBuilder> {
        let Some((token, _)) = self.credentials.pair() else {
            tracing::warn!("cannot {}: GitHub credentials are not set", purpose);
            return None;
        };
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(%method, %url, "GitHub request");
        Some(
            self.http
                .request(method, url)
                .header(AUTHORIZATION, format!("Bearer {}", token)),
        )
    }

    fn send(request: RequestBuilder) -> Result<Response, RequestError> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(RequestError::Status { status, body })
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, purpose: &str) -> Option<T> {
        let request = self.request(Method::GET, path, purpose)?;
        match Self::send(request).and_then(|r| r.json::<T>().map_err(RequestError::from)) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(error = %e, "failed to {}", purpose);
                None
            }
        }
    }
}

impl RemoteProvider for GitHubClient {
    fn gitignore_templates(&self) -> Vec<String> {
        let templates: Vec<String> = self
            .get_json("/gitignore/templates", "list .gitignore templates")
            .unwrap_or_default();
        tracing::info!(count = templates.len(), "fetched .gitignore templates");
        templates
    }

    fn license_templates(&self) -> Vec<LicenseTemplate> {
        let licenses: Vec<LicenseTemplate> = self
            .get_json("/licenses", "list license templates")
            .unwrap_or_default();
        tracing::info!(count = licenses.len(), "fetched license templates");
        licenses
    }

    fn license_content(&self, key: &str) -> Option<String> {
        if !TEMPLATE_NAME.is_match(key) {
            tracing::warn!(license = key, "not a license key; skipping lookup");
            return None;
        }
        self.get_json::<LicenseDetail>(
            &format!("/licenses/{}", key),
            &format!("fetch license '{}'", key),
        )
        .map(|detail| detail.body)
    }

    fn gitignore_content(&self, language: &str) -> Option<String> {
        if !TEMPLATE_NAME.is_match(language) {
            tracing::warn!(language, "not a .gitignore template name; skipping lookup");
            return None;
        }
        self.get_json::<GitignoreTemplate>(
            &format!("/gitignore/templates/{}", language),
            &format!("fetch {} .gitignore template", language),
        )
        .map(|template| template.source)
    }

    fn repository_exists(&self, name: &str) -> bool {
        let purpose = format!("check repository '{}'", name);
        let Some(owner) = self.owner() else {
            tracing::warn!("cannot {}: GitHub credentials are not set", purpose);
            return false;
        };
        let Some(request) =
            self.request(Method::GET, &format!("/repos/{}/{}", owner, name), &purpose)
        else {
            return false;
        };
        match request.send() {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::error!(error = %e, "failed to {}", purpose);
                false
            }
        }
    }

    fn delete_repository(&self, name: &str) -> bool {
        let purpose = format!("delete repository '{}'", name);
        let Some(owner) = self.owner() else {
            tracing::warn!("cannot {}: GitHub credentials are not set", purpose);
            return false;
        };
        let Some(request) =
            self.request(Method::DELETE, &format!("/repos/{}/{}", owner, name), &purpose)
        else {
            return false;
        };
        match Self::send(request) {
            Ok(_) => {
                tracing::info!(repo = name, "deleted GitHub repository");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to {}", purpose);
                false
            }
        }
    }

    fn create_repository(
        &self,
        name: &str,
        default_branch: &str,
        private: bool,
        license_key: Option<&str>,
    ) -> Option<String> {
        let purpose = format!("create repository '{}'", name);
        let request = self.request(Method::POST, "/user/repos", &purpose)?;
        let owner = self.owner()?.to_string();
        let body = CreateRepository {
            name,
            private,
            auto_init: true,
            default_branch,
            license_template: license_key,
        };

        match Self::send(request.json(&body)) {
            Ok(response) => {
                let created = response.json::<CreatedRepository>().ok();
                let url = created
                    .and_then(|c| c.clone_url)
                    .unwrap_or_else(|| format!("https://github.com/{}/{}.git", owner, name));
                tracing::info!(repo = name, %url, "created GitHub repository");
                Some(url)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to {}", purpose);
                None
            }
        }
    }
}
