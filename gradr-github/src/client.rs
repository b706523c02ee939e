//! GitHub contents API client using reqwest
//!
//! One call lists one directory. The client holds no credential; every call
//! takes the caller's token explicitly.

use async_trait::async_trait;
use gradr_core::{Credential, Error, GitHubConfig, RepositoryReference, Result};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Media type for the structured JSON contents format
const CONTENTS_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Maximum length of a remote error body carried in an error
const ERROR_BODY_PREVIEW_LEN: usize = 2000;

/// Kind of an entry in a directory listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    File,
    Dir,
    /// symlink, submodule, or anything GitHub adds later
    #[serde(other)]
    Other,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

impl ContentItem {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: ContentKind::File,
        }
    }

    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: ContentKind::Dir,
        }
    }
}

/// Source of directory listings for a repository
#[async_trait]
pub trait ContentsSource: Send + Sync {
    /// List the directory at `path` (empty for the root)
    async fn list(
        &self,
        reference: &RepositoryReference,
        path: &str,
        token: &Credential,
    ) -> Result<Vec<ContentItem>>;
}

/// Map a non-success contents response onto the error taxonomy
///
/// 404 means the repository (or path) is absent, 403 is GitHub's throttling
/// signal, anything else is a generic API failure.
pub fn classify_status(reference: &RepositoryReference, status: u16, body: &str) -> Error {
    match status {
        404 => Error::RepositoryNotFound {
            owner: reference.owner.clone(),
            repo: reference.repo.clone(),
        },
        403 => Error::RepositoryRateLimited,
        _ => Error::RepositoryApi {
            status: Some(status),
            message: preview(body),
        },
    }
}

fn preview(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "Failed to fetch repository contents.".to_string();
    }
    body.chars().take(ERROR_BODY_PREVIEW_LEN).collect()
}

/// GitHub REST contents API
pub struct GitHubContents {
    http: reqwest::Client,
    api_url: Url,
    timeout: Duration,
}

impl GitHubContents {
    /// Create a client from configuration
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| Error::Config(format!("Invalid GitHub API URL {}: {}", config.api_url, e)))?;

        if api_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "GitHub API URL cannot be used as a base: {}",
                config.api_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url,
            timeout: config.timeout,
        })
    }

    /// URL of `GET /repos/{owner}/{repo}/contents/{path}`
    pub fn contents_url(&self, reference: &RepositoryReference, path: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", reference.owner.as_str(), reference.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }
}

impl std::fmt::Debug for GitHubContents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubContents")
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ContentsSource for GitHubContents {
    async fn list(
        &self,
        reference: &RepositoryReference,
        path: &str,
        token: &Credential,
    ) -> Result<Vec<ContentItem>> {
        let url = self.contents_url(reference, path);
        debug!(owner = %reference.owner, repo = %reference.repo, path, "Listing directory");

        let response = self
            .http
            .get(url)
            .bearer_auth(token.expose())
            .header(ACCEPT, CONTENTS_MEDIA_TYPE)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::RepositoryApi {
                status: None,
                message: format!("Contents request failed: {}", e.without_url()),
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            warn!(
                owner = %reference.owner,
                repo = %reference.repo,
                path,
                status = status.as_u16(),
                "Contents listing failed"
            );
            return Err(classify_status(reference, status.as_u16(), &body));
        }

        let body = response.text().await.map_err(|e| Error::RepositoryApi {
            status: None,
            message: format!("Failed to read contents response: {}", e.without_url()),
        })?;

        serde_json::from_str(&body).map_err(|e| {
            Error::Internal(format!(
                "Unexpected contents listing for '{}' in {}: {}",
                path, reference, e
            ))
        })
    }
}
