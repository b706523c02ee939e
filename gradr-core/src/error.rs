//! Error types for gradr
//!
//! Every failure the review pipeline can surface maps to exactly one variant of
//! [`Error`]. Components classify failures where they observe them and the
//! pipeline propagates them untouched.

use thiserror::Error;

/// Result type alias for gradr operations
pub type Result<T> = std::result::Result<T, Error>;

/// Flavour of a classified completion-service failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFailure {
    /// The service asked us to slow down
    Throttled,
    /// Any other failure the service reported
    Generic,
}

/// Error type for gradr operations
#[derive(Error, Debug)]
pub enum Error {
    /// The repository reference could not be parsed
    #[error("Invalid repository reference: {0}")]
    RepositoryResolution(String),

    /// The repository host reported the repository (or a path in it) missing
    #[error("Repository {owner}/{repo} not found")]
    RepositoryNotFound { owner: String, repo: String },

    /// The repository host is throttling us
    #[error("GitHub rate limit exceeded")]
    RepositoryRateLimited,

    /// Any other non-success answer from the repository host
    #[error("GitHub API error ({}): {message}", status_label(.status))]
    RepositoryApi {
        /// Remote HTTP status, `None` when the request never got an answer
        status: Option<u16>,
        message: String,
    },

    /// The completion service reported a failure
    #[error("Completion service error: {message}")]
    CompletionService {
        failure: ServiceFailure,
        message: String,
    },

    /// The completion service answered, but not with the JSON object we asked for
    #[error("Malformed completion reply: {0}")]
    MalformedCompletion(String),

    /// Anything that does not fit a classified bucket
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(s) => s.to_string(),
        None => "no status".to_string(),
    }
}

impl Error {
    /// Stable machine-readable code for the error
    pub fn kind(&self) -> &'static str {
        match self {
            Error::RepositoryResolution(_) => "repository_resolution",
            Error::RepositoryNotFound { .. } => "repository_not_found",
            Error::RepositoryRateLimited => "repository_rate_limited",
            Error::RepositoryApi { .. } => "repository_api",
            Error::CompletionService {
                failure: ServiceFailure::Throttled,
                ..
            } => "completion_rate_limited",
            Error::CompletionService {
                failure: ServiceFailure::Generic,
                ..
            } => "completion_service",
            Error::MalformedCompletion(_) => "malformed_completion",
            Error::Internal(_) | Error::Io(_) | Error::Config(_) => "internal",
        }
    }

    /// HTTP status the error is surfaced with
    pub fn http_status(&self) -> u16 {
        match self {
            Error::RepositoryResolution(_) => 400,
            Error::RepositoryNotFound { .. } => 404,
            Error::RepositoryRateLimited => 429,
            Error::RepositoryApi { status, .. } => match status {
                Some(s) if (400..600).contains(s) => *s,
                _ => 502,
            },
            Error::CompletionService {
                failure: ServiceFailure::Throttled,
                ..
            } => 429,
            Error::CompletionService { .. } | Error::MalformedCompletion(_) => 502,
            Error::Internal(_) | Error::Io(_) | Error::Config(_) => 500,
        }
    }

    /// Message that is safe to hand back to a caller
    ///
    /// Internal failures never leak their detail; log the full error instead.
    pub fn public_detail(&self) -> String {
        match self {
            Error::RepositoryResolution(_) => "Invalid GitHub repository URL.".to_string(),
            Error::RepositoryNotFound { .. } => "Repository not found.".to_string(),
            Error::RepositoryRateLimited => "GitHub rate limit exceeded.".to_string(),
            Error::RepositoryApi { message, .. } => format!("GitHub API error: {}", message),
            Error::CompletionService {
                failure: ServiceFailure::Throttled,
                ..
            } => "OpenAI rate limit exceeded.".to_string(),
            Error::CompletionService { .. } => "OpenAI API error.".to_string(),
            Error::MalformedCompletion(_) => {
                "The response from OpenAI was not in the expected JSON format.".to_string()
            }
            Error::Internal(_) | Error::Io(_) | Error::Config(_) => {
                "An unexpected error occurred. Please try again later.".to_string()
            }
        }
    }

    /// Whether the error is in the unclassified bucket
    pub fn is_internal(&self) -> bool {
        self.kind() == "internal"
    }
}
