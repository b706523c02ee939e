//! gradr core - shared types for the repository reviewer
//!
//! This crate holds the data model that flows through the review pipeline,
//! the error taxonomy every stage classifies into, and configuration.

pub mod config;
pub mod credential;
pub mod error;
pub mod repository;
pub mod review;
pub mod secrets;

pub use config::{CompletionConfig, Config, ConfigOverrides, GitHubConfig, ServerConfig};
pub use credential::Credential;
pub use error::{Error, Result, ServiceFailure};
pub use repository::{FileEntry, RepositoryReference};
pub use review::{ReviewRequestContext, ReviewVerdict, DEFAULT_CONCLUSION, DEFAULT_RATING};
pub use secrets::Secrets;
