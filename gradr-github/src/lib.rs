//! gradr GitHub - repository tree walking
//!
//! This crate lists every file in a GitHub repository through the REST
//! contents API, one request per directory.

mod client;
mod walker;

pub use client::{classify_status, ContentItem, ContentKind, ContentsSource, GitHubContents};
pub use walker::TreeWalker;
