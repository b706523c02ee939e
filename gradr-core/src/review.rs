//! Review inputs and verdicts
//!
//! A [`ReviewRequestContext`] is assembled once per request from the walked
//! file list and the caller's description; a [`ReviewVerdict`] is what the
//! caller gets back.

use serde::{Deserialize, Serialize};

use crate::repository::FileEntry;

/// Rating used when the model does not give one
pub const DEFAULT_RATING: &str = "N/A";

/// Conclusion used when the model does not give one
pub const DEFAULT_CONCLUSION: &str = "No conclusion provided.";

/// Everything the synthesizer needs to know about one review
#[derive(Debug, Clone)]
pub struct ReviewRequestContext {
    assignment_description: String,
    candidate_level: String,
    file_entries: Vec<FileEntry>,
}

impl ReviewRequestContext {
    /// Create the context for a single review
    pub fn new(
        assignment_description: impl Into<String>,
        candidate_level: impl Into<String>,
        file_entries: Vec<FileEntry>,
    ) -> Self {
        Self {
            assignment_description: assignment_description.into(),
            candidate_level: candidate_level.into(),
            file_entries,
        }
    }

    pub fn assignment_description(&self) -> &str {
        &self.assignment_description
    }

    /// Free-text level such as Junior, Middle or Senior
    pub fn candidate_level(&self) -> &str {
        &self.candidate_level
    }

    /// Files in discovery order
    pub fn file_entries(&self) -> &[FileEntry] {
        &self.file_entries
    }

    /// Names of every file, in discovery order
    pub fn file_names(&self) -> Vec<String> {
        self.file_entries.iter().map(|f| f.name.clone()).collect()
    }

    /// One `name: path` line per file
    pub fn file_summary(&self) -> String {
        self.file_entries
            .iter()
            .map(|f| format!("{}: {}", f.name, f.path))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Final structured review returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewVerdict {
    /// File names found in the repository, independent of the model's reply
    pub found_files: Vec<String>,
    pub downsides: Vec<String>,
    pub suggestions: Vec<String>,
    pub rating: String,
    pub conclusions: String,
}
