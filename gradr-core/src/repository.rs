//! Repository references and file entries

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Owner and name of a remote repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryReference {
    pub owner: String,
    pub repo: String,
}

impl RepositoryReference {
    /// Create a reference from its two parts
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse a reference from the last two path segments of a URL or path
    ///
    /// Supports formats:
    /// - https://github.com/owner/repo (trailing slash, query and fragment ignored)
    /// - https://github.com/owner/repo.git
    /// - git@github.com:owner/repo.git
    /// - owner/repo
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim().trim_end_matches('/');

        let path = match url::Url::parse(trimmed) {
            Ok(url) if url.has_host() => url.path().to_string(),
            // scp-style remote, the path follows the colon
            _ => match trimmed.split_once(':') {
                Some((_, path)) if !trimmed.contains("://") => path.to_string(),
                _ => trimmed.to_string(),
            },
        };

        let mut segments = path.trim_end_matches('/').rsplit('/');
        let repo = segments.next().unwrap_or("").trim_end_matches(".git");
        let owner = segments.next().unwrap_or("");

        if owner.is_empty() || repo.is_empty() {
            return Err(Error::RepositoryResolution(format!(
                "'{}' does not end in owner/repo",
                input
            )));
        }

        Ok(Self::new(owner, repo))
    }
}

impl std::fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl std::str::FromStr for RepositoryReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A regular file found in a repository tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File name without directories
    pub name: String,
    /// Path relative to the repository root
    pub path: String,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_url() {
        let reference = RepositoryReference::parse("https://github.com/owner/repo").unwrap();
        assert_eq!(reference, RepositoryReference::new("owner", "repo"));
    }

    #[test]
    fn test_trailing_slash_is_equivalent() {
        let a = RepositoryReference::parse("https://host/acme/widgets").unwrap();
        let b = RepositoryReference::parse("https://host/acme/widgets/").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "acme/widgets");
    }

    #[test]
    fn test_uses_last_two_segments() {
        let reference =
            RepositoryReference::parse("https://git.example.com/group/sub/owner/repo").unwrap();
        assert_eq!(reference, RepositoryReference::new("owner", "repo"));
    }

    #[test]
    fn test_parse_shorthand_and_git_suffix() {
        assert_eq!(
            RepositoryReference::parse("owner/repo").unwrap(),
            RepositoryReference::new("owner", "repo")
        );
        assert_eq!(
            RepositoryReference::parse("https://github.com/owner/repo.git").unwrap(),
            RepositoryReference::new("owner", "repo")
        );
    }

    #[test]
    fn test_parse_scp_style_remote() {
        assert_eq!(
            RepositoryReference::parse("git@github.com:owner/repo.git").unwrap(),
            RepositoryReference::new("owner", "repo")
        );
        assert_eq!(
            RepositoryReference::parse("git@github.com:owner/repo").unwrap(),
            RepositoryReference::new("owner", "repo")
        );
        assert!(matches!(
            RepositoryReference::parse("git@github.com:repo.git"),
            Err(Error::RepositoryResolution(_))
        ));
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let reference =
            RepositoryReference::parse("https://github.com/owner/repo?tab=readme#top").unwrap();
        assert_eq!(reference, RepositoryReference::new("owner", "repo"));
    }

    #[test]
    fn test_too_few_segments_rejected() {
        for input in ["https://host/acme", "https://host/", "acme", "", "/repo"] {
            let err = RepositoryReference::parse(input).unwrap_err();
            assert!(
                matches!(err, Error::RepositoryResolution(_)),
                "expected resolution error for {:?}",
                input
            );
        }
    }
}
