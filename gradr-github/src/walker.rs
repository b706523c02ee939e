//! Recursive enumeration of a repository's files
//!
//! The walk keeps an explicit stack of partially consumed listings instead of
//! recursing, so arbitrarily deep trees cannot exhaust the call stack. A
//! directory's children are fully resolved before its next sibling is looked
//! at, which yields the same depth-first order a recursive walk would.

use gradr_core::{Credential, Error, FileEntry, GitHubConfig, RepositoryReference, Result};
use tracing::{debug, info};

use crate::client::{ContentKind, ContentsSource, GitHubContents};

/// Walks a repository tree through a [`ContentsSource`]
#[derive(Debug)]
pub struct TreeWalker<S> {
    source: S,
}

impl TreeWalker<GitHubContents> {
    /// Walker backed by the GitHub REST API
    pub fn github(config: &GitHubConfig) -> Result<Self> {
        Ok(Self::new(GitHubContents::new(config)?))
    }
}

impl<S: ContentsSource> TreeWalker<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// List every regular file reachable from the repository root
    ///
    /// One listing call is made per directory, none per file. Any failed
    /// listing aborts the walk; no partial result is returned.
    pub async fn walk(
        &self,
        reference: &RepositoryReference,
        token: &Credential,
    ) -> Result<Vec<FileEntry>> {
        info!(owner = %reference.owner, repo = %reference.repo, "Walking repository tree");

        let root = self.source.list(reference, "", token).await?;
        let mut listings = 1usize;
        let mut files = Vec::new();
        let mut pending = vec![root.into_iter()];

        while let Some(listing) = pending.last_mut() {
            let Some(item) = listing.next() else {
                pending.pop();
                continue;
            };

            match item.kind {
                ContentKind::File => files.push(FileEntry::new(item.name, item.path)),
                ContentKind::Dir => {
                    if item.path.is_empty() {
                        return Err(Error::Internal(format!(
                            "Directory '{}' in {} has an empty path",
                            item.name, reference
                        )));
                    }
                    let children = self.source.list(reference, &item.path, token).await?;
                    listings += 1;
                    pending.push(children.into_iter());
                }
                ContentKind::Other => {
                    debug!(path = %item.path, "Skipping entry that is neither file nor directory");
                }
            }
        }

        info!(
            owner = %reference.owner,
            repo = %reference.repo,
            files = files.len(),
            listings,
            "Repository walk complete"
        );

        Ok(files)
    }
}
