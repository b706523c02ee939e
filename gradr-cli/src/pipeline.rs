//! The two-stage review pipeline
//!
//! Walk the repository, then ask the model for a verdict. Either both stages
//! succeed or the first failure is returned as classified by its stage.

use gradr_core::{
    Config, Credential, RepositoryReference, Result, ReviewRequestContext, ReviewVerdict,
};
use gradr_github::{ContentsSource, GitHubContents, TreeWalker};
use gradr_llm::{CompletionBackend, OpenAiClient, ReviewSynthesizer};
use serde::Deserialize;
use tracing::info;

/// Inbound review request
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    pub assignment_description: String,
    pub github_repo_url: String,
    /// Junior, Middle, Senior
    pub candidate_level: String,
}

/// Pipeline wired to GitHub and an OpenAI-compatible endpoint
pub type DefaultPipeline = ReviewPipeline<GitHubContents, OpenAiClient>;

/// Tree walker followed by review synthesizer
#[derive(Debug)]
pub struct ReviewPipeline<S, B> {
    walker: TreeWalker<S>,
    synthesizer: ReviewSynthesizer<B>,
}

impl DefaultPipeline {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            TreeWalker::github(&config.github)?,
            ReviewSynthesizer::openai(&config.completion)?,
        ))
    }
}

impl<S: ContentsSource, B: CompletionBackend> ReviewPipeline<S, B> {
    pub fn new(walker: TreeWalker<S>, synthesizer: ReviewSynthesizer<B>) -> Self {
        Self {
            walker,
            synthesizer,
        }
    }

    /// Review one repository with the caller's credentials
    pub async fn run(
        &self,
        input: &ReviewInput,
        github_token: &Credential,
        api_key: &Credential,
    ) -> Result<ReviewVerdict> {
        let reference = RepositoryReference::parse(&input.github_repo_url)?;
        let files = self.walker.walk(&reference, github_token).await?;

        let context = ReviewRequestContext::new(
            input.assignment_description.clone(),
            input.candidate_level.clone(),
            files,
        );

        let verdict = self.synthesizer.synthesize(&context, api_key).await?;

        info!(
            repository = %reference,
            files = verdict.found_files.len(),
            rating = %verdict.rating,
            "Review complete"
        );

        Ok(verdict)
    }
}
