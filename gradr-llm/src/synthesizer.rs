//! Review synthesis: prompt, completion, validation

use gradr_core::{CompletionConfig, Credential, Result, ReviewRequestContext, ReviewVerdict};
use tracing::{debug, info, warn};

use crate::client::{CompletionBackend, OpenAiClient};
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::reply::parse_reply;

/// Turns a review context into a verdict through a [`CompletionBackend`]
#[derive(Debug)]
pub struct ReviewSynthesizer<B> {
    backend: B,
}

impl ReviewSynthesizer<OpenAiClient> {
    /// Synthesizer backed by an OpenAI-compatible chat endpoint
    pub fn openai(config: &CompletionConfig) -> Result<Self> {
        Ok(Self::new(OpenAiClient::new(config)?))
    }
}

impl<B: CompletionBackend> ReviewSynthesizer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Ask the model for a review and validate its reply
    ///
    /// Service failures and malformed replies abort the review. Missing keys
    /// in an otherwise valid reply fall back to their defaults.
    pub async fn synthesize(
        &self,
        context: &ReviewRequestContext,
        api_key: &Credential,
    ) -> Result<ReviewVerdict> {
        let prompt = build_prompt(context);

        info!(
            model = self.backend.model(),
            files = context.file_entries().len(),
            level = context.candidate_level(),
            "Requesting review"
        );

        let raw = self.backend.complete(SYSTEM_PROMPT, &prompt, api_key).await?;

        let reply = match parse_reply(&raw) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(model = self.backend.model(), reply_len = raw.len(), "Completion reply rejected");
                return Err(e);
            }
        };

        debug!(?reply, "Completion reply accepted");

        Ok(reply.into_verdict(context.file_names()))
    }
}
