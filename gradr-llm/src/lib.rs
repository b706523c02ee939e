//! gradr LLM - review synthesis over a chat-completion endpoint
//!
//! Builds the review prompt from a repository's file list, sends it to an
//! OpenAI-compatible endpoint and validates the reply into a verdict.

mod client;
mod prompt;
mod reply;
mod synthesizer;

pub use client::{classify_status, CompletionBackend, OpenAiClient};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use reply::{parse_reply, Rating, ReviewReply};
pub use synthesizer::ReviewSynthesizer;
