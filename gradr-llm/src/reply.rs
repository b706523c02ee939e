//! Validation of the model's review reply
//!
//! The reply is untrusted text. It either validates as a JSON object whose
//! known keys have the right shapes, or the whole review fails with
//! [`Error::MalformedCompletion`]. Nothing is repaired.

use gradr_core::{Error, Result, ReviewVerdict, DEFAULT_CONCLUSION, DEFAULT_RATING};
use serde::Deserialize;
use serde_json::Value;

/// Rating as the model sent it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Text(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Text(s) => f.write_str(s),
            Rating::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A validated reply; absent or `null` keys are `None`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewReply {
    pub downsides: Option<Vec<String>>,
    pub suggestions: Option<Vec<String>>,
    pub rating: Option<Rating>,
    pub conclusion: Option<String>,
}

impl ReviewReply {
    /// Build the verdict, filling absent fields with their defaults
    ///
    /// `found_files` always comes from the walk, never from the reply. The
    /// reply's singular `conclusion` becomes the verdict's `conclusions`.
    pub fn into_verdict(self, found_files: Vec<String>) -> ReviewVerdict {
        ReviewVerdict {
            found_files,
            downsides: self.downsides.unwrap_or_default(),
            suggestions: self.suggestions.unwrap_or_default(),
            rating: self
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| DEFAULT_RATING.to_string()),
            conclusions: self
                .conclusion
                .unwrap_or_else(|| DEFAULT_CONCLUSION.to_string()),
        }
    }
}

/// Validate raw reply text
pub fn parse_reply(raw: &str) -> Result<ReviewReply> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::MalformedCompletion(format!("reply is not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(Error::MalformedCompletion(
            "reply is JSON but not an object".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::MalformedCompletion(format!("reply has unexpected shape: {}", e)))
}
