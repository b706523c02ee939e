//! Per-request credentials
//!
//! Tokens are handed to each outbound call explicitly and dropped with the
//! request. Formatting a [`Credential`] never reveals its value.

/// An access token or API key supplied by the caller
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw secret, trimming surrounding whitespace
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into().trim().to_string())
    }

    /// The raw secret, for building an authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_redacts() {
        let cred = Credential::new("ghp_supersecret");
        assert!(!format!("{:?}", cred).contains("supersecret"));
        assert!(!cred.to_string().contains("supersecret"));
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let cred = Credential::new("  sk-abc \n");
        assert_eq!(cred.expose(), "sk-abc");
        assert!(Credential::new("   ").is_empty());
    }
}
