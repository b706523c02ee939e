//! Chat-completion client for OpenAI-compatible endpoints
//!
//! The client holds no API key; each completion takes one explicitly.

use std::time::Duration;

use async_trait::async_trait;
use gradr_core::{CompletionConfig, Credential, Error, Result, ServiceFailure};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

/// Maximum length of a service error body carried in an error
const ERROR_BODY_PREVIEW_LEN: usize = 2000;

/// Something that turns a system and user turn into reply text
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Model identifier, for logging
    fn model(&self) -> &str;

    /// Send one system turn and one user turn, returning the first choice's text
    async fn complete(&self, system: &str, user: &str, api_key: &Credential) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    message: String,
}

/// Map a non-success completion response onto the error taxonomy
///
/// 429 is the service's throttling signal; every other status is a generic
/// service failure carrying the service's own message when it sent one.
pub fn classify_status(status: u16, body: &str) -> Error {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => body.trim().chars().take(ERROR_BODY_PREVIEW_LEN).collect(),
    };

    let failure = if status == 429 {
        ServiceFailure::Throttled
    } else {
        ServiceFailure::Generic
    };

    Error::CompletionService { failure, message }
}

/// Client for `POST {api_url}/chat/completions`
pub struct OpenAiClient {
    http: reqwest::Client,
    api_url: Url,
    model: String,
    timeout: Duration,
}

impl OpenAiClient {
    /// Create a client from configuration
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            Error::Config(format!("Invalid completion API URL {}: {}", config.api_url, e))
        })?;

        if api_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Completion API URL cannot be used as a base: {}",
                config.api_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url,
            model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    fn completions_url(&self) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["chat", "completions"]);
        }
        url
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_url", &self.api_url.as_str())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, user: &str, api_key: &Credential) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        debug!(model = %self.model, prompt_len = user.len(), "Sending chat completion");

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(api_key.expose())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::CompletionService {
                failure: ServiceFailure::Generic,
                message: format!("Completion request failed: {}", e.without_url()),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error::CompletionService {
            failure: ServiceFailure::Generic,
            message: format!("Failed to read completion response: {}", e),
        })?;

        if !status.is_success() {
            warn!(model = %self.model, status = status.as_u16(), "Chat completion failed");
            return Err(classify_status(status.as_u16(), &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Internal(format!("Unexpected chat completion payload: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Internal("Chat completion returned no choices".to_string()))?;

        choice.message.content.ok_or_else(|| {
            Error::MalformedCompletion("the first choice carried no message text".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str) -> OpenAiClient {
        OpenAiClient::new(&CompletionConfig {
            api_url: format!("{}/v1", uri),
            model: "gpt-test".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn completion(content: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_classify_status() {
        match classify_status(429, r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#) {
            Error::CompletionService { failure, message } => {
                assert_eq!(failure, ServiceFailure::Throttled);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("unexpected {:?}", other),
        }

        match classify_status(500, "") {
            Error::CompletionService { failure, message } => {
                assert_eq!(failure, ServiceFailure::Generic);
                assert_eq!(message, "HTTP 500");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_sends_both_turns() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-test",
                "messages": [
                    {"role": "system", "content": "be strict"},
                    {"role": "user", "content": "review this"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("{}"))))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server.uri())
            .complete("be strict", "review this", &Credential::new("sk-test"))
            .await
            .unwrap();
        assert_eq!(text, "{}");
    }

    #[tokio::test]
    async fn test_rate_limit_is_throttled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "type": "requests"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server.uri())
            .complete("s", "u", &Credential::new("k"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CompletionService {
                failure: ServiceFailure::Throttled,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server.uri())
            .complete("s", "u", &Credential::new("k"))
            .await
            .unwrap_err();
        match err {
            Error::CompletionService { failure, message } => {
                assert_eq!(failure, ServiceFailure::Generic);
                assert!(message.contains("Incorrect API key"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_choices_is_internal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server.uri())
            .complete("s", "u", &Credential::new("k"))
            .await
            .unwrap_err();
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn test_missing_content_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(null))))
            .mount(&server)
            .await;

        let err = client_for(&server.uri())
            .complete("s", "u", &Credential::new("k"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedCompletion(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_generic() {
        let client = OpenAiClient::new(&CompletionConfig {
            api_url: "http://127.0.0.1:1/v1".to_string(),
            model: "gpt-test".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let err = client
            .complete("s", "u", &Credential::new("k"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CompletionService {
                failure: ServiceFailure::Generic,
                ..
            }
        ));
    }
}
