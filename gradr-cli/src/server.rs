//! HTTP review endpoint
//!
//! `POST /review` takes the review request as JSON and the two credentials as
//! `github-token` and `openai-key` headers. Credentials live for one request.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use gradr_core::{Credential, ReviewVerdict};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::pipeline::{DefaultPipeline, ReviewInput};

const GITHUB_TOKEN_HEADER: &str = "github-token";
const OPENAI_KEY_HEADER: &str = "openai-key";

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// Failure of a review request
#[derive(Debug)]
pub enum ApiError {
    /// The request itself is unusable
    Validation(String),
    /// The pipeline failed
    Review(gradr_core::Error),
}

impl From<gradr_core::Error> for ApiError {
    fn from(error: gradr_core::Error) -> Self {
        Self::Review(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(detail) => {
                warn!(%detail, "Rejected review request");
                (StatusCode::UNPROCESSABLE_ENTITY, detail)
            }
            ApiError::Review(err) => {
                if err.is_internal() {
                    error!(error = %err, "Unhandled review failure");
                } else {
                    warn!(kind = err.kind(), error = %err, "Review failed");
                }
                let status = StatusCode::from_u16(err.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, err.public_detail())
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Build the review router
pub fn router(pipeline: Arc<DefaultPipeline>) -> Router {
    Router::new()
        .route("/review", post(review))
        .with_state(pipeline)
}

fn credential(headers: &HeaderMap, name: &str) -> Result<Credential, ApiError> {
    let credential = headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(Credential::new)
        .filter(|c| !c.is_empty());

    credential.ok_or_else(|| ApiError::Validation(format!("Missing required header: {}", name)))
}

fn validate(input: &ReviewInput) -> Result<(), ApiError> {
    let url = url::Url::parse(&input.github_repo_url)
        .map_err(|e| ApiError::Validation(format!("github_repo_url is not a valid URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(ApiError::Validation(
            "github_repo_url must be an http(s) URL".to_string(),
        ));
    }

    Ok(())
}

async fn review(
    State(pipeline): State<Arc<DefaultPipeline>>,
    headers: HeaderMap,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> Result<Json<ReviewVerdict>, ApiError> {
    let Json(input) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    validate(&input)?;

    let github_token = credential(&headers, GITHUB_TOKEN_HEADER)?;
    let api_key = credential(&headers, OPENAI_KEY_HEADER)?;

    info!(level = %input.candidate_level, "Review requested");

    let verdict = pipeline.run(&input, &github_token, &api_key).await?;
    Ok(Json(verdict))
}

/// Serve the review endpoint until Ctrl-C
pub async fn serve(pipeline: DefaultPipeline, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(address = %listener.local_addr()?, "Review endpoint listening");

    axum::serve(listener, router(Arc::new(pipeline)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
