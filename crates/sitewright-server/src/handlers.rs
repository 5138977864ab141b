//! HTTP request handlers for the generation service.
//!
//! Implements the generation endpoint, stored-content lookup and health
//! check using axum.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use sitewright_domain::{ContentId, StoredDocument, WebsiteContent};
use sitewright_generator::{GenerationRequest, Generator, GeneratorError};
use sitewright_llm::{LlmError, ModelProvider};
use sitewright_store::{ConfiguredStore, StorageMode};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Generator wired to a configurable store
pub type SiteGenerator<P> = Generator<P, ConfiguredStore>;

/// Shared application state
pub struct AppState<P: ModelProvider> {
    /// The generation pipeline
    pub generator: Arc<SiteGenerator<P>>,
    /// Storage mode, reported by the health check
    pub storage_mode: StorageMode,
}

impl<P: ModelProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            storage_mode: self.storage_mode,
        }
    }
}

/// Successful generation response
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Always true
    pub success: bool,
    /// The validated document
    pub content: WebsiteContent,
    /// Id the document was saved under
    pub id: ContentId,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model identifier in use
    pub model: String,
    /// Storage mode in use
    pub storage: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable, human-readable error message
    pub error: String,

    /// Further detail, when there is any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Raw model output for parse failures
    #[serde(
        default,
        rename = "rawContent",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_content: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            raw_content: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Pipeline failure
    Generator(GeneratorError),
    /// Request body or path could not be used
    BadRequest(String),
    /// Nothing stored under the requested id
    NotFound(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            AppError::Generator(e) => generator_error_response(e),
        }
    }
}

fn generator_error_response(e: GeneratorError) -> (StatusCode, ErrorResponse) {
    match e {
        GeneratorError::InvalidInput(msg) | GeneratorError::Config(msg) => {
            (StatusCode::BAD_REQUEST, ErrorResponse::new(msg))
        }
        GeneratorError::Model(e) => model_error_response(e),
        GeneratorError::Parse { raw } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse {
                error: "Invalid response format from model".to_string(),
                details: None,
                raw_content: Some(raw),
            },
        ),
        GeneratorError::Validation(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("Generated content failed validation").with_details(e.to_string()),
        ),
        GeneratorError::Store(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("Failed to store website content").with_details(msg),
        ),
    }
}

fn model_error_response(e: LlmError) -> (StatusCode, ErrorResponse) {
    match e {
        LlmError::Auth(_) => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new("Model authentication failed").with_details(
                "The model token may be invalid or expired. Check the GITHUB_TOKEN setting.",
            ),
        ),
        LlmError::Quota(_) => (
            StatusCode::PAYMENT_REQUIRED,
            ErrorResponse::new("Model quota exceeded")
                .with_details("The model token has insufficient quota or permissions."),
        ),
        LlmError::RateLimit(_) => (
            StatusCode::TOO_MANY_REQUESTS,
            ErrorResponse::new("Model rate limit exceeded")
                .with_details("The rate limit for the model API was reached. Try again later."),
        ),
        LlmError::Network(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorResponse::new("Connection to model failed").with_details(
                "Check the network connection and try again. The model service may be temporarily unavailable.",
            ),
        ),
        LlmError::Timeout(_) => (
            StatusCode::GATEWAY_TIMEOUT,
            ErrorResponse::new("Model request timed out")
                .with_details("The request took too long to complete. Try again or use a simpler prompt."),
        ),
        e @ LlmError::Model { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("Failed to generate website content").with_details(e.to_string()),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %body.error, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %body.error, "Request rejected");
        }
        (status, Json(body)).into_response()
    }
}

impl From<GeneratorError> for AppError {
    fn from(e: GeneratorError) -> Self {
        AppError::Generator(e)
    }
}

/// POST /api/generate - Generate, validate and store a website
async fn generate<P: ModelProvider + 'static>(
    State(state): State<AppState<P>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(%rejection, "Unusable generate request body");
        AppError::BadRequest("Invalid prompt".to_string())
    })?;

    info!(received_hints = ?request.style_hints, "Generate request");
    let result = state.generator.generate(request).await?;

    Ok(Json(GenerateResponse {
        success: true,
        content: result.content,
        id: result.id,
    }))
}

/// GET /api/content/:id - Fetch a stored document (`latest` for the newest)
async fn get_content<P: ModelProvider + 'static>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<Json<StoredDocument>, AppError> {
    if id == "latest" {
        return state
            .generator
            .latest()
            .await?
            .map(Json)
            .ok_or_else(|| AppError::NotFound("No content has been generated yet".to_string()));
    }

    let content_id = ContentId::parse(&id).map_err(AppError::BadRequest)?;
    state
        .generator
        .load(content_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Content not found: {}", content_id)))
}

/// GET /health - Service health
async fn health_check<P: ModelProvider + 'static>(
    State(state): State<AppState<P>>,
) -> Json<HealthCheckResponse> {
    let provider = state.generator.provider();
    let status = if provider.is_configured() {
        "ok"
    } else {
        "unconfigured"
    };

    Json(HealthCheckResponse {
        status: status.to_string(),
        model: provider.model_name().to_string(),
        storage: state.storage_mode.to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<P: ModelProvider + 'static>(state: AppState<P>) -> AxumRouter {
    AxumRouter::new()
        .route("/api/generate", post(generate::<P>))
        .route("/api/content/:id", get(get_content::<P>))
        .route("/health", get(health_check::<P>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use sitewright_generator::GeneratorConfig;
    use sitewright_llm::MockProvider;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(provider: MockProvider) -> AppState<MockProvider> {
        let store = ConfiguredStore::open_path(":memory:", StorageMode::SingleSlot).unwrap();
        AppState {
            generator: Arc::new(Generator::new(provider, store, GeneratorConfig::default())),
            storage_mode: StorageMode::SingleSlot,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state(MockProvider::default()));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_rejects_non_string_prompt() {
        let app = create_router(create_test_state(MockProvider::default()));

        let request = Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"prompt": 42}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_model_error_status_codes() {
        let cases = [
            (LlmError::Auth("401".into()), StatusCode::UNAUTHORIZED),
            (LlmError::Quota("quota".into()), StatusCode::PAYMENT_REQUIRED),
            (LlmError::RateLimit("429".into()), StatusCode::TOO_MANY_REQUESTS),
            (LlmError::Network("refused".into()), StatusCode::SERVICE_UNAVAILABLE),
            (LlmError::Timeout("slow".into()), StatusCode::GATEWAY_TIMEOUT),
            (
                LlmError::Model { status: 500, body: "boom".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let (status, body) = model_error_response(error);
            assert_eq!(status, expected);
            assert!(body.details.is_some());
        }
    }

    #[test]
    fn test_parse_error_keeps_raw_content() {
        let (status, body) = generator_error_response(GeneratorError::Parse {
            raw: "garbage".to_string(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.raw_content.as_deref(), Some("garbage"));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["rawContent"], "garbage");
        assert!(json.get("details").is_none());
    }
}
