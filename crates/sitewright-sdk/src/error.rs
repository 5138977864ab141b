//! Error types for the Sitewright SDK.

use reqwest::StatusCode;
use serde::Deserialize;
use sitewright_validator::ValidationError;
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// The service rejected or lacks the model credential
    #[error("Model token issue: {0}. Check the GITHUB_TOKEN setting of the service.")]
    Auth(String),

    /// The service could not reach the model
    #[error("Connection error: unable to reach the model. Check your internet connection and try again.")]
    Connection(String),

    /// Model rate limit hit (after retries)
    #[error("Model rate limit reached. Please try again after some time.")]
    RateLimit(String),

    /// Model quota or permissions exhausted
    #[error("Model quota exceeded: the token may have insufficient permissions or quota.")]
    Quota(String),

    /// The request timed out
    #[error("The request timed out. Please try a simpler prompt or try again later.")]
    Timeout(String),

    /// The service itself could not be reached
    #[error("Network error: unable to connect to the server. Please check your connection and try again.")]
    Network(String),

    /// Nothing stored under the requested id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other failure reported by the service
    #[error("{error}{}", .details.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
    Api {
        /// HTTP status
        status: u16,
        /// Service error message
        error: String,
        /// Service detail message
        details: Option<String>,
    },

    /// A success response without a document
    #[error("No content received from the API")]
    MissingContent,

    /// The received document failed validation
    #[error("The generated content is incomplete or invalid. Please try again with a more specific prompt.")]
    InvalidContent(#[source] ValidationError),

    /// A response body could not be decoded
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SdkError::Timeout(e.to_string())
        } else if e.is_connect() || e.is_request() {
            SdkError::Network(e.to_string())
        } else if e.is_decode() || e.is_body() {
            SdkError::Decode(e.to_string())
        } else {
            SdkError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(format!("JSON parsing error: {}", e))
    }
}

/// Failure body returned by the service
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Classify a non-success response from the service
pub(crate) fn classify_failure(status: StatusCode, body: ErrorBody) -> SdkError {
    let error = body
        .error
        .unwrap_or_else(|| "Failed to generate website".to_string());
    let details = body.details;

    match status.as_u16() {
        401 => SdkError::Auth(error),
        400 if error.to_lowercase().contains("token") => SdkError::Auth(error),
        402 => SdkError::Quota(error),
        404 => SdkError::NotFound(error),
        429 => SdkError::RateLimit(error),
        503 => SdkError::Connection(details.unwrap_or(error)),
        504 => SdkError::Timeout(error),
        code => SdkError::Api {
            status: code,
            error,
            details,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(error: &str, details: Option<&str>) -> ErrorBody {
        ErrorBody {
            error: Some(error.to_string()),
            details: details.map(str::to_string),
        }
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_failure(StatusCode::UNAUTHORIZED, body("Model authentication failed", None)),
            SdkError::Auth(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::PAYMENT_REQUIRED, body("Model quota exceeded", None)),
            SdkError::Quota(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, body("Model rate limit exceeded", None)),
            SdkError::RateLimit(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::SERVICE_UNAVAILABLE, body("Connection to model failed", None)),
            SdkError::Connection(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::GATEWAY_TIMEOUT, body("Model request timed out", None)),
            SdkError::Timeout(_)
        ));
    }

    #[test]
    fn test_missing_token_is_auth() {
        let err = classify_failure(
            StatusCode::BAD_REQUEST,
            body("Model token is not configured. Set GITHUB_TOKEN or [model].token.", None),
        );
        assert!(matches!(err, SdkError::Auth(_)));

        let err = classify_failure(StatusCode::BAD_REQUEST, body("Invalid prompt", None));
        assert!(matches!(err, SdkError::Api { status: 400, .. }));
    }

    #[test]
    fn test_generic_message_includes_details() {
        let err = classify_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            body("Generated content failed validation", Some("sections is empty")),
        );
        assert_eq!(err.to_string(), "Generated content failed validation: sections is empty");

        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::default());
        assert_eq!(err.to_string(), "Failed to generate website");
    }
}
