//! Failure classification for model calls
//!
//! Maps HTTP failures and transport errors onto the [`LlmError`] taxonomy.
//! Status codes take precedence over body markers.

use crate::LlmError;

const AUTH_MARKERS: &[&str] = &["unauthorized", "authentication", "bad credentials"];
const QUOTA_MARKERS: &[&str] = &["quota", "insufficient_quota"];
const TIMEOUT_MARKERS: &[&str] = &["timeout", "timed out", "etimedout"];

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    markers.iter().any(|marker| lower.contains(marker))
}

/// Classify a non-success HTTP response
///
/// 401/403 → `Auth`, 429 → `RateLimit`, 408/504 → `Timeout`, then body
/// markers (auth, quota, timeout) in that order, else `Model`.
pub fn classify_http_failure(status: u16, body: &str) -> LlmError {
    match status {
        401 | 403 => return LlmError::Auth(format!("HTTP {}: {}", status, body)),
        429 => return LlmError::RateLimit(format!("HTTP {}: {}", status, body)),
        408 | 504 => return LlmError::Timeout(format!("HTTP {}: {}", status, body)),
        _ => {}
    }

    if contains_any(body, AUTH_MARKERS) {
        LlmError::Auth(format!("HTTP {}: {}", status, body))
    } else if contains_any(body, QUOTA_MARKERS) {
        LlmError::Quota(format!("HTTP {}: {}", status, body))
    } else if contains_any(body, TIMEOUT_MARKERS) {
        LlmError::Timeout(format!("HTTP {}: {}", status, body))
    } else {
        LlmError::Model {
            status,
            body: body.to_string(),
        }
    }
}

/// Classify a failure that never produced an HTTP response
///
/// Timeout markers → `Timeout`; anything else (refused connections, DNS
/// failures, resets) → `Network`.
pub fn classify_transport_failure(message: &str, timed_out: bool) -> LlmError {
    if timed_out || contains_any(message, TIMEOUT_MARKERS) {
        LlmError::Timeout(message.to_string())
    } else {
        LlmError::Network(message.to_string())
    }
}

/// Render an error and all of its sources as one line
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        assert!(matches!(classify_http_failure(401, "{}"), LlmError::Auth(_)));
        assert!(matches!(classify_http_failure(403, "{}"), LlmError::Auth(_)));
    }

    #[test]
    fn test_auth_body_marker() {
        let error = classify_http_failure(400, r#"{"error": "Unauthorized: token expired"}"#);
        assert!(matches!(error, LlmError::Auth(_)));
    }

    #[test]
    fn test_rate_limit() {
        let error = classify_http_failure(429, "slow down");
        assert!(matches!(error, LlmError::RateLimit(_)));
        assert!(error.is_retryable());
    }

    #[test]
    fn test_status_beats_body_marker() {
        let error = classify_http_failure(429, "quota will reset soon");
        assert!(matches!(error, LlmError::RateLimit(_)));
    }

    #[test]
    fn test_quota_marker() {
        let error = classify_http_failure(400, r#"{"code": "insufficient_quota"}"#);
        assert!(matches!(error, LlmError::Quota(_)));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_timeout_marker_and_status() {
        assert!(matches!(classify_http_failure(500, "upstream timed out"), LlmError::Timeout(_)));
        assert!(matches!(classify_http_failure(504, ""), LlmError::Timeout(_)));
    }

    #[test]
    fn test_other_failures_keep_status_and_body() {
        let error = classify_http_failure(500, "internal failure");
        assert_eq!(
            error,
            LlmError::Model {
                status: 500,
                body: "internal failure".to_string()
            }
        );
    }

    #[test]
    fn test_transport_failures() {
        assert!(matches!(
            classify_transport_failure("error sending request: connection refused", false),
            LlmError::Network(_)
        ));
        assert!(matches!(
            classify_transport_failure("dns error: failed to lookup address", false),
            LlmError::Network(_)
        ));
        assert!(matches!(
            classify_transport_failure("operation timed out", false),
            LlmError::Timeout(_)
        ));
        assert!(matches!(classify_transport_failure("whatever", true), LlmError::Timeout(_)));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = std::io::Error::new(std::io::ErrorKind::Other, inner);
        assert!(error_chain(&outer).contains("refused"));
    }
}
