//! Model invocation with retry and backoff

use crate::config::ModelConfig;
use crate::http::{ChatRequest, ChatTransport, HttpTransport};
use crate::retry::RetryPolicy;
use crate::{LlmError, ModelProvider};
use async_trait::async_trait;
use tracing::{info, warn};

/// Sends requests through a transport, retrying retryable failures
///
/// Up to `policy.max_attempts` attempts are made. A retryable failure
/// (rate limit, timeout, network) waits `policy.delay_for_attempt(n)` before
/// the next attempt; any other failure is returned immediately. After the
/// budget is spent the last error is returned unchanged.
pub struct ModelInvoker<T: ChatTransport> {
    transport: T,
    config: ModelConfig,
    policy: RetryPolicy,
}

impl ModelInvoker<HttpTransport> {
    /// Create an invoker that talks HTTP to the configured endpoint
    pub fn from_config(config: ModelConfig, policy: RetryPolicy) -> Result<Self, LlmError> {
        let transport = HttpTransport::new(&config)?;
        info!(
            url = transport.url(),
            model = %config.model,
            configured = transport.is_configured(),
            "Model transport ready"
        );
        Ok(Self::new(transport, config, policy))
    }
}

impl<T: ChatTransport> ModelInvoker<T> {
    /// Create an invoker over an arbitrary transport
    pub fn new(transport: T, config: ModelConfig, policy: RetryPolicy) -> Self {
        Self {
            transport,
            config,
            policy,
        }
    }

    /// The active retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send `system` + `user` to the model and return its message content
    pub async fn invoke(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest::new(&self.config, system, user);
        let mut attempt = 0;

        loop {
            match self.transport.send(&request).await {
                Ok(content) => {
                    if attempt > 0 {
                        info!("Model call succeeded on attempt {}", attempt + 1);
                    }
                    return Ok(content);
                }
                Err(error) => {
                    if !self.policy.should_retry(&error, attempt) {
                        if error.is_retryable() {
                            warn!(
                                "Model call failed after {} attempts: {}",
                                attempt + 1,
                                error
                            );
                        }
                        return Err(error);
                    }

                    let delay = self.policy.delay_for_attempt(attempt);
                    warn!(
                        "Model call attempt {} failed ({}), retrying in {}ms",
                        attempt + 1,
                        error,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait]
impl<T: ChatTransport> ModelProvider for ModelInvoker<T> {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.invoke(system, user).await
    }

    fn is_configured(&self) -> bool {
        self.transport.is_configured()
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rate_limited() -> Result<String, LlmError> {
        Err(LlmError::RateLimit("HTTP 429: slow down".to_string()))
    }

    fn invoker(transport: MockTransport) -> ModelInvoker<MockTransport> {
        ModelInvoker::new(transport, ModelConfig::default(), RetryPolicy::default())
    }

    fn assert_gap(earlier: Instant, later: Instant, expected_ms: u64) {
        let gap = later - earlier;
        let expected = Duration::from_millis(expected_ms);
        assert!(
            gap >= expected && gap < expected + Duration::from_millis(50),
            "expected ~{:?} between attempts, got {:?}",
            expected,
            gap
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_twice_then_success() {
        let transport = MockTransport::scripted(vec![
            rate_limited(),
            rate_limited(),
            Ok("{\"title\": \"ok\"}".to_string()),
        ]);
        let invoker = invoker(transport.clone());

        let content = invoker.invoke("sys", "user").await.unwrap();

        assert_eq!(content, "{\"title\": \"ok\"}");
        assert_eq!(transport.call_count(), 3);

        let times = transport.call_times();
        assert_gap(times[0], times[1], 1000);
        assert_gap(times[1], times[2], 2000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_surface_last_error() {
        let transport = MockTransport::scripted(vec![
            Err(LlmError::Network("connection refused".to_string())),
            Err(LlmError::Timeout("timed out".to_string())),
            Err(LlmError::Network("dns failure".to_string())),
            Ok("never reached".to_string()),
        ]);
        let invoker = invoker(transport.clone());

        let result = invoker.invoke("sys", "user").await;

        assert_eq!(result, Err(LlmError::Network("dns failure".to_string())));
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_aborts_immediately() {
        let transport = MockTransport::scripted(vec![
            Err(LlmError::Auth("HTTP 401".to_string())),
            Ok("never reached".to_string()),
        ]);
        let invoker = invoker(transport.clone());
        let started = Instant::now();

        let result = invoker.invoke("sys", "user").await;

        assert!(matches!(result, Err(LlmError::Auth(_))));
        assert_eq!(transport.call_count(), 1);
        assert_eq!(Instant::now(), started);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_and_model_errors_not_retried() {
        for error in [
            LlmError::Quota("insufficient_quota".to_string()),
            LlmError::Model { status: 500, body: "boom".to_string() },
        ] {
            let transport = MockTransport::scripted(vec![Err(error.clone())]);
            let result = invoker(transport.clone()).invoke("sys", "user").await;
            assert_eq!(result, Err(error));
            assert_eq!(transport.call_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_request_carries_both_messages() {
        let transport = MockTransport::scripted(vec![Ok(String::new())]);
        let invoker = invoker(transport.clone());

        let content = invoker.invoke("system text", "user text").await.unwrap();
        assert_eq!(content, "");

        let requests = transport.requests();
        assert_eq!(requests[0].messages[0].content, "system text");
        assert_eq!(requests[0].user_text(), Some("user text"));
    }

    #[tokio::test]
    async fn test_http_retry_then_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"choices": [{"message": {"role": "assistant", "content": "done"}}]}),
            ))
            .mount(&server)
            .await;

        let config = ModelConfig {
            endpoint: server.uri(),
            token: Some("t".to_string()),
            ..Default::default()
        };
        let policy = RetryPolicy::new(3, Duration::from_millis(5));
        let invoker = ModelInvoker::from_config(config, policy).unwrap();

        let content = invoker.invoke("sys", "user").await.unwrap();

        assert_eq!(content, "done");
        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 3);
    }

    #[tokio::test]
    async fn test_http_auth_failure_single_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
            .mount(&server)
            .await;

        let config = ModelConfig {
            endpoint: server.uri(),
            token: Some("t".to_string()),
            ..Default::default()
        };
        let invoker =
            ModelInvoker::from_config(config, RetryPolicy::new(3, Duration::from_millis(5))).unwrap();

        let result = invoker.invoke("sys", "user").await;

        assert!(matches!(result, Err(LlmError::Auth(_))));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_retries_then_fails() {
        let config = ModelConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            token: Some("t".to_string()),
            ..Default::default()
        };
        let invoker =
            ModelInvoker::from_config(config, RetryPolicy::new(3, Duration::from_millis(1))).unwrap();

        let result = invoker.invoke("sys", "user").await;
        assert!(matches!(result, Err(LlmError::Network(_))));
    }

    #[test]
    fn test_provider_reports_model_and_configuration() {
        let invoker = ModelInvoker::from_config(ModelConfig::default(), RetryPolicy::default()).unwrap();
        assert_eq!(invoker.model_name(), "deepseek/DeepSeek-V3-0324");
        assert!(!invoker.is_configured());
        assert_eq!(invoker.policy().max_attempts, 3);
    }
}
