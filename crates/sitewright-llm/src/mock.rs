//! Scripted transport for exercising retry behaviour without a network

use crate::http::{ChatRequest, ChatTransport};
use crate::LlmError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Transport that replays a fixed script of outcomes
///
/// Each `send` pops the next outcome. Once the script is exhausted every
/// call fails with a `Model` error. Clones share the script and call log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    calls: Arc<Mutex<Vec<(Instant, ChatRequest)>>>,
}

impl MockTransport {
    /// Create a transport that answers with `outcomes`, in order
    pub fn scripted(outcomes: impl IntoIterator<Item = Result<String, LlmError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of attempts made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// When each attempt was made, on the tokio clock
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(at, _)| *at).collect())
            .unwrap_or_default()
    }

    /// Requests received, in order
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, request)| request.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, LlmError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((Instant::now(), request.clone()));
        }

        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| {
                Err(LlmError::Model {
                    status: 500,
                    body: "mock script exhausted".to_string(),
                })
            })
    }
}
