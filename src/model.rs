use crate::types::{CriticError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

/// Trait for backends that can turn a prompt pair into commentary text.
///
/// The pipeline only ever issues a single two-message exchange: the prompt
/// template as the system instruction and the interpolated emoji labels as
/// the user message.
#[async_trait]
pub trait CommentaryModel: Send + Sync {
    /// Name of the underlying model, for logging and diagnostics.
    fn model_name(&self) -> String;

    /// Submit one completion request and return the raw text payload.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Scripted model for development and testing: replies are dequeued in
/// order, and every request is recorded for later assertion.
pub struct MockModel {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<(String, String)>>,
    response_delay_ms: u64,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            response_delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.response_delay_ms = delay_ms;
        self
    }

    /// Queue a successful raw payload for the next request.
    pub fn push_reply(&self, payload: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(payload.into()));
    }

    /// Queue a failure for the next request.
    pub fn push_error(&self, error: CriticError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// The `(system, user)` message pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentaryModel for MockModel {
    fn model_name(&self) -> String {
        "mock".to_string()
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        if self.response_delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.response_delay_ms)).await;
        }

        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        debug!("MockModel handling request for user message: {}", user);

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(CriticError::MalformedResponse(
                    "mock model has no scripted reply".to_string(),
                ))
            })
    }
}
