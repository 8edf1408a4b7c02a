//! Mock text driver for testing.

use async_trait::async_trait;
use quill_core::CompletionRequest;
use quill_error::{GenerationError, GenerationErrorKind, QuillResult};
use quill_interface::TextDriver;
use std::sync::{Arc, Mutex};

/// A single scripted driver response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail with this error
    Error(GenerationErrorKind),
    /// Never resolve; only cancellation ends the call
    Hang,
}

/// Mock text driver that replays a sequence of responses and records prompts.
#[derive(Debug, Clone)]
pub struct MockDriver {
    responses: Arc<Vec<MockResponse>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockDriver {
    /// Create a driver with a response sequence.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a driver that answers every call with the same text.
    #[allow(dead_code)]
    pub fn new_text(text: impl Into<String>) -> Self {
        Self::new_sequence(vec![MockResponse::Text(text.into())])
    }

    /// Get the number of times complete() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received, in order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextDriver for MockDriver {
    async fn complete(&self, request: &CompletionRequest) -> QuillResult<String> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        // A single scripted response repeats; longer scripts are exhausted in order.
        let response = if self.responses.len() == 1 {
            self.responses.first()
        } else {
            self.responses.get(index)
        };

        match response {
            Some(MockResponse::Text(text)) => Ok(text.clone()),
            Some(MockResponse::Error(kind)) => Err(GenerationError::new(kind.clone()).into()),
            Some(MockResponse::Hang) => std::future::pending().await,
            None => Err(GenerationError::new(GenerationErrorKind::Failed(format!(
                "Mock sequence exhausted (call {} beyond {} responses)",
                index + 1,
                self.responses.len()
            )))
            .into()),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
