use super::{GenerationRequest, ModelClient, ModelError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// In-memory client that replays canned replies, used in tests.
///
/// Replies are handed out in order; once they run out the fallback reply is
/// used, and without a fallback the call fails. Every request is recorded.
#[derive(Debug, Default)]
pub struct ScriptedModelClient {
    replies: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    failure: Option<ModelError>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModelClient {
    pub fn new<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Reply used once the scripted replies are exhausted
    pub fn with_fallback(mut self, reply: impl Into<String>) -> Self {
        self.fallback = Some(reply.into());
        self
    }

    /// Client whose every call fails like an unreachable backend
    pub fn failing() -> Self {
        Self::failing_with(ModelError::Network("connection refused".to_string()))
    }

    /// Client whose every call fails with `error`
    pub fn failing_with(error: ModelError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let next = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        next.or_else(|| self.fallback.clone())
            .ok_or_else(|| ModelError::InvalidResponse("no scripted reply left".to_string()))
    }
}
