//! Request types for textflow-core

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, Result};

/// Logical model key used when a request does not name one
pub const DEFAULT_MODEL_KEY: &str = "phi3";

/// NewType pattern for Request ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new RequestId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create from existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text submitted to a workflow, together with the logical model to run it on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRequest {
    /// Unique request ID
    pub id: RequestId,
    /// Input text
    pub text: String,
    /// Logical model key; `None` means [`DEFAULT_MODEL_KEY`]
    pub model: Option<String>,
}

impl WorkflowRequest {
    /// Create a request for the default model
    pub fn simple(text: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            text: text.into(),
            model: None,
        }
    }

    /// Set the logical model key
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Logical model key this request resolves through the catalog
    pub fn model_key(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL_KEY)
    }

    /// Reject requests that carry no text to work on
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(CoreError::InvalidRequest(
                "'text' must not be empty".to_string(),
            ));
        }
        if self.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(CoreError::InvalidRequest(
                "'model' must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
