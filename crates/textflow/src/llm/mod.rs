//! Client abstraction over the local inference backend.
//!
//! [`ModelClient`] is the single boundary call the workflows make. An
//! [`OllamaClient`] talks to an Ollama server over HTTP; a
//! [`ScriptedModelClient`] replays canned replies for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use textflow_core::CoreError;
use thiserror::Error;

mod ollama;
mod scripted;

pub use ollama::OllamaClient;
pub use scripted::ScriptedModelClient;

/// Errors originating from a [`ModelClient`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<ModelError> for CoreError {
    fn from(err: ModelError) -> Self {
        CoreError::Invocation(Box::new(err))
    }
}

/// Decoding options passed through to the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

impl GenerationOptions {
    /// Greedy decoding (temperature 0)
    pub fn deterministic() -> Self {
        Self {
            temperature: Some(0.0),
            stop: Vec::new(),
        }
    }

    /// Stop generation when `token` is produced
    pub fn with_stop(mut self, token: impl Into<String>) -> Self {
        self.stop.push(token.into());
        self
    }
}

/// One prompt sent to one backend model
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Backend model identifier (already resolved through the catalog)
    pub model: String,
    pub prompt: String,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Interface for single-shot text generation.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a completion and return the raw text once the backend stops
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError>;
}
