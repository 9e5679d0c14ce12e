//! Main crate for textflow
//!
//! Application layer on top of `textflow-core`: the model catalog, the client
//! for the local inference backend, the three workflow controllers and the
//! [`WorkflowService`] that ties them together.

pub mod app;
pub mod config;
pub mod controllers;
pub mod error;
pub mod llm;

// Re-export core types
pub use textflow_core::{
    ClassificationOutcome, CoreError, DEFAULT_MODEL_KEY, RequestId, Sentiment, SentimentTally,
    WorkflowController, WorkflowKind, WorkflowOutput, WorkflowRequest,
};

pub use app::{WorkflowService, WorkflowServiceBuilder};
pub use config::{ModelCatalog, WorkflowSettings};
pub use error::{Result, TextflowError};
pub use llm::{GenerationOptions, GenerationRequest, ModelClient, ModelError, OllamaClient};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::WorkflowService;
    pub use crate::llm::ModelClient;
    pub use textflow_core::{WorkflowKind, WorkflowOutput, WorkflowRequest};
}
