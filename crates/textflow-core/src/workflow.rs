//! Workflow controller trait and workflow kinds
//!
//! Every endpoint of the service maps to one [`WorkflowKind`]. A kind is
//! turned into a controller once the backend model is known, and the
//! controller is driven through the single [`WorkflowController::execute`]
//! method. Dispatch is closed: adding a workflow means adding a variant.

use crate::{Result, SentimentTally};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The workflows the service exposes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WorkflowKind {
    Translation,
    Sentiment,
    Poem,
}

/// Structured result of a workflow run.
///
/// Serialized untagged, so text workflows render as a plain string and the
/// sentiment workflow as its tally object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkflowOutput {
    Text(String),
    Sentiment(SentimentTally),
}

impl WorkflowOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Sentiment(_) => None,
        }
    }

    pub fn as_tally(&self) -> Option<&SentimentTally> {
        match self {
            Self::Sentiment(tally) => Some(tally),
            Self::Text(_) => None,
        }
    }
}

/// Turns raw input text into a structured result via one or more model
/// invocations.
#[async_trait]
pub trait WorkflowController: Send + Sync {
    /// Run the workflow on `input`
    async fn execute(&self, input: &str) -> Result<WorkflowOutput>;

    /// Optional method to get controller metadata
    fn metadata(&self) -> WorkflowMetadata {
        WorkflowMetadata::default()
    }
}

/// Metadata about a controller
#[derive(Debug, Clone, Default)]
pub struct WorkflowMetadata {
    /// Human-readable name of the controller
    pub name: Option<String>,
    /// Backend model identifier the controller invokes
    pub model: Option<String>,
}

/// A boxed controller for dynamic dispatch
pub type BoxedController = Box<dyn WorkflowController>;
