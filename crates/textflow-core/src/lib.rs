//! # textflow core
//!
//! Domain types shared by the textflow workflows: requests, the workflow
//! controller abstraction, sentence segmentation and sentiment tallies.

pub mod error;
pub mod request;
pub mod segment;
pub mod sentiment;
pub mod workflow;

pub use error::{CoreError, Result};
pub use request::{DEFAULT_MODEL_KEY, RequestId, WorkflowRequest};
pub use segment::{Sentences, segment_sentences};
pub use sentiment::{ClassificationOutcome, Sentiment, SentimentTally, extract_label};
pub use workflow::{
    BoxedController, WorkflowController, WorkflowKind, WorkflowMetadata, WorkflowOutput,
};
