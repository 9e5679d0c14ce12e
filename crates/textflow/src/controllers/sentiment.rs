//! Sentence-level sentiment classification.
//!
//! Each sentence is sent to the model with greedy decoding and a `.` stop
//! sequence. When the reply names no label the sentence is asked again
//! with a prompt that spells out the allowed labels, up to the configured
//! number of attempts.

use async_trait::async_trait;
use std::sync::Arc;
use textflow_core::{
    ClassificationOutcome, Result as CoreResult, SentimentTally, WorkflowController,
    WorkflowMetadata, WorkflowOutput, extract_label, segment_sentences,
};

use crate::llm::{GenerationOptions, GenerationRequest, ModelClient, ModelError};

const PREAMBLE: &str = "sentiment of this sentence is";
const LABEL_CONSTRAINT: &str = ", in positive, negative and neutral is";

pub struct SentimentController {
    client: Arc<dyn ModelClient>,
    model: String,
    max_attempts: usize,
}

impl SentimentController {
    /// `max_attempts` below one is treated as one
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>, max_attempts: usize) -> Self {
        Self {
            client,
            model: model.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn prompt(sentence: &str) -> String {
        format!("{PREAMBLE} '{sentence}'")
    }

    pub fn constrained_prompt(sentence: &str) -> String {
        format!("{}{LABEL_CONSTRAINT}", Self::prompt(sentence))
    }

    fn options() -> GenerationOptions {
        GenerationOptions::deterministic().with_stop(".")
    }

    /// Classify one sentence
    pub async fn classify(&self, sentence: &str) -> Result<ClassificationOutcome, ModelError> {
        for attempt in 1..=self.max_attempts {
            let prompt = if attempt == 1 {
                Self::prompt(sentence)
            } else {
                Self::constrained_prompt(sentence)
            };
            let request = GenerationRequest::new(&self.model, prompt).with_options(Self::options());
            let output = self.client.generate(request).await?;

            if let Some(label) = extract_label(&output, sentence) {
                tracing::debug!(attempt, %label, "sentence classified");
                return Ok(ClassificationOutcome::Labeled(label));
            }
            tracing::debug!(attempt, "no label in reply");
        }

        tracing::warn!(
            sentence,
            attempts = self.max_attempts,
            "sentence left unclassified"
        );
        Ok(ClassificationOutcome::Unclassified {
            attempts: self.max_attempts,
        })
    }

    /// Segment `text` and classify every sentence in order
    pub async fn classify_document(&self, text: &str) -> Result<SentimentTally, ModelError> {
        let mut tally = SentimentTally::new();
        for sentence in segment_sentences(text) {
            tally.record(self.classify(sentence).await?);
        }
        Ok(tally)
    }
}

#[async_trait]
impl WorkflowController for SentimentController {
    async fn execute(&self, input: &str) -> CoreResult<WorkflowOutput> {
        let tally = self.classify_document(input).await?;
        Ok(WorkflowOutput::Sentiment(tally))
    }

    fn metadata(&self) -> WorkflowMetadata {
        WorkflowMetadata {
            name: Some("SentimentController".to_string()),
            model: Some(self.model.clone()),
        }
    }
}
