use async_trait::async_trait;
use std::sync::Arc;
use textflow_core::{Result, WorkflowController, WorkflowMetadata, WorkflowOutput};

use crate::llm::{GenerationOptions, GenerationRequest, ModelClient};

/// Single-shot translation into English
pub struct TranslationController {
    client: Arc<dyn ModelClient>,
    model: String,
}

impl TranslationController {
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn prompt(text: &str) -> String {
        format!(
            "Translate the following text into English. Reply with the translation only: '{text}'"
        )
    }
}

#[async_trait]
impl WorkflowController for TranslationController {
    async fn execute(&self, input: &str) -> Result<WorkflowOutput> {
        let request = GenerationRequest::new(&self.model, Self::prompt(input))
            .with_options(GenerationOptions::deterministic());
        let output = self.client.generate(request).await?;
        Ok(WorkflowOutput::Text(output.trim().to_string()))
    }

    fn metadata(&self) -> WorkflowMetadata {
        WorkflowMetadata {
            name: Some("TranslationController".to_string()),
            model: Some(self.model.clone()),
        }
    }
}
