use async_trait::async_trait;
use std::sync::Arc;
use textflow_core::{Result, WorkflowController, WorkflowMetadata, WorkflowOutput};

use crate::llm::{GenerationRequest, ModelClient};

/// Writes a short poem about the input text
pub struct PoemController {
    client: Arc<dyn ModelClient>,
    model: String,
}

impl PoemController {
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn prompt(topic: &str) -> String {
        format!("Write a short poem about '{topic}'")
    }
}

#[async_trait]
impl WorkflowController for PoemController {
    async fn execute(&self, input: &str) -> Result<WorkflowOutput> {
        // backend default sampling
        let request = GenerationRequest::new(&self.model, Self::prompt(input));
        let output = self.client.generate(request).await?;
        Ok(WorkflowOutput::Text(output.trim().to_string()))
    }

    fn metadata(&self) -> WorkflowMetadata {
        WorkflowMetadata {
            name: Some("PoemController".to_string()),
            model: Some(self.model.clone()),
        }
    }
}
