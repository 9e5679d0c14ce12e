//! Application layer for textflow
//!
//! [`WorkflowService`] owns the model catalog, the model client and the
//! workflow settings. It resolves the logical model of a request and picks
//! the controller for the requested [`WorkflowKind`].

use std::sync::Arc;
use textflow_core::{BoxedController, WorkflowKind, WorkflowOutput, WorkflowRequest};
use tracing::Instrument;

use crate::config::{ModelCatalog, WorkflowSettings};
use crate::controllers::{PoemController, SentimentController, TranslationController};
use crate::llm::ModelClient;
use crate::{Result, TextflowError};

/// Entry point for running workflows
#[derive(Clone)]
pub struct WorkflowService {
    catalog: Arc<ModelCatalog>,
    client: Arc<dyn ModelClient>,
    settings: WorkflowSettings,
}

impl WorkflowService {
    /// Create a new service
    pub fn new(
        catalog: Arc<ModelCatalog>,
        client: Arc<dyn ModelClient>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            catalog,
            client,
            settings,
        }
    }

    /// Create a new builder
    pub fn builder() -> WorkflowServiceBuilder {
        WorkflowServiceBuilder::new()
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Controller for `kind` bound to the backend model `model`
    pub fn controller(&self, kind: WorkflowKind, model: &str) -> BoxedController {
        let client = self.client.clone();
        match kind {
            WorkflowKind::Translation => Box::new(TranslationController::new(client, model)),
            WorkflowKind::Sentiment => Box::new(SentimentController::new(
                client,
                model,
                self.settings.max_sentiment_attempts,
            )),
            WorkflowKind::Poem => Box::new(PoemController::new(client, model)),
        }
    }

    /// Validate the request, resolve its model and run the workflow
    pub async fn run(&self, kind: WorkflowKind, request: WorkflowRequest) -> Result<WorkflowOutput> {
        request.validate()?;
        let model = self.catalog.resolve(request.model_key())?;
        let controller = self.controller(kind, model);

        let span = tracing::info_span!(
            "workflow",
            request_id = %request.id,
            %kind,
            model
        );
        async move {
            tracing::debug!(
                controller = controller.metadata().name.as_deref().unwrap_or("unnamed"),
                "dispatching"
            );
            let output = controller.execute(&request.text).await?;
            tracing::info!("workflow finished");
            Ok::<_, TextflowError>(output)
        }
        .instrument(span)
        .await
    }
}

/// Builder for creating a [`WorkflowService`]
#[derive(Default)]
pub struct WorkflowServiceBuilder {
    catalog: Option<ModelCatalog>,
    client: Option<Arc<dyn ModelClient>>,
    settings: WorkflowSettings,
}

impl WorkflowServiceBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model catalog
    pub fn catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the model client
    pub fn client(mut self, client: Arc<dyn ModelClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the workflow settings
    pub fn settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the service
    pub fn build(self) -> Result<WorkflowService> {
        let catalog = self
            .catalog
            .ok_or_else(|| TextflowError::Build("No model catalog configured".to_string()))?;
        let client = self
            .client
            .ok_or_else(|| TextflowError::Build("No model client configured".to_string()))?;

        Ok(WorkflowService::new(Arc::new(catalog), client, self.settings))
    }
}
