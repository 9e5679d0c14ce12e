use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use textflow::{SentimentTally, WorkflowKind, WorkflowOutput, WorkflowRequest};
use utoipa::ToSchema;

use crate::AppState;
use crate::error::{ApiError, ErrorResponse};

/// Body accepted by every workflow endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkflowBody {
    /// Input text
    pub text: String,
    /// Logical model key, `phi3` when omitted
    pub model: Option<String>,
}

impl From<WorkflowBody> for WorkflowRequest {
    fn from(body: WorkflowBody) -> Self {
        let request = WorkflowRequest::simple(body.text);
        match body.model {
            Some(model) => request.with_model(model),
            None => request,
        }
    }
}

/// Sentiment counts DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SentimentTallyDto {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Sentences for which the model never named a label
    pub unclassified: usize,
}

impl From<SentimentTally> for SentimentTallyDto {
    fn from(tally: SentimentTally) -> Self {
        Self {
            positive: tally.positive,
            negative: tally.negative,
            neutral: tally.neutral,
            unclassified: tally.unclassified,
        }
    }
}

/// Workflow result: generated text, or sentiment counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum WorkflowResultDto {
    Text(String),
    Sentiment(SentimentTallyDto),
}

impl From<WorkflowOutput> for WorkflowResultDto {
    fn from(output: WorkflowOutput) -> Self {
        match output {
            WorkflowOutput::Text(text) => Self::Text(text),
            WorkflowOutput::Sentiment(tally) => Self::Sentiment(tally.into()),
        }
    }
}

/// Body of every successful workflow call
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkflowResponse {
    pub response: WorkflowResultDto,
}

async fn run_workflow(
    state: &AppState,
    kind: WorkflowKind,
    payload: Result<Json<WorkflowBody>, JsonRejection>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let output = state.service.run(kind, body.into()).await?;

    Ok(Json(WorkflowResponse {
        response: output.into(),
    }))
}

/// Translate text into English
#[utoipa::path(
    post,
    path = "/translate",
    request_body = WorkflowBody,
    responses(
        (status = 200, description = "Translated text", body = WorkflowResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Model backend failed", body = ErrorResponse)
    ),
    tag = "workflows"
)]
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<WorkflowBody>, JsonRejection>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    run_workflow(&state, WorkflowKind::Translation, payload).await
}

/// Count positive, negative and neutral sentences
#[utoipa::path(
    post,
    path = "/sentiment",
    request_body = WorkflowBody,
    responses(
        (status = 200, description = "Sentiment counts", body = WorkflowResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Model backend failed", body = ErrorResponse)
    ),
    tag = "workflows"
)]
pub async fn sentiment(
    State(state): State<AppState>,
    payload: Result<Json<WorkflowBody>, JsonRejection>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    run_workflow(&state, WorkflowKind::Sentiment, payload).await
}

/// Write a short poem about the text
#[utoipa::path(
    post,
    path = "/poem",
    request_body = WorkflowBody,
    responses(
        (status = 200, description = "Generated poem", body = WorkflowResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Model backend failed", body = ErrorResponse)
    ),
    tag = "workflows"
)]
pub async fn poem(
    State(state): State<AppState>,
    payload: Result<Json<WorkflowBody>, JsonRejection>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    run_workflow(&state, WorkflowKind::Poem, payload).await
}

/// Routes for workflow endpoints
pub fn routes() -> axum::Router<AppState> {
    use axum::routing::post;

    axum::Router::new()
        .route("/translate", post(translate))
        .route("/sentiment", post(sentiment))
        .route("/poem", post(poem))
}
