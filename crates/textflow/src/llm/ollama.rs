use super::{GenerationOptions, GenerationRequest, ModelClient, ModelError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Implementation of [`ModelClient`] that talks to an Ollama server over HTTP.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    pub base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationOptions,
}

#[derive(Deserialize)]
struct GenerateReply {
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Client whose requests fail once `timeout` has elapsed
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: normalize(base_url.into()),
            client,
        })
    }
}

fn normalize(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateBody {
            model: &request.model,
            prompt: &request.prompt,
            stream: false,
            options: &request.options,
        };

        tracing::debug!(model = %request.model, "invoking ollama");
        let resp = self.client.post(url).json(&body).send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let reply: GenerateReply =
            serde_json::from_str(&text).map_err(|e| ModelError::InvalidResponse(e.to_string()))?;
        tracing::trace!(model = %request.model, response = %reply.response, "ollama replied");
        Ok(reply.response)
    }
}
