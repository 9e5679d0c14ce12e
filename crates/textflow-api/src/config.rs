use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use textflow::WorkflowSettings;

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Host address
    pub host: String,

    /// Port number
    pub port: u16,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Log level
    pub log_level: String,

    /// Enable Swagger UI
    pub enable_swagger: bool,

    /// JSON file mapping logical model keys to backend model ids
    pub models_file: PathBuf,

    /// Base URL of the Ollama server
    pub ollama_url: String,

    /// Timeout for a single model call, in seconds (at least 1)
    pub request_timeout_secs: u64,

    /// Model calls per sentence before it counts as unclassified
    pub max_sentiment_attempts: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors: CorsConfig::default(),
            log_level: "info".to_string(),
            enable_swagger: true,
            models_file: PathBuf::from("config.json"),
            ollama_url: "http://localhost:11434".to_string(),
            request_timeout_secs: 120,
            max_sentiment_attempts: WorkflowSettings::default().max_sentiment_attempts,
        }
    }
}

impl ApiConfig {
    /// Convert to SocketAddr
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid address {}: {}", addr, e))
    }

    /// Load from configuration file
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Tracing filter directives for the server crates
    pub fn log_filter(&self) -> String {
        format!(
            "textflow_api={0},textflow={0},tower_http=debug",
            self.log_level
        )
    }

    pub fn workflow_settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            max_sentiment_attempts: self.max_sentiment_attempts,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins
    pub allowed_origins: Vec<String>,

    /// Allow any origin
    pub allow_any_origin: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allow_any_origin: true,
        }
    }
}
