use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use textflow::{ModelCatalog, OllamaClient, WorkflowService};
use textflow_api::{ApiConfig, AppState, build_app};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// textflow API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "TEXTFLOW_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TEXTFLOW_PORT")]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace); overrides the config file
    #[arg(short, long, env = "TEXTFLOW_LOG_LEVEL")]
    log_level: Option<String>,

    /// Config file path
    #[arg(short, long, env = "TEXTFLOW_CONFIG")]
    config_file: Option<PathBuf>,

    /// Model catalog path (logical key -> backend model id)
    #[arg(short, long, env = "TEXTFLOW_MODELS")]
    models_file: Option<PathBuf>,

    /// Ollama server URL
    #[arg(long, env = "TEXTFLOW_OLLAMA_URL")]
    ollama_url: Option<String>,

    /// Disable Swagger UI
    #[arg(long, env = "TEXTFLOW_DISABLE_SWAGGER", default_value_t = false)]
    disable_swagger: bool,
}

impl Cli {
    /// Apply command-line values on top of the loaded configuration
    fn apply(self, config: &mut ApiConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(models_file) = self.models_file {
            config.models_file = models_file;
        }
        if let Some(ollama_url) = self.ollama_url {
            config.ollama_url = ollama_url;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        if self.disable_swagger {
            config.enable_swagger = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration before logging so the file can set the level
    let loaded = cli
        .config_file
        .clone()
        .map(|path| (ApiConfig::load_from_file(&path), path));
    let mut config = match &loaded {
        Some((Ok(cfg), _)) => cfg.clone(),
        _ => ApiConfig::default(),
    };
    cli.apply(&mut config);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match loaded {
        Some((Ok(_), path)) => info!("Configuration loaded from: {}", path.display()),
        Some((Err(e), _)) => warn!(
            "Failed to load config file: {}. Using default configuration.",
            e
        ),
        None => {}
    }

    let addr = config.socket_addr()?;

    // The catalog is required; there is no default model mapping
    let catalog = ModelCatalog::load_from_file(&config.models_file)
        .context("cannot start without a model catalog")?;
    info!(
        "Model catalog loaded from {}: {}",
        config.models_file.display(),
        catalog.keys().join(", ")
    );

    let client = OllamaClient::with_timeout(&config.ollama_url, config.request_timeout())?;
    let service = WorkflowService::builder()
        .catalog(catalog)
        .client(Arc::new(client))
        .settings(config.workflow_settings())
        .build()?;
    let state = AppState::new(Arc::new(service));

    // Build application
    let app = build_app(state, &config);

    // Start server
    info!("Starting server on: {}", addr);
    info!("Model backend: {}", config.ollama_url);
    if config.enable_swagger {
        info!("Swagger UI: http://{}/swagger-ui", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
