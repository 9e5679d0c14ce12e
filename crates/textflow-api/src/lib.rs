use axum::Router;
use axum::http::HeaderValue;
use std::sync::Arc;
use textflow::WorkflowService;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod routes;

pub use config::ApiConfig;
pub use error::{ApiError, ErrorResponse};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkflowService>,
}

impl AppState {
    pub fn new(service: Arc<WorkflowService>) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::workflow::translate,
        crate::routes::workflow::sentiment,
        crate::routes::workflow::poem,
    ),
    components(
        schemas(
            crate::routes::health::HealthResponse,
            crate::routes::workflow::WorkflowBody,
            crate::routes::workflow::WorkflowResponse,
            crate::routes::workflow::WorkflowResultDto,
            crate::routes::workflow::SentimentTallyDto,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "workflows", description = "Translation, sentiment and poem workflows")
    )
)]
pub struct ApiDoc;

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors.allow_any_origin {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build API application
pub fn build_app(state: AppState, config: &ApiConfig) -> Router {
    let mut router = Router::new().merge(routes::routes());
    if config.enable_swagger {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
