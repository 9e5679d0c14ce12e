use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use textflow::llm::ScriptedModelClient;
use textflow::{ModelCatalog, ModelError, WorkflowService, WorkflowSettings};
use textflow_api::config::CorsConfig;
use textflow_api::{ApiConfig, AppState, build_app};
use tower::util::ServiceExt;

/// Create a test application backed by a scripted model client
fn create_test_app(client: Arc<ScriptedModelClient>) -> axum::Router {
    create_test_app_with_config(client, &ApiConfig::default())
}

fn create_test_app_with_config(client: Arc<ScriptedModelClient>, config: &ApiConfig) -> axum::Router {
    let catalog = ModelCatalog::from_pairs([("phi3", "phi3:mini"), ("llama3", "llama3:8b")]);
    let service = WorkflowService::builder()
        .catalog(catalog)
        .client(client)
        .settings(WorkflowSettings {
            max_sentiment_attempts: 3,
        })
        .build()
        .unwrap();
    build_app(AppState::new(Arc::new(service)), config)
}

/// Helper function to make JSON requests
async fn json_request(app: axum::Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body: Value = if body_bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&body_bytes)
            .unwrap_or_else(|_| json!(String::from_utf8_lossy(&body_bytes).to_string()))
    };

    (status, body)
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    json_request(app, "POST", uri, Body::from(body.to_string())).await
}

#[tokio::test]
async fn test_sentiment_single_sentence() {
    let client = Arc::new(ScriptedModelClient::new(["Positive"]));
    let app = create_test_app(client.clone());

    let (status, body) = post_json(app, "/sentiment", json!({"text": "Great!"})).await;

    assert_eq!(status, StatusCode::OK);
    let counts = &body["response"];
    let sum = counts["positive"].as_u64().unwrap()
        + counts["negative"].as_u64().unwrap()
        + counts["neutral"].as_u64().unwrap();
    assert_eq!(sum, 1);
    assert_eq!(counts["positive"], 1);
    assert_eq!(counts["unclassified"], 0);
    assert_eq!(client.requests()[0].model, "phi3:mini");
}

#[tokio::test]
async fn test_sentiment_reports_unclassified_sentences() {
    let client = Arc::new(
        ScriptedModelClient::new(["positive", "negative", "positive"]).with_fallback("no idea"),
    );
    let app = create_test_app(client.clone());

    let (status, body) = post_json(
        app,
        "/sentiment",
        json!({"text": "I love this. I hate that! What a day. Hmm?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["response"],
        json!({"positive": 2, "negative": 1, "neutral": 0, "unclassified": 1})
    );
    assert_eq!(client.calls(), 3 + 3);
}

#[tokio::test]
async fn test_translate_returns_text() {
    let client = Arc::new(ScriptedModelClient::new(["Good morning"]));
    let app = create_test_app(client.clone());

    let (status, body) = post_json(
        app,
        "/translate",
        json!({"text": "Buenos días", "model": "llama3"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": "Good morning"}));
    assert_eq!(client.requests()[0].model, "llama3:8b");
}

#[tokio::test]
async fn test_poem_returns_text() {
    let client = Arc::new(ScriptedModelClient::new(["Waves fold\ninto foam"]));
    let app = create_test_app(client);

    let (status, body) = post_json(app, "/poem", json!({"text": "the sea"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Waves fold\ninto foam");
}

#[tokio::test]
async fn test_translate_missing_text_is_bad_request() {
    let client = Arc::new(ScriptedModelClient::new(["unused"]));
    let app = create_test_app(client.clone());

    let (status, body) = post_json(app, "/translate", json!({"model": "phi3"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_test_app(Arc::new(ScriptedModelClient::new(["unused"])));

    let (status, body) = json_request(app, "POST", "/poem", Body::from("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_model_is_bad_request() {
    let client = Arc::new(ScriptedModelClient::new(["unused"]));
    let app = create_test_app(client.clone());

    let (status, body) = post_json(
        app,
        "/sentiment",
        json!({"text": "Fine.", "model": "gpt-4"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("gpt-4"));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_blank_text_is_bad_request() {
    let app = create_test_app(Arc::new(ScriptedModelClient::new(["unused"])));

    let (status, _) = post_json(app, "/poem", json!({"text": "   "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_backend_failure_is_bad_gateway() {
    let app = create_test_app(Arc::new(ScriptedModelClient::failing()));

    let (status, body) = post_json(app, "/translate", json!({"text": "Hola"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
    assert!(body.get("response").is_none());
}

#[tokio::test]
async fn test_model_missing_on_backend_is_bad_gateway() {
    let client = Arc::new(ScriptedModelClient::failing_with(ModelError::Status {
        status: 404,
        body: "model 'phi3:mini' not found".to_string(),
    }));
    let app = create_test_app(client);

    let (status, body) = post_json(app, "/sentiment", json!({"text": "Fine."})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("not available on backend"));
    assert!(error.contains("404"));
}

#[tokio::test]
async fn test_get_on_workflow_route_is_not_allowed() {
    let app = create_test_app(Arc::new(ScriptedModelClient::new(["unused"])));

    let (status, _) = json_request(app, "GET", "/sentiment", Body::empty()).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_lists_models() {
    let app = create_test_app(Arc::new(ScriptedModelClient::new(["unused"])));

    let (status, body) = json_request(app, "GET", "/health", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "textflow-api");
    assert_eq!(body["models"], json!(["llama3", "phi3"]));
}

#[tokio::test]
async fn test_openapi_document_lists_workflows() {
    let app = create_test_app(Arc::new(ScriptedModelClient::new(["unused"])));

    let (status, body) = json_request(app, "GET", "/api-docs/openapi.json", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    for path in ["/translate", "/sentiment", "/poem", "/health"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
}

#[tokio::test]
async fn test_swagger_can_be_disabled() {
    let config = ApiConfig {
        enable_swagger: false,
        ..Default::default()
    };
    let app = create_test_app_with_config(Arc::new(ScriptedModelClient::new(["unused"])), &config);

    let (status, _) =
        json_request(app.clone(), "GET", "/api-docs/openapi.json", Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json_request(app, "GET", "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
}

/// Send a GET with an `Origin` header and return the allowed origin, if any
async fn allowed_origin(app: axum::Router, origin: &str) -> Option<String> {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("origin", origin)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get("access-control-allow-origin")
        .map(|value| value.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_cors_origin_list() {
    let config = ApiConfig {
        cors: CorsConfig {
            allowed_origins: vec![
                "http://app.example".to_string(),
                "bad\norigin".to_string(),
            ],
            allow_any_origin: false,
        },
        ..Default::default()
    };
    let app = create_test_app_with_config(Arc::new(ScriptedModelClient::new(["unused"])), &config);

    assert_eq!(
        allowed_origin(app.clone(), "http://app.example").await.as_deref(),
        Some("http://app.example")
    );
    assert_eq!(allowed_origin(app, "http://other.example").await, None);
}

#[tokio::test]
async fn test_cors_permissive_by_default() {
    let app = create_test_app(Arc::new(ScriptedModelClient::new(["unused"])));

    assert_eq!(
        allowed_origin(app, "http://other.example").await.as_deref(),
        Some("*")
    );
}
