use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use tinyhome_api::{build_router, AppState, ChatClient, ChatCompletion, Config, LlmError};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn config_with_key(api_key: Option<&str>, api_url: String) -> Config {
    let mut config = Config::from_lookup(|_| None).unwrap();
    config.llm.api_key = api_key.map(str::to_string);
    config.llm.api_url = api_url;
    config
}

fn router_for(server: &MockServer, api_key: Option<&str>) -> Router {
    let config = config_with_key(api_key, server.url(COMPLETIONS_PATH));
    let llm = ChatClient::new(config.llm.clone()).unwrap();
    build_router(AppState {
        llm: Arc::new(llm),
        config,
    })
}

async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn completion_with(content: &str) -> Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

#[tokio::test]
async fn test_generate_layout_returns_layout() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(COMPLETIONS_PATH)
                .body_contains("- People: 4")
                .body_contains("- Style: Scandinavian");
            then.status(200).json_body(completion_with(
                r#"{"explanation":"Bunk room plus galley","rooms":[{"name":"Bunks","x":0,"y":0,"width":2.4,"length":2,"height":2.4,"features":["bed"]}]}"#,
            ));
        })
        .await;

    let body = json!({
        "num_people": "4",
        "budget": 65000,
        "needs": "bunk beds",
        "style": "Scandinavian"
    });
    let (status, value) = post_json(
        router_for(&server, Some("gsk_test")),
        "/generate-layout",
        body.to_string(),
    )
    .await;

    api_mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["explanation"], "Bunk room plus galley");
    assert_eq!(value["rooms"][0]["name"], "Bunks");
    assert!(value.get("error").is_none());
}

#[tokio::test]
async fn test_generate_layout_unparseable_reply_is_still_200() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200)
                .json_body(completion_with("Sorry, I can't help."));
        })
        .await;

    let (status, value) = post_json(
        router_for(&server, Some("gsk_test")),
        "/generate-layout",
        json!({"num_people": 1, "budget": "", "needs": ""}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["error"], "ParseError");
    assert_eq!(value["rooms"], json!([]));
    assert_eq!(value["raw"], "Sorry, I can't help.");
    assert!(value["explanation"].is_string());
}

#[tokio::test]
async fn test_generate_layout_without_key_is_configuration_error() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200).json_body(completion_with("{}"));
        })
        .await;

    let (status, value) = post_json(
        router_for(&server, None),
        "/generate-layout",
        json!({"num_people": 2, "budget": "50000", "needs": "kitchen"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["error"], "ConfigurationError");
    assert_eq!(value["rooms"], json!([]));
    assert_eq!(api_mock.hits_async().await, 0);
}

/// JSON bodies that parse but are not objects.
const NON_OBJECT_BODIES: [&str; 4] = ["[1, 2, 3]", "\"hello\"", "42", "null"];

#[tokio::test]
async fn test_generate_layout_non_object_body_never_reaches_model() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200).json_body(completion_with("{}"));
        })
        .await;

    for body in NON_OBJECT_BODIES {
        let (status, value) = post_json(
            router_for(&server, Some("gsk_test")),
            "/generate-layout",
            body.to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body = {body}");
        assert_eq!(value["error"], "InternalError", "body = {body}");
        assert_eq!(value["rooms"], json!([]), "body = {body}");
        assert!(value["explanation"].is_string(), "body = {body}");
    }
    assert_eq!(api_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_generate_design_non_object_body_never_reaches_model() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200).json_body(completion_with("A design."));
        })
        .await;

    for body in NON_OBJECT_BODIES {
        let (status, value) = post_json(
            router_for(&server, Some("gsk_test")),
            "/generate-design",
            body.to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body = {body}");
        assert_eq!(value["error"], "InternalError", "body = {body}");
        assert!(value.get("design").is_none(), "body = {body}");
    }
    assert_eq!(api_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_generate_layout_keeps_integer_coordinates() {
    let server = MockServer::start_async().await;
    let layout = json!({
        "explanation": "One room",
        "rooms": [{"name": "Bed", "x": 0, "y": 0, "width": 3, "length": 3, "height": 2.5, "features": []}]
    });
    server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200)
                .json_body(completion_with(&format!("```json\n{layout}\n```")));
        })
        .await;

    let (status, value) = post_json(
        router_for(&server, Some("gsk_test")),
        "/generate-layout",
        json!({"num_people": 1}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, layout);
}

#[tokio::test]
async fn test_generate_design_returns_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(COMPLETIONS_PATH)
                .body_contains("You are an expert in tiny home design.");
            then.status(200)
                .json_body(completion_with("A 20ft trailer home with a sleeping loft."));
        })
        .await;

    let (status, value) = post_json(
        router_for(&server, Some("gsk_test")),
        "/generate-design",
        json!({"num_people": 2, "budget": "$40,000", "needs": "solar", "climate": "Hot and humid"})
            .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"design": "A 20ft trailer home with a sleeping loft."}));
}

struct PanickingLlm;

#[async_trait]
impl ChatCompletion for PanickingLlm {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
        panic!("backend exploded");
    }
}

#[tokio::test]
async fn test_panicking_backend_becomes_internal_error() {
    let app = build_router(AppState {
        llm: Arc::new(PanickingLlm),
        config: config_with_key(Some("gsk_test"), "http://127.0.0.1:9/unused".to_string()),
    });

    let (status, value) = post_json(
        app,
        "/generate-layout",
        json!({"num_people": 2}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["error"], "InternalError");
    assert_eq!(value["rooms"], json!([]));
}

#[tokio::test]
async fn test_health_reports_configuration() {
    let app = build_router(AppState {
        llm: Arc::new(PanickingLlm),
        config: config_with_key(None, "http://127.0.0.1:9/unused".to_string()),
    });

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["service"], "tinyhome-api");
    assert_eq!(value["llm_configured"], false);
}
