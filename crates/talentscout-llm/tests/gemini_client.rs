use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use talentscout_llm::{GeminiClient, GenerationConfig, GenerationError, Generator};

#[derive(Clone, Default)]
struct Captured {
    keys: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn generate_ok(
    State(captured): State<Captured>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    captured
        .keys
        .lock()
        .unwrap()
        .push(query.get("key").cloned().unwrap_or_default());
    captured.bodies.lock().unwrap().push(body);

    Json(json!({
        "candidates": [{
            "content": {"parts": [{"text": "1. What is a closure?\n2. Explain pointers."}], "role": "model"},
            "finishReason": "STOP"
        }]
    }))
}

async fn generate_quota() -> impl IntoResponse {
    (StatusCode::TOO_MANY_REQUESTS, "quota exceeded")
}

async fn generate_blocked() -> Json<Value> {
    Json(json!({"promptFeedback": {"blockReason": "SAFETY"}}))
}

/// Serve a stub endpoint on an ephemeral port and return its base URL
async fn spawn_endpoint(captured: Captured) -> String {
    let router = Router::new()
        .route("/ok", post(generate_ok))
        .route("/quota", post(generate_quota))
        .route("/blocked", post(generate_blocked))
        .with_state(captured);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_generate_returns_first_candidate_text() {
    let captured = Captured::default();
    let base = spawn_endpoint(captured.clone()).await;

    let client = GeminiClient::new(format!("{}/ok", base), "secret-key")
        .with_config(GenerationConfig::default().with_max_output_tokens(256));
    let text = client.generate("Questions about Rust").await.unwrap();

    assert_eq!(text, "1. What is a closure?\n2. Explain pointers.");
    assert_eq!(*captured.keys.lock().unwrap(), vec!["secret-key".to_string()]);

    let bodies = captured.bodies.lock().unwrap();
    assert_eq!(
        bodies[0]["contents"][0]["parts"][0]["text"],
        "Questions about Rust"
    );
    assert_eq!(bodies[0]["generationConfig"]["maxOutputTokens"], 256);
    assert_eq!(bodies[0]["generationConfig"]["stopSequences"], json!([]));
}

#[tokio::test]
async fn test_generate_appends_key_to_key_terminated_endpoint() {
    let captured = Captured::default();
    let base = spawn_endpoint(captured.clone()).await;

    let client = GeminiClient::new(format!("{}/ok?key=", base), "abc123");
    client.generate("hello").await.unwrap();

    assert_eq!(*captured.keys.lock().unwrap(), vec!["abc123".to_string()]);
}

#[tokio::test]
async fn test_generate_non_success_status() {
    let base = spawn_endpoint(Captured::default()).await;

    let client = GeminiClient::new(format!("{}/quota", base), "k");
    let err = client.generate("hello").await.unwrap_err();

    assert_eq!(
        err,
        GenerationError::Status {
            status: 429,
            body: "quota exceeded".to_string()
        }
    );
}

#[tokio::test]
async fn test_generate_unexpected_body_shape() {
    let base = spawn_endpoint(Captured::default()).await;

    let client = GeminiClient::new(format!("{}/blocked", base), "k");
    let err = client.generate("hello").await.unwrap_err();

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_generate_unreachable_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new(format!("http://{}/ok", addr), "k");
    let err = client.generate("hello").await.unwrap_err();

    assert!(matches!(err, GenerationError::Transport(_)));
}
