//! Integration tests — build the router over a temp database and drive
//! the wire contract end-to-end.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use polychat_api::AppState;
use polychat_api::http::router::build_router;
use polychat_types::config::GlobalConfig;

async fn test_state() -> AppState {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let config = GlobalConfig {
        database_url: Some(format!("sqlite://{}?mode=rwc", db_path.display())),
        ..GlobalConfig::default()
    };
    let state = AppState::init_with(config, dir.path()).await.unwrap();
    std::mem::forget(dir);
    state
}

async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (build_router(state.clone()), state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn insert_active_subscription(state: &AppState, user_id: &str) {
    sqlx::query(
        "INSERT INTO subscriptions (id, user_id, status, price_id, created_at) VALUES (?, ?, 'active', 'price_pro', ?)",
    )
    .bind(uuid::Uuid::now_v7().to_string())
    .bind(user_id)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(&state.db_pool.writer)
    .await
    .unwrap();
}

#[tokio::test]
async fn missing_field_yields_400_with_exact_body() {
    let (app, _) = test_app().await;

    // No message field at all.
    let req = post_json("/api/chat", json!({"model": "gpt-4", "userId": "u1"}));
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "Missing required fields"})
    );
}

#[tokio::test]
async fn empty_field_yields_400() {
    let (app, _) = test_app().await;

    let req = post_json(
        "/api/chat",
        json!({"message": "", "model": "gpt-4", "userId": "u1"}),
    );
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn premium_model_without_subscription_yields_403() {
    let (app, _) = test_app().await;

    for model in ["gpt-4", "claude-3"] {
        let req = post_json(
            "/api/chat",
            json!({"message": "hi", "model": model, "userId": "u1"}),
        );
        let resp = app.clone().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{model}");
        assert_eq!(
            body_json(resp).await,
            json!({"error": "Premium subscription required for this model"})
        );
    }
}

#[tokio::test]
async fn premium_model_with_subscription_reaches_responder() {
    let (app, state) = test_app().await;
    insert_active_subscription(&state, "u1").await;

    let req = post_json(
        "/api/chat",
        json!({"message": "hi", "model": "gpt-4", "userId": "u1"}),
    );
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("[GPT-4]"), "unexpected reply: {message}");
}

#[tokio::test]
async fn free_model_needs_no_subscription() {
    let (app, _) = test_app().await;

    let req = post_json(
        "/api/chat",
        json!({"message": "hi", "model": "olmo-2", "userId": "u1"}),
    );
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["message"].as_str().unwrap().starts_with("[OLMo]"));
}

#[tokio::test]
async fn unknown_model_gets_exact_fallback_reply() {
    let (app, _) = test_app().await;

    let req = post_json(
        "/api/chat",
        json!({"message": "hi", "model": "llama-9", "userId": "u1"}),
    );
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"message": "I'm not sure how to respond to that."})
    );
}

#[tokio::test]
async fn echo_truncates_long_input_at_50_chars() {
    let (app, _) = test_app().await;

    let req = post_json(
        "/api/chat",
        json!({"message": "a".repeat(60), "model": "sea-lion", "userId": "u1"}),
    );
    let resp = app.oneshot(req).await.unwrap();

    let body = body_json(resp).await;
    let expected = format!("\"{}...\"", "a".repeat(50));
    assert!(body["message"].as_str().unwrap().contains(&expected));
}

#[tokio::test]
async fn models_endpoint_lists_catalog() {
    let (app, _) = test_app().await;

    let req = Request::builder()
        .uri("/api/models")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let models = body.as_array().unwrap();
    assert_eq!(models.len(), 4);
    assert!(models.iter().any(|m| m["id"] == "sea-lion"));
}

#[tokio::test]
async fn message_history_feedback_and_clear_flow() {
    let (app, _) = test_app().await;

    // Persist a user turn and an assistant turn.
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/users/u1/messages",
            json!({"role": "user", "content": "hello", "model": "gpt-4"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/users/u1/messages",
            json!({"role": "assistant", "content": "[GPT-4] hi", "model": "gpt-4"}),
        ))
        .await
        .unwrap();
    let assistant = body_json(resp).await;
    let assistant_id = assistant["id"].as_str().unwrap().to_string();

    // Feedback: toggle positive, then overwrite with negative.
    for feedback in ["positive", "negative"] {
        let req = Request::builder()
            .method("PUT")
            .uri(format!("/api/messages/{assistant_id}/feedback"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"feedback": feedback}).to_string()))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = Request::builder()
        .uri("/api/users/u1/messages")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let history = body_json(resp).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["feedback"], "negative");

    // Clear and verify a subsequent load is empty.
    let req = Request::builder()
        .method("DELETE")
        .uri("/api/users/u1/messages")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(body_json(resp).await, json!({"deleted": 2}));

    let req = Request::builder()
        .uri("/api/users/u1/messages")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn feedback_on_unknown_message_yields_404() {
    let (app, _) = test_app().await;

    let req = Request::builder()
        .method("PUT")
        .uri(format!(
            "/api/messages/{}/feedback",
            uuid::Uuid::now_v7()
        ))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"feedback": "positive"}).to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_unconfigured_yields_500() {
    let (app, _) = test_app().await;

    let req = post_json(
        "/api/checkout",
        json!({"price_id": "price_pro", "user_id": "u1", "return_url": "https://app.example.com/dashboard"}),
    );
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (app, _) = test_app().await;

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}
