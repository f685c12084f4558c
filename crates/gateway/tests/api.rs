mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{harness, reply, FakeForum, ScriptedProvider};
use fc_domain::error::Error;
use fc_gateway::api;

fn app(h: &common::Harness) -> Router {
    api::router().with_state(h.state.clone())
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let h = harness(ScriptedProvider::default(), FakeForum::default());
    let (status, body) = call(app(&h), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn send_then_read_back() {
    let h = harness(
        ScriptedProvider::default().then(Ok(reply("Hello! How can I help you today?"))),
        FakeForum::default(),
    );

    let (status, sent) = call(
        app(&h),
        post(
            "/api/chat/send",
            json!({"userId": "user123", "message": "Hello"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent["message"], "Hello! How can I help you today?");
    assert_eq!(sent["userId"], "user123");
    assert!(sent["timestamp"].as_i64().unwrap() > 0);
    let session_id = sent["sessionId"].as_str().unwrap().to_owned();

    let (status, session) = call(app(&h), get(&format!("/api/chat/session/{session_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["sessionId"], session_id.as_str());
    assert_eq!(session["messages"][0]["role"], "user");
    assert_eq!(session["messages"][1]["role"], "assistant");

    let (status, sessions) = call(app(&h), get("/api/chat/sessions/user123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sessions.as_array().unwrap().len(), 1);

    let (status, summaries) = call(app(&h), get("/api/chat/sessions/user123/summaries")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summaries[0]["messageCount"], 2);
    assert_eq!(summaries[0]["lastMessageRole"], "assistant");

    let (status, history) = call(
        app(&h),
        get(&format!("/api/chat/session/{session_id}/history?limit=1")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["content"], "Hello! How can I help you today?");

    let (_, full) = call(
        app(&h),
        get(&format!("/api/chat/session/{session_id}/history")),
    )
    .await;
    assert_eq!(full.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let h = harness(ScriptedProvider::default(), FakeForum::default());

    let (status, body) = call(
        app(&h),
        post("/api/chat/send", json!({"userId": "", "message": "Hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("User ID is required"));

    let (status, _) = call(
        app(&h),
        post("/api/chat/send", json!({"userId": "u1", "message": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        app(&h),
        post("/api/chat/continue", json!({"message": "Hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.provider.calls(), 0);
}

#[tokio::test]
async fn unknown_session_is_404() {
    let h = harness(ScriptedProvider::default(), FakeForum::default());

    let (status, body) = call(
        app(&h),
        post(
            "/api/chat/send",
            json!({"userId": "u1", "message": "Hello", "sessionId": "missing"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("missing"));

    let (status, _) = call(app(&h), get("/api/chat/session/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(app(&h), get("/api/chat/session/missing/history")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        app(&h),
        post(
            "/api/chat/continue",
            json!({"sessionId": "missing", "message": "Hello"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn continue_with_owner_starts_new_session() {
    let h = harness(ScriptedProvider::default(), FakeForum::default());

    let (status, body) = call(
        app(&h),
        post(
            "/api/chat/continue",
            json!({"sessionId": "missing", "message": "Hello", "userId": "u1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["sessionId"], "missing");
    assert_eq!(body["userId"], "u1");
}

#[tokio::test]
async fn provider_failures_map_to_gateway_statuses() {
    let h = harness(
        ScriptedProvider::default()
            .then(Err(Error::Provider {
                provider: "scripted".into(),
                message: "HTTP 500 - boom".into(),
            }))
            .then(Err(Error::Timeout("slow".into()))),
        FakeForum::default(),
    );
    let body = json!({"userId": "u1", "message": "Hello"});

    let (status, _) = call(app(&h), post("/api/chat/send", body.clone())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, _) = call(app(&h), post("/api/chat/send", body)).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

    assert_eq!(h.store.saves(), 0);
}

#[tokio::test]
async fn empty_user_has_no_sessions() {
    let h = harness(ScriptedProvider::default(), FakeForum::default());
    let (status, body) = call(app(&h), get("/api/chat/sessions/nobody/summaries")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
