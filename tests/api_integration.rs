//! Integration tests for the HTTP API
//!
//! Each test drives a fresh router over an in-memory store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use repquest::core::{
    create_router, create_router_with_grace, KeyValueStore, MemoryStore, ProgressStore,
};
use repquest::types::landmark::LEFT_WRIST;
use repquest::types::{Landmark, LandmarkFrame};
use repquest::{Error, MIN_LANDMARKS};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

/// Backend that reads as empty and refuses every write
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> repquest::Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> repquest::Result<()> {
        Err(Error::storage(
            key,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        ))
    }

    fn remove(&mut self, _key: &str) -> repquest::Result<()> {
        Ok(())
    }
}

fn create_test_router() -> Router {
    create_router(ProgressStore::new(MemoryStore::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn arm_frame(up: bool) -> Value {
    let mut frame = LandmarkFrame::new(vec![Landmark::new(0.5, 0.5); MIN_LANDMARKS]);
    frame.set(LEFT_WRIST, Landmark::new(0.6, if up { 0.1 } else { 0.7 }));
    json!({ "landmarks": frame })
}

async fn new_session(app: &Router, body: Value) -> String {
    let (status, json) = send(app, "POST", "/session/new", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["sessions_active"], 0);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_create_session() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        "POST",
        "/session/new",
        Some(json!({ "exercise": "squat", "target_reps": 10, "target_sets": "3" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exercise"], "squat");
    assert_eq!(json["targets"]["target_reps"], 10);
    assert_eq!(json["targets"]["target_sets"], 3);
    let id = json["session_id"].as_str().unwrap();
    assert_eq!(json["websocket_url"], format!("/ws/{}", id));

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["sessions_active"], 1);
}

#[tokio::test]
async fn test_unknown_exercise_is_rejected() {
    let app = create_test_router();
    let (status, json) =
        send(&app, "POST", "/session/new", Some(json!({ "exercise": "burpee" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("burpee"));
}

#[tokio::test]
async fn test_malformed_targets_mean_free_mode() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        "POST",
        "/session/new",
        Some(json!({ "exercise": "leftArm", "target_reps": "lots", "target_sets": -2 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exercise"], "leftArmRaise");
    assert_eq!(json["targets"]["target_reps"], 0);
    assert_eq!(json["targets"]["target_sets"], 0);
}

#[tokio::test]
async fn test_frames_count_reps() {
    let app = create_test_router();
    let id = new_session(&app, json!({ "exercise": "leftArmRaise" })).await;
    let uri = format!("/session/{}/frame", id);

    let (status, out) = send(&app, "POST", &uri, Some(arm_frame(true))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["rep"]["count"], 1);
    assert_eq!(out["state"], "IN_POSITION");
    assert_eq!(out["reason"], "R002_REP_COUNTED");

    let (_, out) = send(&app, "POST", &uri, Some(json!({ "landmarks": null }))).await;
    assert_eq!(out["reason"], "R001_NO_BODY");
    assert_eq!(out["progress"]["rep_count"], 1);

    send(&app, "POST", &uri, Some(arm_frame(false))).await;
    send(&app, "POST", &uri, Some(arm_frame(true))).await;

    let (status, status_json) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_json["rep_count"], 2);
    assert_eq!(status_json["workout_complete"], false);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = create_test_router();

    let (status, _) = send(&app, "GET", "/session/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/session/nope/frame", Some(arm_frame(true))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, "POST", "/session/nope/end", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_end_session_records_progress() {
    let app = create_test_router();
    let id = new_session(&app, json!({ "exercise": "leftArmRaise" })).await;
    let uri = format!("/session/{}/frame", id);
    for up in [true, false, true, false, true] {
        send(&app, "POST", &uri, Some(arm_frame(up))).await;
    }

    let (status, record) = send(&app, "POST", &format!("/session/{}/end", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["reps"], 3);
    assert_eq!(record["exercise"], "leftArmRaise");
    assert!(record["duration_seconds"].as_u64().unwrap() >= 1);

    // Ended sessions are gone
    let (status, _) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, streak) = send(&app, "GET", "/streak", None).await;
    assert_eq!(streak["streak"], 1);

    let (_, report) = send(&app, "GET", "/progress", None).await;
    assert_eq!(report["total_sessions"], 1);
    assert_eq!(report["total_reps"], 3);

    let (status, _) = send(&app, "DELETE", "/progress", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, report) = send(&app, "GET", "/progress", None).await;
    assert_eq!(report["total_sessions"], 0);
}

#[tokio::test]
async fn test_workout_complete_ends_session_after_grace() {
    let app = create_router_with_grace(
        ProgressStore::new(MemoryStore::new()),
        Duration::from_millis(100),
    );
    let id = new_session(
        &app,
        json!({ "exercise": "leftArmRaise", "target_reps": 2, "target_sets": 1 }),
    )
    .await;
    let uri = format!("/session/{}/frame", id);

    send(&app, "POST", &uri, Some(arm_frame(true))).await;
    send(&app, "POST", &uri, Some(arm_frame(false))).await;
    let (_, out) = send(&app, "POST", &uri, Some(arm_frame(true))).await;
    assert_eq!(out["set_event"]["event"], "workout_complete");
    assert_eq!(out["workout_complete"], true);

    // Still live during the grace delay
    let (status, _) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(500)).await;

    let (status, _) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, report) = send(&app, "GET", "/progress", None).await;
    assert_eq!(report["total_sessions"], 1);
    assert_eq!(report["total_reps"], 2);
}

#[tokio::test]
async fn test_failed_end_keeps_session_live() {
    let app = create_router(ProgressStore::new(ReadOnlyStore));
    let id = new_session(&app, json!({ "exercise": "leftArmRaise" })).await;
    let uri = format!("/session/{}/frame", id);
    send(&app, "POST", &uri, Some(arm_frame(true))).await;

    let (status, json) = send(&app, "POST", &format!("/session/{}/end", id), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("progress"));

    // Reps survive the failed save and the session keeps counting
    let (status, status_json) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_json["rep_count"], 1);

    send(&app, "POST", &uri, Some(arm_frame(false))).await;
    let (_, out) = send(&app, "POST", &uri, Some(arm_frame(true))).await;
    assert_eq!(out["rep"]["count"], 2);

    let (status, _) = send(&app, "POST", &format!("/session/{}/end", id), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["sessions_active"], 1);
}
