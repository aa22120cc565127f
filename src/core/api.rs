//! HTTP + WebSocket API for exercise sessions
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /session/new - Start a session
//! - GET /session/:id - Session status
//! - POST /session/:id/frame - Feed one landmark frame
//! - POST /session/:id/end - End and record the session
//! - GET /progress - Progress report
//! - DELETE /progress - Clear history and streak
//! - GET /streak - Current streak
//! - WS /ws/:id - Live frame outputs

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::TargetConfig;
use crate::core::{ProgressReport, ProgressStore, SessionContext, SessionRecorder};
use crate::types::{ExerciseKind, FrameEvent, FrameOutput, FramePayload, SessionRecord, SetEvent, SetState, StreakState};
use crate::{Error, WORKOUT_COMPLETE_GRACE_MS};

/// One live session
#[derive(Debug)]
pub struct ActiveSession {
    pub id: String,
    pub context: SessionContext,
    pub update_tx: broadcast::Sender<FrameOutput>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, ActiveSession>>,
    /// Store access runs on the blocking pool, holding an owned guard
    pub recorder: Arc<Mutex<SessionRecorder>>,
    /// Delay between workout-complete and automatic end
    pub grace: Duration,
}

/// Create new session request
#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    pub exercise: String,
    #[serde(default)]
    pub target_reps: Option<Value>,
    #[serde(default)]
    pub target_sets: Option<Value>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub exercise: ExerciseKind,
    pub targets: TargetConfig,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub exercise: ExerciseKind,
    pub state: String,
    pub rep_count: u32,
    pub progress: SetState,
    pub workout_complete: bool,
    pub elapsed_secs: i64,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Error body: `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err {
            Error::UnknownExercise(_) => StatusCode::BAD_REQUEST,
            Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Error::Storage { .. } | Error::Serialization { .. } | Error::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

/// Create the API router over a progress store
pub fn create_router(store: ProgressStore) -> Router {
    create_router_with_grace(store, Duration::from_millis(WORKOUT_COMPLETE_GRACE_MS))
}

/// Create the API router with a custom auto-end delay
pub fn create_router_with_grace(store: ProgressStore, grace: Duration) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        recorder: Arc::new(Mutex::new(SessionRecorder::new(store))),
        grace,
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/frame", post(add_frame))
        .route("/session/:id/end", post(end_session))
        .route("/progress", get(get_progress).delete(clear_progress))
        .route("/streak", get(get_streak))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Start a new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, ApiError> {
    let exercise: ExerciseKind = req.exercise.parse()?;
    let targets = TargetConfig::from_json(req.target_reps.as_ref(), req.target_sets.as_ref());

    let session_id = format!("session_{}", Uuid::new_v4().simple());
    let (tx, _) = broadcast::channel(100);

    let session = ActiveSession {
        id: session_id.clone(),
        context: SessionContext::start(exercise, targets),
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        exercise,
        targets,
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| Error::SessionNotFound(id.clone()))?;
    let ctx = &session.context;

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        exercise: ctx.exercise(),
        state: ctx.state().to_string(),
        rep_count: ctx.rep_count(),
        progress: ctx.progress(),
        workout_complete: ctx.is_workout_complete(),
        elapsed_secs: (Utc::now() - ctx.started_at()).num_seconds(),
    }))
}

/// Feed one frame to a session
async fn add_frame(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<FramePayload>,
) -> Result<Json<FrameOutput>, ApiError> {
    let event = FrameEvent::from(payload);

    let output = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| Error::SessionNotFound(id.clone()))?;
        let output = session.context.process(&event);
        // No subscribers is fine
        let _ = session.update_tx.send(output.clone());
        output
    };

    if matches!(output.set_event, Some(SetEvent::WorkoutComplete { .. })) {
        schedule_auto_end(state.clone(), id);
    }

    Ok(Json(output))
}

/// End the session after the grace delay, unless it was ended already
fn schedule_auto_end(state: Arc<AppState>, id: String) {
    tokio::spawn(async move {
        tokio::time::sleep(state.grace).await;
        match finish_session(&state, &id).await {
            Ok(record) => info!(session = %id, record = %record.id, "session ended after workout complete"),
            Err(Error::SessionNotFound(_)) => {}
            Err(e) => warn!(session = %id, error = %e, "automatic session end failed, session kept"),
        }
    });
}

/// Run store work on the blocking pool with exclusive access to the recorder
async fn with_recorder<T, F>(state: &AppState, work: F) -> Result<T, Error>
where
    F: FnOnce(&mut SessionRecorder) -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    let mut recorder = state.recorder.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || work(&mut *recorder)).await?
}

/// Record the session, then drop it. On a store failure the session stays
/// live so the caller can retry the end.
async fn finish_session(state: &AppState, id: &str) -> Result<SessionRecord, Error> {
    let mut sessions = state.sessions.write().await;
    let context = sessions
        .get(id)
        .map(|session| session.context.clone())
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

    let record = with_recorder(state, move |recorder| recorder.finish(&context)).await?;
    sessions.remove(id);
    Ok(record)
}

/// End a session and record it
async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionRecord>, ApiError> {
    let record = finish_session(&state, &id).await?;
    Ok(Json(record))
}

/// Progress report over the whole history
async fn get_progress(State(state): State<Arc<AppState>>) -> Result<Json<ProgressReport>, ApiError> {
    let report = with_recorder(&state, |recorder| {
        let store = recorder.store();
        Ok(ProgressReport::build(&store.sessions()?, &store.streak()?, Utc::now()))
    })
    .await?;
    Ok(Json(report))
}

/// Clear history and streak
async fn clear_progress(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    with_recorder(&state, |recorder| recorder.store_mut().clear()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current streak
async fn get_streak(State(state): State<Arc<AppState>>) -> Result<Json<StreakState>, ApiError> {
    let streak = with_recorder(&state, |recorder| recorder.store().streak()).await?;
    Ok(Json(streak))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| Error::SessionNotFound(id.clone()))?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward frame outputs until the session ends or the client leaves
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<FrameOutput>) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(output) => {
                    let json = serde_json::to_string(&output).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket client lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
}

/// Run the API server
pub async fn run_server(addr: &str, store: ProgressStore) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "RepQuest API running");
    info!("  POST   /session/new        - Start session");
    info!("  GET    /session/:id        - Get status");
    info!("  POST   /session/:id/frame  - Add frame");
    info!("  POST   /session/:id/end    - End session");
    info!("  GET    /progress           - Progress report");
    info!("  DELETE /progress           - Clear progress");
    info!("  GET    /streak             - Current streak");
    info!("  WS     /ws/:id             - Live updates");
    axum::serve(listener, router).await?;
    Ok(())
}
