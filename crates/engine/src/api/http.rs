//! Wizard API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use artisan_domain::{DataUri, SessionId};
use artisan_shared::{
    share_link, EventOutcome, ImageUploadRequest, MessageDto, SessionSnapshot, SettingRequest,
    StorefrontView, TextMessageRequest,
};

use crate::app::App;
use crate::use_cases::{EventResult, SessionError, SessionState, SETTING_PRESETS};

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/messages", post(submit_text))
        .route("/api/sessions/{id}/image", post(upload_image))
        .route("/api/sessions/{id}/setting", post(select_setting))
        .route("/api/settings/presets", get(setting_presets))
        .route("/api/storefront", get(storefront_view))
}

/// Liveness plus a best-effort image-provider probe. Always 200; a down
/// provider is reported, not treated as our own failure.
async fn health(State(app): State<Arc<App>>) -> Json<serde_json::Value> {
    let image_model = matches!(app.image_model.check_health().await, Ok(true));
    Json(serde_json::json!({
        "status": "ok",
        "imageModel": if image_model { "up" } else { "down" },
    }))
}

async fn create_session(
    State(app): State<Arc<App>>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let state = app.sessions.create().await;
    (StatusCode::CREATED, Json(to_snapshot(state)))
}

async fn get_session(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, (StatusCode, String)> {
    let id = parse_session_id(&id)?;
    let state = app.sessions.snapshot(id).await.map_err(map_session_error)?;
    Ok(Json(to_snapshot(state)))
}

async fn submit_text(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Json(req): Json<TextMessageRequest>,
) -> Result<Json<EventOutcome>, (StatusCode, String)> {
    let id = parse_session_id(&id)?;
    let result = app
        .sessions
        .submit_text(id, req.text)
        .await
        .map_err(map_session_error)?;
    Ok(Json(to_outcome(result)))
}

async fn upload_image(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Json(req): Json<ImageUploadRequest>,
) -> Result<Json<EventOutcome>, (StatusCode, String)> {
    let id = parse_session_id(&id)?;
    let data_uri = DataUri::parse(&req.data_uri)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let result = app
        .sessions
        .upload_image(id, req.file_name, data_uri)
        .await
        .map_err(map_session_error)?;
    Ok(Json(to_outcome(result)))
}

async fn select_setting(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Json(req): Json<SettingRequest>,
) -> Result<Json<EventOutcome>, (StatusCode, String)> {
    let id = parse_session_id(&id)?;
    let result = app
        .sessions
        .select_setting(id, req.setting)
        .await
        .map_err(map_session_error)?;
    Ok(Json(to_outcome(result)))
}

async fn setting_presets() -> Json<Vec<String>> {
    Json(SETTING_PRESETS.iter().map(|s| s.to_string()).collect())
}

#[derive(Debug, Deserialize)]
struct StorefrontQuery {
    data: Option<String>,
}

/// Decode a storefront share link.
///
/// A malformed payload is a display state, not an error status: the page
/// shows "corrupted" instead of crashing.
async fn storefront_view(Query(query): Query<StorefrontQuery>) -> Json<StorefrontView> {
    let Some(data) = query.data else {
        return Json(StorefrontView::Corrupted {
            message: "Could not load storefront data. It might be corrupted.".to_string(),
        });
    };

    match share_link::decode_storefront(&data) {
        Ok(storefront) => Json(StorefrontView::Ready { storefront }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode storefront share link");
            Json(StorefrontView::Corrupted {
                message: "Could not load storefront data. It might be corrupted.".to_string(),
            })
        }
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, (StatusCode, String)> {
    Uuid::parse_str(raw)
        .map(SessionId::from_uuid)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))
}

fn map_session_error(error: SessionError) -> (StatusCode, String) {
    match error {
        SessionError::NotFound(_) => (StatusCode::NOT_FOUND, error.to_string()),
    }
}

fn to_snapshot(state: SessionState) -> SessionSnapshot {
    SessionSnapshot {
        session_id: state.id.to_string(),
        step: state.step,
        messages: state.messages.iter().map(MessageDto::from).collect(),
    }
}

fn to_outcome(result: EventResult) -> EventOutcome {
    EventOutcome {
        accepted: result.accepted,
        step: result.step,
        messages: result.messages.iter().map(MessageDto::from).collect(),
    }
}
