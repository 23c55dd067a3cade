//! Session lifecycle handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::SessionId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    state::{AppState, SharedSession},
};

/// Response for a newly started session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    pub session_id: SessionId,
}

/// Start a new session
#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    debug!(%session_id, "Session started");
    (StatusCode::CREATED, Json(SessionCreatedResponse { session_id }))
}

/// End a session
#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = parse_session_id(&id)?;
    if state.sessions.remove(&session_id).await {
        debug!(%session_id, "Session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(&session_id))
    }
}

pub(crate) fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::parse(raw).map_err(|_| ApiError::BadRequest(format!("Invalid session id: {raw}")))
}

fn session_not_found(id: &SessionId) -> ApiError {
    ApiError::NotFound(format!("Session {id} does not exist or has expired"))
}

/// Look up a live session from the raw path segment
pub(crate) async fn load_session(state: &AppState, raw: &str) -> Result<SharedSession, ApiError> {
    let session_id = parse_session_id(raw)?;
    state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| session_not_found(&session_id))
}
