/**
 * Generator Control and Hub Statistics
 *
 * - `GET /api/logs/dummy/status` → `{"active": bool}`
 * - `POST /api/logs/dummy` with `{"enable": bool}` → `{"message": ...}`
 * - `GET /api/logs/stats` → hub counters
 *
 * Toggling into the current state is not an error: the response simply says
 * `Already active` / `Already inactive`. An empty body or a missing `enable`
 * field means `false`. Invalid JSON or a non-boolean `enable` is rejected
 * with 400, and enabling during shutdown answers 503.
 */

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::hub::{HubStats, LogHub};
use crate::backend::producers::{DemoGenerator, Toggle};
use crate::shared::SharedError;

#[derive(Debug, Default, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub enable: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ToggleResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub active: bool,
}

/// Decode the toggle body. An empty body is a request to disable.
pub fn parse_toggle(body: &[u8]) -> Result<ToggleRequest, SharedError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ToggleRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}

/// Handle generator status (GET /api/logs/dummy/status)
pub async fn dummy_status(State(generator): State<DemoGenerator>) -> Json<StatusResponse> {
    Json(StatusResponse {
        active: generator.is_running().await,
    })
}

/// Handle generator toggle (POST /api/logs/dummy)
pub async fn toggle_dummy(
    State(generator): State<DemoGenerator>,
    body: Bytes,
) -> Result<Json<ToggleResponse>, BackendError> {
    let request = parse_toggle(&body).map_err(|e| {
        tracing::warn!("[Generator] Rejected toggle request: {}", e);
        BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request")
    })?;

    let outcome = if request.enable {
        generator.enable().await
    } else {
        generator.disable().await
    };
    if outcome == Toggle::Unavailable {
        return Err(BackendError::handler(
            StatusCode::SERVICE_UNAVAILABLE,
            outcome.message(),
        ));
    }

    Ok(Json(ToggleResponse {
        message: outcome.message().to_string(),
    }))
}

/// Handle hub statistics (GET /api/logs/stats)
pub async fn hub_stats(State(hub): State<LogHub>) -> Json<HubStats> {
    Json(hub.stats())
}
