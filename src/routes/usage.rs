//! Usage counter endpoints
//!
//! - `GET /api/usage/metrics` - current counter snapshot
//! - `POST /api/usage/track/search` - count a search
//! - `POST /api/usage/track/activity` - add to the recent activity log

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::error;

use crate::{
    error::{AppResult, ErrorResponse},
    usage::ActivityEntry,
    AppState,
};

/// Body of a tracked search; the agent id is optional
#[derive(Debug, Default, Deserialize)]
pub struct TrackSearchRequest {
    #[serde(default)]
    pub agent_id: Option<String>,
}

/// Current usage metrics
///
/// Any failure reading the counter becomes a generic 500.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.usage_counter.get_metrics() {
        Ok(metrics) => Json(metrics).into_response(),
        Err(e) => {
            error!(error = %e, "Error fetching usage metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch usage metrics")),
            )
                .into_response()
        }
    }
}

pub async fn track_search(
    State(state): State<Arc<AppState>>,
    body: Option<Json<TrackSearchRequest>>,
) -> AppResult<StatusCode> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    state
        .usage_counter
        .track_search(request.agent_id.as_deref())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn track_activity(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<ActivityEntry>,
) -> AppResult<StatusCode> {
    state.usage_counter.track_activity(activity)?;
    Ok(StatusCode::NO_CONTENT)
}
