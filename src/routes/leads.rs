//! Lead generation endpoints
//!
//! Forward requests to the crew backend, passing through the caller's
//! provider keys. Successful lead runs are recorded on the usage counter.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use chrono::Local;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    backend::{ApiKeys, LeadResults, EXA_KEY_HEADER, SAMBANOVA_KEY_HEADER},
    error::AppResult,
    usage::ActivityEntry,
    AppState,
};

/// Header naming the agent that issued the search
pub const AGENT_ID_HEADER: &str = "x-agent-id";

#[derive(Debug, Deserialize)]
pub struct GenerateLeadsBody {
    pub prompt: String,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Provider keys supplied by the caller
pub fn keys_from_headers(headers: &HeaderMap) -> ApiKeys {
    ApiKeys {
        sambanova_key: header_str(headers, SAMBANOVA_KEY_HEADER).map(str::to_string),
        exa_key: header_str(headers, EXA_KEY_HEADER).map(str::to_string),
    }
}

/// Clock label used in the activity log, e.g. `2:30 PM`
pub fn activity_time_label() -> String {
    Local::now().format("%-I:%M %p").to_string()
}

pub async fn generate_leads(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<GenerateLeadsBody>,
) -> AppResult<Json<LeadResults>> {
    let keys = keys_from_headers(&headers);
    let agent_id = header_str(&headers, AGENT_ID_HEADER);

    let results = state.backend_client.generate_leads(&body.prompt, &keys).await?;

    // Counter failures never fail the request
    let counter = &state.usage_counter;
    if let Err(e) = counter.track_search(agent_id) {
        warn!(error = %e, "Failed to track search");
    }
    let description = format!(
        "{} generated {} leads",
        agent_id.unwrap_or("Anonymous agent"),
        results.outreach_list.len()
    );
    if let Err(e) = counter.track_activity(ActivityEntry::new(activity_time_label(), description)) {
        warn!(error = %e, "Failed to track activity");
    }

    info!(
        agent_id = agent_id.unwrap_or("-"),
        leads = results.outreach_list.len(),
        "Lead generation request served"
    );
    Ok(Json(results))
}

pub async fn financial_analysis(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> AppResult<Json<Value>> {
    let keys = keys_from_headers(&headers);
    let analysis = state.backend_client.financial_analysis(&params, &keys).await?;
    Ok(Json(analysis))
}
