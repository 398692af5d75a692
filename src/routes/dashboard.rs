//! Usage dashboard and analytics passthrough endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{analytics::TrackingOutcome, error::AppResult, AppState};

/// Default number of popular searches returned
const DEFAULT_POPULAR_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn usage_summary(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    Ok(Json(state.backend_client.usage_summary().await?))
}

pub async fn usage_health(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    Ok(Json(state.backend_client.usage_health().await?))
}

pub async fn popular_searches(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PopularQuery>,
) -> AppResult<Json<Value>> {
    let limit = query.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    Ok(Json(state.backend_client.popular_searches(limit).await?))
}

pub async fn daily_usage_analytics(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    Ok(Json(state.backend_client.daily_usage_analytics().await?))
}

/// Range analytics when both dates are given, daily analytics otherwise
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<Value>> {
    let analytics = state
        .analytics_client
        .get_analytics(query.start_date.as_deref(), query.end_date.as_deref())
        .await?;
    Ok(Json(analytics))
}

pub async fn track_search_session(
    State(state): State<Arc<AppState>>,
    Json(session): Json<Value>,
) -> Json<TrackingOutcome> {
    Json(state.analytics_client.track_search_session(&session))
}
