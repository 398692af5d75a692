//! HTTP routes for Leadcrew
//!
//! This module defines all HTTP endpoints exposed by the host.

pub mod dashboard;
pub mod health;
pub mod leads;
pub mod metrics;
pub mod preferences;
pub mod usage;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let usage_routes = Router::new()
        .route("/api/usage/metrics", get(usage::get_metrics))
        .route("/api/usage/track/search", post(usage::track_search))
        .route("/api/usage/track/activity", post(usage::track_activity));

    // Forwarded to the crew backend and analytics service
    let upstream_routes = Router::new()
        .route("/api/generate-leads", post(leads::generate_leads))
        .route("/api/financial-analysis", post(leads::financial_analysis))
        .route("/api/dashboard/summary", get(dashboard::usage_summary))
        .route("/api/dashboard/health", get(dashboard::usage_health))
        .route(
            "/api/dashboard/searches/popular",
            get(dashboard::popular_searches),
        )
        .route("/api/dashboard/daily", get(dashboard::daily_usage_analytics))
        .route("/api/analytics", get(dashboard::analytics))
        .route("/api/analytics/sessions", post(dashboard::track_search_session));

    let preference_routes = Router::new()
        .route(
            "/api/preferences/dark-mode",
            get(preferences::get_dark_mode)
                .put(preferences::set_dark_mode)
                .delete(preferences::follow_system),
        )
        .route(
            "/api/preferences/dark-mode/toggle",
            post(preferences::toggle_dark_mode),
        );

    // Operational routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(usage_routes)
        .merge(upstream_routes)
        .merge(preference_routes)
        // Global middleware (applied to all routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
