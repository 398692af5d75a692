//! Dashboard and analytics passthrough endpoint tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::TestAppBuilder;
use crate::mocks::{MockAnalyticsServer, MockBackendServer};

#[tokio::test]
async fn test_summary_is_passed_through() {
    let backend = MockBackendServer::start().await;
    let summary = json!({ "success": true, "data": { "total_api_calls": 42 } });
    backend.mock_usage_get("/api/usage/summary", summary.clone()).await;
    let app = TestAppBuilder::new().backend(&backend.uri()).build();

    let response = app.server.get("/api/dashboard/summary").await;

    response.assert_status_ok();
    response.assert_json(&summary);
}

#[tokio::test]
async fn test_popular_searches_default_limit() {
    let backend = MockBackendServer::start().await;
    backend.mock_popular_searches(10).await;
    let app = TestAppBuilder::new().backend(&backend.uri()).build();

    let response = app.server.get("/api/dashboard/searches/popular").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["data"]["limit"], 10);
}

#[tokio::test]
async fn test_popular_searches_explicit_limit() {
    let backend = MockBackendServer::start().await;
    backend.mock_popular_searches(3).await;
    let app = TestAppBuilder::new().backend(&backend.uri()).build();

    let response = app
        .server
        .get("/api/dashboard/searches/popular")
        .add_query_param("limit", 3)
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_backend_error_is_bad_gateway() {
    let backend = MockBackendServer::start().await;
    backend.mock_usage_error("/api/usage/health", 500).await;
    let app = TestAppBuilder::new().backend(&backend.uri()).build();

    let response = app.server.get("/api/dashboard/health").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_json(&json!({ "error": "Upstream service returned 500" }));
}

#[tokio::test]
async fn test_analytics_range_query() {
    let analytics = MockAnalyticsServer::start().await;
    analytics.mock_range("2024-03-01", "2024-03-07").await;
    let app = TestAppBuilder::new().analytics(&analytics.uri()).build();

    let response = app
        .server
        .get("/api/analytics")
        .add_query_param("start_date", "2024-03-01")
        .add_query_param("end_date", "2024-03-07")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["total_searches"], 12);
}

#[tokio::test]
async fn test_search_session_tracking_succeeds() {
    let app = TestAppBuilder::new().build();

    let response = app
        .server
        .post("/api/analytics/sessions")
        .json(&json!({ "query": "fintech", "results": 4 }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "success": true }));
}
