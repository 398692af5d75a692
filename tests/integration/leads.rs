//! Lead generation proxy endpoint tests
//!
//! - POST /api/generate-leads
//! - POST /api/financial-analysis

use axum::http::{HeaderName, HeaderValue, StatusCode};
use leadcrew::usage::UsageMetrics;
use serde_json::{json, Value};

use crate::common::{
    constants::{TEST_AGENT_ID, TEST_EXA_KEY, TEST_SAMBANOVA_KEY},
    TestAppBuilder,
};
use crate::mocks::MockBackendServer;

fn header(name: &'static str, value: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

#[tokio::test]
async fn test_generate_leads_forwards_and_tracks_usage() {
    let backend = MockBackendServer::start().await;
    backend
        .mock_generate_leads("AI startups", TEST_SAMBANOVA_KEY, TEST_EXA_KEY)
        .await;
    let app = TestAppBuilder::new()
        .backend(&backend.uri())
        .initial_metrics(UsageMetrics::default())
        .build();

    let (samba_name, samba_value) = header("x-sambanova-key", TEST_SAMBANOVA_KEY);
    let (exa_name, exa_value) = header("x-exa-key", TEST_EXA_KEY);
    let (agent_name, agent_value) = header("x-agent-id", TEST_AGENT_ID);

    let response = app
        .server
        .post("/api/generate-leads")
        .add_header(samba_name, samba_value)
        .add_header(exa_name, exa_value)
        .add_header(agent_name, agent_value)
        .json(&json!({ "prompt": "AI startups" }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["outreach_list"].as_array().unwrap().len(), 2);
    assert_eq!(json["usage_metrics"]["agent_count"], 4);

    let metrics = app.state.usage_counter.get_metrics().unwrap();
    assert_eq!(metrics.total_searches, 1);
    assert_eq!(metrics.today_usage, 1);
    assert_eq!(metrics.recent_activity.len(), 1);
    assert_eq!(
        metrics.recent_activity[0].description,
        "agent-1 generated 2 leads"
    );
}

#[tokio::test]
async fn test_generate_leads_without_keys_is_bad_request() {
    let backend = MockBackendServer::start().await;
    let app = TestAppBuilder::new()
        .backend(&backend.uri())
        .initial_metrics(UsageMetrics::default())
        .build();

    let (samba_name, samba_value) = header("x-sambanova-key", TEST_SAMBANOVA_KEY);

    let response = app
        .server
        .post("/api/generate-leads")
        .add_header(samba_name, samba_value)
        .json(&json!({ "prompt": "AI startups" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "API keys are required" }));
    assert!(backend.received_requests().await.is_empty());
    assert_eq!(app.state.usage_counter.get_metrics().unwrap().total_searches, 0);
}

#[tokio::test]
async fn test_generate_leads_backend_failure_is_bad_gateway() {
    let backend = MockBackendServer::start().await;
    backend.mock_generate_leads_error(500).await;
    let app = TestAppBuilder::new()
        .backend(&backend.uri())
        .initial_metrics(UsageMetrics::default())
        .build();

    let (samba_name, samba_value) = header("x-sambanova-key", TEST_SAMBANOVA_KEY);
    let (exa_name, exa_value) = header("x-exa-key", TEST_EXA_KEY);

    let response = app
        .server
        .post("/api/generate-leads")
        .add_header(samba_name, samba_value)
        .add_header(exa_name, exa_value)
        .json(&json!({ "prompt": "AI startups" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    // Failed runs are not counted
    assert_eq!(app.state.usage_counter.get_metrics().unwrap().total_searches, 0);
}

#[tokio::test]
async fn test_financial_analysis_is_forwarded() {
    let backend = MockBackendServer::start().await;
    let params = json!({ "company": "Acme" });
    backend.mock_financial_analysis(TEST_EXA_KEY, params.clone()).await;
    let app = TestAppBuilder::new().backend(&backend.uri()).build();

    let (exa_name, exa_value) = header("x-exa-key", TEST_EXA_KEY);

    let response = app
        .server
        .post("/api/financial-analysis")
        .add_header(exa_name, exa_value)
        .json(&params)
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["summary"], "Revenue grew 12% year over year");
}
