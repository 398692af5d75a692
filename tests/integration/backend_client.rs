//! Backend client tests against a mock crew backend

use leadcrew::{
    backend::{legacy_usage_metrics, ApiKeys},
    error::AppError,
    BackendClient,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::constants::{TEST_EXA_KEY, TEST_SAMBANOVA_KEY};
use crate::mocks::{BackendTestData, MockBackendServer};

fn client_for(server: &MockBackendServer) -> BackendClient {
    BackendClient::with_base_url(reqwest::Client::new(), &server.uri())
}

#[tokio::test]
async fn test_generate_leads_sends_prompt_and_keys() {
    let server = MockBackendServer::start().await;
    server
        .mock_generate_leads("fintech startups in Berlin", TEST_SAMBANOVA_KEY, TEST_EXA_KEY)
        .await;

    let results = client_for(&server)
        .generate_leads(
            "fintech startups in Berlin",
            &ApiKeys::new(TEST_SAMBANOVA_KEY, TEST_EXA_KEY),
        )
        .await
        .expect("lead generation should succeed");

    assert_eq!(results.outreach_list.len(), 2);
    assert_eq!(results.outreach_list[0]["company_name"], "Acme Robotics");
    assert_eq!(
        results.usage_metrics,
        BackendTestData::lead_response()["usage_metrics"]
    );
}

#[tokio::test]
async fn test_generate_leads_legacy_response_gets_default_metrics() {
    let server = MockBackendServer::start().await;
    server.mock_generate_leads_legacy().await;

    let results = client_for(&server)
        .generate_leads("anything", &ApiKeys::new(TEST_SAMBANOVA_KEY, TEST_EXA_KEY))
        .await
        .unwrap();

    assert_eq!(
        results.outreach_list,
        BackendTestData::outreach_list().as_array().unwrap().clone()
    );
    assert_eq!(results.usage_metrics, legacy_usage_metrics());
}

#[tokio::test]
async fn test_generate_leads_passes_unfamiliar_metrics_through() {
    let server = MockBackendServer::start().await;
    let metrics = json!({ "agent_count": 5, "total_tokens": 1200 });
    server.mock_generate_leads_with_metrics(metrics.clone()).await;

    let results = client_for(&server)
        .generate_leads("anything", &ApiKeys::new(TEST_SAMBANOVA_KEY, TEST_EXA_KEY))
        .await
        .expect("unfamiliar metrics should not fail the run");

    assert_eq!(results.outreach_list.len(), 2);
    assert_eq!(results.usage_metrics, metrics);
}

#[tokio::test]
async fn test_generate_leads_without_keys_makes_no_request() {
    let server = MockBackendServer::start().await;
    server.mock_generate_leads_legacy().await;
    let client = client_for(&server);

    let missing_exa = ApiKeys {
        sambanova_key: Some(TEST_SAMBANOVA_KEY.to_string()),
        exa_key: None,
    };
    let missing_sambanova = ApiKeys {
        sambanova_key: None,
        exa_key: Some(TEST_EXA_KEY.to_string()),
    };

    for keys in [missing_exa, missing_sambanova, ApiKeys::default()] {
        let result = client.generate_leads("prompt", &keys).await;
        assert!(matches!(result, Err(AppError::MissingApiKeys)));
    }

    assert!(server.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_generate_leads_upstream_failure_is_returned() {
    let server = MockBackendServer::start().await;
    server.mock_generate_leads_error(500).await;

    let result = client_for(&server)
        .generate_leads("prompt", &ApiKeys::new(TEST_SAMBANOVA_KEY, TEST_EXA_KEY))
        .await;

    match result {
        Err(AppError::Upstream { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("crew failed"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    // A failed call is not retried
    assert_eq!(server.received_requests().await.len(), 1);
}

#[tokio::test]
async fn test_generate_leads_unreachable_backend() {
    let client = BackendClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:9");

    let result = client
        .generate_leads("prompt", &ApiKeys::new(TEST_SAMBANOVA_KEY, TEST_EXA_KEY))
        .await;

    assert!(matches!(result, Err(AppError::HttpError(_))));
}

#[tokio::test]
async fn test_financial_analysis_requires_exa_key() {
    let server = MockBackendServer::start().await;

    let result = client_for(&server)
        .financial_analysis(&json!({ "company": "Acme" }), &ApiKeys::default())
        .await;

    assert!(matches!(result, Err(AppError::MissingApiKeys)));
    assert!(server.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_financial_analysis_passes_params_through() {
    let server = MockBackendServer::start().await;
    let params = json!({ "company": "Acme", "ticker": "ACME" });
    server.mock_financial_analysis(TEST_EXA_KEY, params.clone()).await;

    let keys = ApiKeys {
        sambanova_key: None,
        exa_key: Some(TEST_EXA_KEY.to_string()),
    };
    let analysis = client_for(&server)
        .financial_analysis(&params, &keys)
        .await
        .unwrap();

    assert_eq!(analysis["company"], "Acme");
}

#[tokio::test]
async fn test_usage_dashboard_passthroughs() {
    let server = MockBackendServer::start().await;
    let summary = json!({ "success": true, "data": { "total_api_calls": 10 } });
    let health = json!({ "success": true, "data": { "status": "ok" } });
    let daily = json!({ "success": true, "data": { "period": "7_days", "analytics": [] } });
    server.mock_usage_get("/api/usage/summary", summary.clone()).await;
    server.mock_usage_get("/api/usage/health", health.clone()).await;
    server.mock_usage_get("/api/usage/analytics/daily", daily.clone()).await;
    server.mock_popular_searches(3).await;

    let client = client_for(&server);

    assert_eq!(client.usage_summary().await.unwrap(), summary);
    assert_eq!(client.usage_health().await.unwrap(), health);
    assert_eq!(client.daily_usage_analytics().await.unwrap(), daily);

    let popular = client.popular_searches(3).await.unwrap();
    assert_eq!(popular["data"]["limit"], 3);
}

#[tokio::test]
async fn test_usage_dashboard_error_is_returned() {
    let server = MockBackendServer::start().await;
    server.mock_usage_error("/api/usage/summary", 503).await;

    let result = client_for(&server).usage_summary().await;

    assert!(matches!(
        result,
        Err(AppError::Upstream { status: 503, .. })
    ));
}
