//! Lead-generation backend client
//!
//! HTTP client for the crew backend: lead generation, financial analysis
//! and the usage dashboard endpoints. Every call is a single attempt; failures
//! are logged and handed back to the caller unchanged.

use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::{
    backend::models::{ApiKeys, GenerateLeadsRequest, LeadResults, EXA_KEY_HEADER, SAMBANOVA_KEY_HEADER},
    config::Config,
    error::{AppError, AppResult},
    upstream::{decode_response, insert_key, json_headers},
};

/// Lead-generation backend client
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self::with_base_url(client, &config.api_url)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run the lead-generation crew for `prompt`
    ///
    /// Both keys are required; the request is never sent without them.
    #[instrument(skip(self, prompt, keys), fields(prompt_len = prompt.len()))]
    pub async fn generate_leads(&self, prompt: &str, keys: &ApiKeys) -> AppResult<LeadResults> {
        let (Some(sambanova_key), Some(exa_key)) = (keys.sambanova(), keys.exa()) else {
            error!("Lead generation requested without API keys");
            return Err(AppError::MissingApiKeys);
        };

        let url = format!("{}/generate-leads", self.base_url);
        let mut headers = json_headers();
        insert_key(&mut headers, SAMBANOVA_KEY_HEADER, sambanova_key)?;
        insert_key(&mut headers, EXA_KEY_HEADER, exa_key)?;

        debug!(url = %url, "Requesting leads from backend");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&GenerateLeadsRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send lead generation request");
                e
            })?;

        let body: Value = decode_response("generate_leads", response).await?;
        let results = LeadResults::from_response(body);

        debug!(
            leads = results.outreach_list.len(),
            usage_metrics = %results.usage_metrics,
            "Lead generation completed"
        );
        Ok(results)
    }

    /// Run a financial analysis with caller-supplied parameters
    #[instrument(skip(self, params, keys))]
    pub async fn financial_analysis(&self, params: &Value, keys: &ApiKeys) -> AppResult<Value> {
        let Some(exa_key) = keys.exa() else {
            error!("Financial analysis requested without an Exa key");
            return Err(AppError::MissingApiKeys);
        };

        let url = format!("{}/financial/financial-analysis", self.base_url);
        let mut headers = json_headers();
        insert_key(&mut headers, EXA_KEY_HEADER, exa_key)?;

        debug!(url = %url, "Requesting financial analysis from backend");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send financial analysis request");
                e
            })?;

        decode_response("financial_analysis", response).await
    }

    /// Usage dashboard summary
    #[instrument(skip(self))]
    pub async fn usage_summary(&self) -> AppResult<Value> {
        self.get_json("usage_summary", "/api/usage/summary", &[]).await
    }

    /// Usage dashboard system health
    #[instrument(skip(self))]
    pub async fn usage_health(&self) -> AppResult<Value> {
        self.get_json("usage_health", "/api/usage/health", &[]).await
    }

    /// Most popular search queries
    #[instrument(skip(self))]
    pub async fn popular_searches(&self, limit: u32) -> AppResult<Value> {
        let limit = limit.to_string();
        self.get_json(
            "popular_searches",
            "/api/usage/searches/popular",
            &[("limit", limit.as_str())],
        )
        .await
    }

    /// Per-day breakdown for the last week
    #[instrument(skip(self))]
    pub async fn daily_usage_analytics(&self) -> AppResult<Value> {
        self.get_json("daily_usage_analytics", "/api/usage/analytics/daily", &[])
            .await
    }

    async fn get_json(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Fetching from backend");

        let response = self
            .client
            .get(&url)
            .headers(json_headers())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint, error = %e, "Failed to reach backend");
                e
            })?;

        decode_response(endpoint, response).await
    }
}
