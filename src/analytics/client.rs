//! Analytics service client

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::{
    config::Config,
    error::AppResult,
    upstream::{decode_response, json_headers},
};

/// Body of `POST /analytics/range`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeRequest {
    pub start_date: String,
    pub end_date: String,
}

/// Result of recording a search session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Analytics service client
pub struct AnalyticsClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalyticsClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self::with_base_url(client, &config.analytics_api_url)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch analytics for a date range, or for a single day when the range is incomplete
    #[instrument(skip(self))]
    pub async fn get_analytics(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<Value> {
        let start_date = start_date.filter(|d| !d.is_empty());
        let end_date = end_date.filter(|d| !d.is_empty());

        let request = match (start_date, end_date) {
            (Some(start), Some(end)) => {
                let url = format!("{}/analytics/range", self.base_url);
                debug!(url = %url, start, end, "Requesting range analytics");
                self.client.post(url).json(&DateRangeRequest {
                    start_date: start.to_string(),
                    end_date: end.to_string(),
                })
            }
            _ => {
                let url = format!("{}/analytics/daily", self.base_url);
                debug!(url = %url, target_date = ?start_date, "Requesting daily analytics");
                self.client
                    .get(url)
                    .query(&[("target_date", start_date.unwrap_or(""))])
            }
        };

        let response = request
            .headers(json_headers())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Analytics API error");
                e
            })?;

        decode_response("analytics", response).await
    }

    /// Record a search session.
    ///
    /// Sessions are only logged locally for now; this never fails the search
    /// that triggered it.
    pub fn track_search_session(&self, session: &Value) -> TrackingOutcome {
        match serde_json::to_string(session) {
            Ok(payload) => {
                info!(session = %payload, "Tracking search session");
                TrackingOutcome {
                    success: true,
                    error: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Error tracking search session");
                TrackingOutcome {
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
