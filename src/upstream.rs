//! Shared response handling for outbound API calls

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{AppError, AppResult};

/// Headers sent with every outbound request
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Insert a caller-supplied key header
pub fn insert_key(headers: &mut HeaderMap, name: &'static str, value: &str) -> AppResult<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|_| AppError::BadRequest(format!("Invalid value for {}", name)))?;
    headers.insert(name, value);
    Ok(())
}

/// Check the status, then decode the body of an upstream response
pub async fn decode_response<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> AppResult<T> {
    let status = response.status();
    debug!(endpoint, status = %status, "Upstream response status");
    record_upstream(endpoint, status.as_u16());

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        error!(endpoint, status = %status, body = %text, "Upstream request failed");
        return Err(AppError::Upstream {
            status: status.as_u16(),
            body: text,
        });
    }

    let body = response.text().await?;
    debug!(endpoint, body = %body, "Upstream response body");

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            error!(endpoint, error = %e, body = %body, "Failed to parse upstream response");
            Err(AppError::Upstream {
                status: status.as_u16(),
                body: format!("Failed to parse response: {}", e),
            })
        }
    }
}

fn record_upstream(endpoint: &'static str, status: u16) {
    metrics::counter!(
        "leadcrew_upstream_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}
