//! Lead-generation backend data models

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Header carrying the SambaNova key
pub const SAMBANOVA_KEY_HEADER: &str = "x-sambanova-key";
/// Header carrying the Exa key
pub const EXA_KEY_HEADER: &str = "x-exa-key";

/// Caller-supplied provider keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub sambanova_key: Option<String>,
    pub exa_key: Option<String>,
}

impl ApiKeys {
    pub fn new(sambanova_key: impl Into<String>, exa_key: impl Into<String>) -> Self {
        Self {
            sambanova_key: Some(sambanova_key.into()),
            exa_key: Some(exa_key.into()),
        }
    }

    /// SambaNova key, treating an empty string as absent
    pub fn sambanova(&self) -> Option<&str> {
        self.sambanova_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Exa key, treating an empty string as absent
    pub fn exa(&self) -> Option<&str> {
        self.exa_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Body of `POST /generate-leads`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateLeadsRequest {
    pub prompt: String,
}

/// Crew statistics reported when the backend predates usage metrics
pub fn legacy_usage_metrics() -> Value {
    json!({
        "agent_count": 5,
        "task_count": 6,
        "execution_time": 0,
        "successful_requests": 1
    })
}

/// Normalized lead-generation result
///
/// `usage_metrics` is whatever the backend reported, passed through as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadResults {
    pub outreach_list: Vec<Value>,
    pub usage_metrics: Value,
}

impl LeadResults {
    /// Normalize either backend response format.
    ///
    /// Current backends return `{outreach_list, usage_metrics}`; older ones
    /// return the bare list (or an object with only `outreach_list`).
    pub fn from_response(body: Value) -> Self {
        let Value::Object(mut fields) = body else {
            return Self {
                outreach_list: into_list(body),
                usage_metrics: legacy_usage_metrics(),
            };
        };

        if fields.get("usage_metrics").is_some_and(|m| !m.is_null()) {
            let usage_metrics = fields.remove("usage_metrics").unwrap_or_default();
            let outreach_list = fields
                .remove("outreach_list")
                .map(into_list)
                .unwrap_or_default();
            return Self {
                outreach_list,
                usage_metrics,
            };
        }

        // Without a usable list the whole body stands in for it
        let has_list = fields.get("outreach_list").is_some_and(|l| !l.is_null());
        let outreach_list = if has_list {
            fields
                .remove("outreach_list")
                .map(into_list)
                .unwrap_or_default()
        } else {
            vec![Value::Object(fields)]
        };
        Self {
            outreach_list,
            usage_metrics: legacy_usage_metrics(),
        }
    }
}

fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
