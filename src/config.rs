//! Configuration management for Leadcrew
//!
//! Configuration is loaded from environment variables.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

use crate::usage::TrackingMode;

/// Default backend URL used outside production
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Default analytics service URL used outside production
pub const DEFAULT_ANALYTICS_API_URL: &str = "http://localhost:8002";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Selects seeded development counters or inert production counters
    pub tracking_mode: TrackingMode,
    /// Public origin the product is served from (production only)
    pub public_origin: Option<String>,

    /// Lead-generation backend base URL
    pub api_url: String,
    /// Analytics service base URL
    pub analytics_api_url: String,
    /// Timeout applied to every outbound request
    pub http_timeout_seconds: u64,

    /// File holding persisted UI preferences
    pub preferences_path: PathBuf,
    /// Whether the host system prefers a dark color scheme
    pub system_prefers_dark: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tracking_mode = match lookup("LEADCREW_ENV").as_deref() {
            Some("production") => TrackingMode::Production,
            _ => TrackingMode::Development,
        };
        let public_origin = lookup("LEADCREW_PUBLIC_ORIGIN")
            .map(|origin| origin.trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty());

        let (api_url, analytics_api_url) = match tracking_mode {
            TrackingMode::Production => {
                let Some(origin) = public_origin.as_deref() else {
                    bail!("LEADCREW_PUBLIC_ORIGIN must be set in production");
                };
                (format!("{}/api", origin), format!("{}/analytics", origin))
            }
            TrackingMode::Development => (
                lookup("LEADCREW_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                lookup("LEADCREW_ANALYTICS_API_URL")
                    .unwrap_or_else(|| DEFAULT_ANALYTICS_API_URL.to_string()),
            ),
        };

        Ok(Self {
            host: lookup("LEADCREW_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("LEADCREW_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("Invalid LEADCREW_PORT")?,

            tracking_mode,
            public_origin,

            api_url: api_url.trim_end_matches('/').to_string(),
            analytics_api_url: analytics_api_url.trim_end_matches('/').to_string(),
            http_timeout_seconds: lookup("LEADCREW_HTTP_TIMEOUT_SECONDS")
                .unwrap_or_else(|| "300".to_string())
                .parse()
                .context("Invalid LEADCREW_HTTP_TIMEOUT_SECONDS")?,

            preferences_path: lookup("LEADCREW_PREFERENCES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("leadcrew-preferences.json")),
            system_prefers_dark: lookup("LEADCREW_SYSTEM_DARK")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
