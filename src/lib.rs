//! Leadcrew - usage tracking host for the sales lead generation crew
//!
//! This library provides the usage counter and its HTTP surface, typed
//! clients for the lead-generation backend and the analytics service, and
//! the persisted dark-mode preference.

pub mod analytics;
pub mod backend;
pub mod config;
pub mod error;
pub mod preferences;
pub mod routes;
pub mod upstream;
pub mod usage;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub use crate::analytics::AnalyticsClient;
pub use crate::backend::BackendClient;
pub use crate::config::Config;
pub use crate::preferences::{DarkMode, FilePreferenceStore, PreferenceStore};
pub use crate::usage::{TrackingMode, UsageCounter};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Search and activity tally served on the usage dashboard
    pub usage_counter: Arc<UsageCounter>,
    pub backend_client: Arc<BackendClient>,
    pub analytics_client: Arc<AnalyticsClient>,
    pub dark_mode: Mutex<DarkMode>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        let backend_client = Arc::new(BackendClient::new(http_client.clone(), &config));
        let analytics_client = Arc::new(AnalyticsClient::new(http_client, &config));

        let usage_counter = Arc::new(UsageCounter::new(config.tracking_mode));

        let store: Arc<dyn PreferenceStore> = Arc::new(
            FilePreferenceStore::open(&config.preferences_path).with_context(|| {
                format!(
                    "Failed to open preferences at {}",
                    config.preferences_path.display()
                )
            })?,
        );
        let dark_mode = DarkMode::load(store, config.system_prefers_dark)?;

        Ok(Self::from_parts(
            config,
            usage_counter,
            backend_client,
            analytics_client,
            dark_mode,
        ))
    }

    /// Assemble a state from already-built parts
    pub fn from_parts(
        config: Config,
        usage_counter: Arc<UsageCounter>,
        backend_client: Arc<BackendClient>,
        analytics_client: Arc<AnalyticsClient>,
        dark_mode: DarkMode,
    ) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            usage_counter,
            backend_client,
            analytics_client,
            dark_mode: Mutex::new(dark_mode),
        }
    }
}
