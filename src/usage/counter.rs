//! In-memory usage counter
//!
//! Tallies searches and keeps a short log of recent agent activity.
//! Nothing here is persisted; a restart starts over from the
//! construction-time values.

use std::collections::VecDeque;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Maximum number of entries kept in the recent activity log
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// How the counter behaves for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Seeded with sample data; mutators are live
    Development,
    /// Starts at zero; mutators are no-ops
    Production,
}

impl TrackingMode {
    pub fn is_tracking(self) -> bool {
        matches!(self, TrackingMode::Development)
    }
}

/// A single entry in the recent activity log
///
/// Neither field is validated; missing fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityEntry {
    pub time: String,
    pub description: String,
}

impl ActivityEntry {
    pub fn new(time: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            description: description.into(),
        }
    }
}

/// Snapshot of the counter as served to clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetrics {
    pub total_searches: u64,
    pub today_usage: u64,
    pub active_agents: u64,
    pub success_rate: u8,
    pub recent_activity: Vec<ActivityEntry>,
}

impl UsageMetrics {
    /// Sample values shown while developing the dashboard
    pub fn development_sample() -> Self {
        Self {
            total_searches: 1247,
            today_usage: 23,
            active_agents: 5,
            success_rate: 86,
            recent_activity: vec![
                ActivityEntry::new("2:30 PM", "Agent #1 performed search"),
                ActivityEntry::new("2:15 PM", "Agent #2 completed task"),
                ActivityEntry::new("1:45 PM", "Agent #3 started session"),
                ActivityEntry::new("1:30 PM", "Agent #4 updated profile"),
                ActivityEntry::new("12:45 PM", "Agent #5 completed analysis"),
            ],
        }
    }
}

#[derive(Debug)]
struct UsageState {
    total_searches: u64,
    today_usage: u64,
    active_agents: u64,
    success_rate: u8,
    recent_activity: VecDeque<ActivityEntry>,
}

impl From<UsageMetrics> for UsageState {
    fn from(metrics: UsageMetrics) -> Self {
        let mut recent_activity: VecDeque<ActivityEntry> = metrics.recent_activity.into();
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);
        Self {
            total_searches: metrics.total_searches,
            today_usage: metrics.today_usage,
            active_agents: metrics.active_agents,
            success_rate: metrics.success_rate.min(100),
            recent_activity,
        }
    }
}

/// Usage counter shared by the request handlers
///
/// Owned by the application state and handed to whatever serves the
/// metrics endpoint. The mode is fixed at construction.
#[derive(Debug)]
pub struct UsageCounter {
    mode: TrackingMode,
    state: RwLock<UsageState>,
}

impl UsageCounter {
    /// Create a counter with the default initial values for `mode`
    pub fn new(mode: TrackingMode) -> Self {
        let initial = match mode {
            TrackingMode::Development => UsageMetrics::development_sample(),
            TrackingMode::Production => UsageMetrics::default(),
        };
        Self::from_snapshot(mode, initial)
    }

    /// Create a counter starting from explicit values
    pub fn from_snapshot(mode: TrackingMode, initial: UsageMetrics) -> Self {
        Self {
            mode,
            state: RwLock::new(initial.into()),
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    /// Current values under their wire names
    pub fn get_metrics(&self) -> AppResult<UsageMetrics> {
        let state = self.read()?;
        Ok(UsageMetrics {
            total_searches: state.total_searches,
            today_usage: state.today_usage,
            active_agents: state.active_agents,
            success_rate: state.success_rate,
            recent_activity: state.recent_activity.iter().cloned().collect(),
        })
    }

    /// Count one search. The agent id is only used for logging.
    pub fn track_search(&self, agent_id: Option<&str>) -> AppResult<()> {
        if !self.mode.is_tracking() {
            return Ok(());
        }

        let mut state = self.write()?;
        state.total_searches += 1;
        state.today_usage += 1;
        drop(state);

        match agent_id {
            Some(id) => info!(agent_id = %id, "Tracked search for agent {}", id),
            None => warn!("Tracked search without an agent id"),
        }
        metrics::counter!("leadcrew_searches_tracked_total").increment(1);
        Ok(())
    }

    /// Record an activity at the head of the log, dropping the oldest past the limit
    pub fn track_activity(&self, activity: ActivityEntry) -> AppResult<()> {
        if !self.mode.is_tracking() {
            return Ok(());
        }

        debug!(time = %activity.time, description = %activity.description, "Tracked activity");

        let mut state = self.write()?;
        state.recent_activity.push_front(activity);
        state.recent_activity.truncate(RECENT_ACTIVITY_LIMIT);
        drop(state);

        metrics::counter!("leadcrew_activities_tracked_total").increment(1);
        Ok(())
    }

    /// Start a new day for `today_usage`
    pub fn reset_today_usage(&self) -> AppResult<()> {
        if !self.mode.is_tracking() {
            return Ok(());
        }

        let mut state = self.write()?;
        let previous = std::mem::take(&mut state.today_usage);
        info!(previous, "Reset today's usage");
        Ok(())
    }

    /// Poison the state lock the way a panicking writer would
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = self.state.write();
                    panic!("poisoning usage counter");
                })
                .join()
        });
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, UsageState>> {
        self.state
            .read()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("usage counter lock poisoned")))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, UsageState>> {
        self.state
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("usage counter lock poisoned")))
    }
}
