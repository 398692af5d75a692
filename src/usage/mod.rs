//! Usage tracking module
//!
//! In-process search and activity counters served on the usage dashboard.

pub mod counter;
pub mod daily;

pub use counter::{ActivityEntry, TrackingMode, UsageCounter, UsageMetrics, RECENT_ACTIVITY_LIMIT};
pub use daily::spawn_daily_reset;
