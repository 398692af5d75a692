//! Day-boundary reset for `today_usage`
//!
//! A background task sleeps until the next local midnight and then zeroes
//! the daily counter, for as long as the process runs.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::UsageCounter;

/// Fallback wait when the next midnight cannot be resolved (DST gaps)
const FALLBACK_WAIT: Duration = Duration::from_secs(60 * 60);

/// Time left until the midnight following `now`
pub fn duration_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let tz = now.timezone();
    let next_midnight = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .map(|day| day.and_time(NaiveTime::MIN))
        .and_then(|naive| tz.from_local_datetime(&naive).earliest());

    match next_midnight {
        Some(midnight) => (midnight - now.clone()).to_std().unwrap_or(FALLBACK_WAIT),
        None => FALLBACK_WAIT,
    }
}

/// Spawn the reset loop for `counter`
pub fn spawn_daily_reset(counter: Arc<UsageCounter>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(mode = ?counter.mode(), "Daily usage reset task started");
        loop {
            let wait = duration_until_next_midnight(&Local::now());
            debug!(wait_secs = wait.as_secs(), "Sleeping until next day boundary");
            tokio::time::sleep(wait).await;

            if let Err(e) = counter.reset_today_usage() {
                error!(error = %e, "Failed to reset today's usage");
            }
        }
    })
}
