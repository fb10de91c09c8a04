//! Live clock and uptime display
//!
//! Uptime counts from a fixed epoch (the day the site went up), refreshed
//! once per second together with the local time.

use crate::page::{Document, PageResult};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_TIME_ID: &str = "clock-time";
pub const DEFAULT_UPTIME_ID: &str = "clock-uptime";
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Format a time of day the way the page shows it
pub fn time_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an elapsed span as days, hours, minutes and seconds
///
/// Negative spans (epoch in the future) show as zero.
pub fn uptime_text(elapsed: chrono::Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    epoch: DateTime<Utc>,
}

impl Clock {
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self { epoch }
    }

    /// Parse the epoch from an RFC 3339 timestamp
    pub fn from_rfc3339(epoch: &str) -> PageResult<Self> {
        Ok(Self::new(DateTime::parse_from_rfc3339(epoch)?.with_timezone(&Utc)))
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    pub fn uptime_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.epoch)
    }
}

/// Writes the clock into two page elements
pub struct ClockDisplay {
    clock: Clock,
    document: Arc<dyn Document>,
    time_id: String,
    uptime_id: String,
}

impl ClockDisplay {
    pub fn new(clock: Clock, document: Arc<dyn Document>) -> Self {
        Self {
            clock,
            document,
            time_id: DEFAULT_TIME_ID.to_string(),
            uptime_id: DEFAULT_UPTIME_ID.to_string(),
        }
    }

    pub fn with_elements(
        mut self,
        time_id: impl Into<String>,
        uptime_id: impl Into<String>,
    ) -> Self {
        self.time_id = time_id.into();
        self.uptime_id = uptime_id.into();
        self
    }

    /// Render both elements for the given instant
    pub fn render_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> PageResult<()>
    where
        Tz::Offset: Display,
    {
        let uptime = self.clock.uptime_at(now.with_timezone(&Utc));
        self.document.set_content(&self.time_id, &time_text(now))?;
        self.document.set_content(&self.uptime_id, &uptime_text(uptime))?;
        Ok(())
    }

    /// Refresh once per second in local time until the task is aborted
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
            loop {
                ticker.tick().await;
                if let Err(e) = self.render_at(&Local::now()) {
                    tracing::warn!("Clock refresh stopped: {}", e);
                    break;
                }
            }
        })
    }
}
