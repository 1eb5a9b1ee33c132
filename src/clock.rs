use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::constants::CLOCK_REFRESH_MS;

/// Taskbar clock. Re-reads the wall clock at most once per interval.
#[derive(Debug, Clone)]
pub struct Clock {
    interval: Duration,
    source: fn() -> DateTime<Local>,
    last_refresh: Option<Instant>,
    text: String,
}

impl Clock {
    pub fn new() -> Self {
        Self::with_source(Duration::from_millis(CLOCK_REFRESH_MS), Local::now)
    }

    pub fn with_source(interval: Duration, source: fn() -> DateTime<Local>) -> Self {
        Self {
            interval,
            source,
            last_refresh: None,
            text: String::new(),
        }
    }

    /// Refreshes the text if the interval has elapsed. Returns whether the
    /// displayed text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_refresh
            && now.saturating_duration_since(last) < self.interval
        {
            return false;
        }
        self.last_refresh = Some(now);
        let text = format_time(&(self.source)());
        let changed = text != self.text;
        self.text = text;
        changed
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// `3:05 PM` style: unpadded hour, two-digit minute.
pub fn format_time(time: &DateTime<Local>) -> String {
    time.format("%-I:%M %p").to_string()
}
