use chrono::{DateTime, Duration, Local};

/// What to do with a record whose publication time could not be parsed.
///
/// RSS dates vary wildly by provider, so the news path assumes recent
/// rather than silently dropping items (an intentional inclusion bias).
/// Well-formed feeds like the KEV CSV use the strict policy instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFallback {
    AssumeRecent,
    Drop,
}

/// Trailing-window recency check.
#[derive(Debug, Clone)]
pub struct RecencyFilter {
    window: Duration,
    fallback: DateFallback,
}

impl RecencyFilter {
    pub fn hours(hours: u64, fallback: DateFallback) -> Self {
        Self {
            window: Duration::hours(hours as i64),
            fallback,
        }
    }

    /// Strictly "published after (now - window)".
    pub fn is_recent(&self, published: Option<DateTime<Local>>) -> bool {
        self.is_recent_at(published, Local::now())
    }

    fn is_recent_at(&self, published: Option<DateTime<Local>>, now: DateTime<Local>) -> bool {
        match published {
            Some(ts) => ts > now - self.window,
            None => self.fallback == DateFallback::AssumeRecent,
        }
    }
}
