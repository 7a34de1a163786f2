use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};

/// Render a cursor the way the historical endpoints expect their `date`
/// parameter: second precision, trailing `Z`.
pub fn format_snapshot(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

pub fn parse_snapshot(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid snapshot timestamp {raw:?}"))
}

/// Walks a historical range from `to` back towards `from`, following the
/// `previous_timestamp` cursor the API returns, stepping at least
/// `interval` per fetch. Terminates when the cursor crosses `from` or the
/// API reports no earlier snapshot.
#[derive(Debug, Clone)]
pub struct BackwardWindow {
    from: DateTime<Utc>,
    cursor: DateTime<Utc>,
    interval: Duration,
    exhausted: bool,
}

impl BackwardWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, interval_mins: i64) -> Self {
        Self {
            from,
            cursor: to,
            interval: Duration::minutes(interval_mins),
            exhausted: false,
        }
    }

    /// The snapshot to fetch next, or `None` once the walk is over.
    pub fn next_snapshot(&mut self) -> Option<String> {
        if self.exhausted || self.cursor <= self.from {
            return None;
        }
        Some(format_snapshot(self.cursor))
    }

    /// Step the cursor after a fetch. `previous` is the API's
    /// `previous_timestamp`; its absence is the normal end-of-history
    /// signal, not an error.
    pub fn advance(&mut self, previous: Option<&str>) -> Result<()> {
        let Some(previous) = previous else {
            self.exhausted = true;
            return Ok(());
        };
        let previous = parse_snapshot(previous)?;
        self.cursor = (self.cursor - self.interval).min(previous);
        Ok(())
    }
}

/// Fixed-interval forward walk over `[from, to]`, both ends included.
#[derive(Debug, Clone)]
pub struct ForwardWindow {
    cursor: DateTime<Utc>,
    to: DateTime<Utc>,
    interval: Duration,
}

impl ForwardWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, interval_mins: i64) -> Self {
        Self {
            cursor: from,
            to,
            interval: Duration::minutes(interval_mins),
        }
    }
}

impl Iterator for ForwardWindow {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.cursor > self.to {
            return None;
        }
        let current = format_snapshot(self.cursor);
        self.cursor += self.interval;
        Some(current)
    }
}
