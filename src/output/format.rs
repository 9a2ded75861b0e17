//! Status line rendering.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

use crate::health::StatusEvent;

/// Marker for informational lines.
pub const INFO_MARKER: &str = "INFO :: ";
/// Marker for outage onset.
pub const WARN_MARKER: &str = "WARN :: ";
/// Marker for outage summaries.
pub const RESULT_MARKER: &str = "RESULT :: ";

/// Timestamp layout prefixed to every written line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An outage length split into whole hours, minutes and seconds.
///
/// Hours are not wrapped into days. Sub-second remainders are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Downtime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl From<Duration> for Downtime {
    fn from(duration: Duration) -> Self {
        let total = duration.as_secs();
        Self {
            hours: total / 3600,
            minutes: total % 3600 / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Downtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours, {} minutes and {} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Line written once when monitoring begins.
pub fn startup_line(target: &str) -> String {
    format!("{}Starting downtime check of url: {}", INFO_MARKER, target)
}

/// Render a status event as a single line, without timestamp.
pub fn render(event: &StatusEvent) -> String {
    match event {
        StatusEvent::OutageStarted { target, diagnostic } => {
            let mut line = format!("{}Requests to {} failing.", WARN_MARKER, target);
            if !diagnostic.is_empty() {
                line.push(' ');
                line.push_str(diagnostic);
            }
            line
        }
        StatusEvent::OutageEnded { target, down_duration } => format!(
            "{}Failed to connect to {} for {}.",
            RESULT_MARKER,
            target,
            Downtime::from(*down_duration)
        ),
    }
}

/// Prefix `line` with `[YYYY-MM-DD HH:MM:SS] `.
pub fn timestamped<Tz>(at: &DateTime<Tz>, line: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("[{}] {}", at.format(TIMESTAMP_FORMAT), line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Utc, TimeZone};

    #[test]
    fn test_downtime_decomposition() {
        assert_eq!(
            Downtime::from(Duration::from_secs(3661)).to_string(),
            "1 hours, 1 minutes and 1 seconds"
        );
        assert_eq!(
            Downtime::from(Duration::from_secs(5)).to_string(),
            "0 hours, 0 minutes and 5 seconds"
        );
        assert_eq!(
            Downtime::from(Duration::from_millis(59_999)).to_string(),
            "0 hours, 0 minutes and 59 seconds"
        );
        // Hours keep counting past a day.
        assert_eq!(
            Downtime::from(Duration::from_secs(100 * 3600 + 59 * 60)).to_string(),
            "100 hours, 59 minutes and 0 seconds"
        );
    }

    #[test]
    fn test_downtime_parts_recompose() {
        for total in [0u64, 1, 59, 60, 61, 3599, 3600, 3601, 86_399, 86_400, 1_000_003] {
            let d = Downtime::from(Duration::from_secs(total));
            assert!(d.minutes < 60 && d.seconds < 60, "{:?}", d);
            assert_eq!(d.hours * 3600 + d.minutes * 60 + d.seconds, total);
        }
    }

    #[test]
    fn test_render_outage_started() {
        let event = StatusEvent::OutageStarted {
            target: "http://example.com".into(),
            diagnostic: "Status code 500.".into(),
        };
        assert_eq!(
            render(&event),
            "WARN :: Requests to http://example.com failing. Status code 500."
        );

        let bare = StatusEvent::OutageStarted {
            target: "http://example.com".into(),
            diagnostic: String::new(),
        };
        assert_eq!(render(&bare), "WARN :: Requests to http://example.com failing.");
    }

    #[test]
    fn test_render_outage_ended() {
        let event = StatusEvent::OutageEnded {
            target: "http://example.com".into(),
            down_duration: Duration::from_secs(5),
        };
        assert_eq!(
            render(&event),
            "RESULT :: Failed to connect to http://example.com for 0 hours, 0 minutes and 5 seconds."
        );
    }

    #[test]
    fn test_timestamp_prefix() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(
            timestamped(&at, &startup_line("http://example.com")),
            "[2024-03-09 07:05:02] INFO :: Starting downtime check of url: http://example.com"
        );
    }
}
