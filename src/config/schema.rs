//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::health::probe::DEFAULT_PROBE_TIMEOUT;

/// Shortest target accepted before the monitor refuses to start.
pub const MIN_TARGET_LEN: usize = 4;

/// Root configuration for the downtime monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Host or URL to probe. A missing scheme defaults to `http://`.
    pub target: String,

    /// Probe scheduling and classification.
    pub probe: ProbeConfig,

    /// Where status lines are written.
    pub output: OutputConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl MonitorConfig {
    /// Whether a target long enough to probe has been supplied.
    pub fn has_target(&self) -> bool {
        self.target.trim().len() >= MIN_TARGET_LEN
    }

    /// The target with its default scheme applied, parsed as a URL.
    pub fn target_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&normalize_target(&self.target))
    }
}

/// Prefix `http://` unless the target already names an http(s) scheme.
pub fn normalize_target(raw: &str) -> String {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Seconds between probes.
    pub interval_secs: u64,

    /// Per-probe deadline in seconds.
    pub timeout_secs: u64,

    /// Status codes that count as reachable.
    pub accepted_status: StatusRange,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            timeout_secs: DEFAULT_PROBE_TIMEOUT.as_secs(),
            accepted_status: StatusRange::default(),
        }
    }
}

/// Inclusive band of status codes treated as reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusRange {
    pub low: u16,
    pub high: u16,
}

impl StatusRange {
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, code: u16) -> bool {
        (self.low..=self.high).contains(&code)
    }
}

impl Default for StatusRange {
    /// Narrower than the full 2xx class.
    fn default() -> Self {
        Self::new(200, 250)
    }
}

impl fmt::Display for StatusRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status range '{0}', expected LOW-HIGH (e.g. 200-299)")]
pub struct ParseStatusRangeError(String);

impl FromStr for StatusRange {
    type Err = ParseStatusRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseStatusRangeError(s.to_string());
        let (low, high) = s.split_once('-').ok_or_else(invalid)?;
        let low = low.trim().parse().map_err(|_| invalid())?;
        let high = high.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(low, high))
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Append status lines to this file instead of stdout.
    pub file: Option<PathBuf>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus exporter bind address. Disabled when unset.
    pub metrics_address: Option<String>,
}

impl ObservabilityConfig {
    pub fn metrics_socket(&self) -> Option<Result<SocketAddr, std::net::AddrParseError>> {
        self.metrics_address.as_deref().map(str::parse)
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_target() {
        assert_eq!(normalize_target("example.com"), "http://example.com");
        assert_eq!(normalize_target("https://example.com"), "https://example.com");
        assert_eq!(normalize_target("http://example.com/health"), "http://example.com/health");
        assert_eq!(normalize_target("  10.0.0.1:8080 "), "http://10.0.0.1:8080");
        assert_eq!(normalize_target("httpbin.org"), "http://httpbin.org");
        assert_eq!(normalize_target("httpd.local/status"), "http://httpd.local/status");
        assert_eq!(normalize_target("HTTPS://example.com"), "HTTPS://example.com");
    }

    #[test]
    fn test_metrics_socket() {
        let mut observability = ObservabilityConfig::default();
        assert!(observability.metrics_socket().is_none());

        observability.metrics_address = Some("127.0.0.1:9100".into());
        assert_eq!(
            observability.metrics_socket().unwrap().unwrap(),
            "127.0.0.1:9100".parse::<SocketAddr>().unwrap()
        );

        observability.metrics_address = Some("localhost".into());
        assert!(observability.metrics_socket().unwrap().is_err());
    }

    #[test]
    fn test_target_presence() {
        let mut config = MonitorConfig::default();
        assert!(!config.has_target());

        config.target = "a.b".into();
        assert!(!config.has_target());

        config.target = "a.io".into();
        assert!(config.has_target());
        assert_eq!(config.target_url().unwrap().as_str(), "http://a.io/");
    }

    #[test]
    fn test_status_range() {
        let range = StatusRange::default();
        assert!(range.contains(200));
        assert!(range.contains(250));
        assert!(!range.contains(251));
        assert!(!range.contains(199));

        assert_eq!("200-299".parse::<StatusRange>().unwrap(), StatusRange::new(200, 299));
        assert_eq!(" 200 - 204".parse::<StatusRange>().unwrap(), StatusRange::new(200, 204));
        assert!("200".parse::<StatusRange>().is_err());
        assert!("ok-299".parse::<StatusRange>().is_err());
    }

    #[test]
    fn test_defaults_from_partial_toml() {
        let config: MonitorConfig = toml::from_str(
            r#"
            target = "example.com"

            [probe]
            interval_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.target, "example.com");
        assert_eq!(config.probe.interval_secs, 10);
        assert_eq!(config.probe.timeout_secs, 4);
        assert_eq!(config.probe.accepted_status, StatusRange::new(200, 250));
        assert!(config.output.file.is_none());
        assert_eq!(config.observability.log_level, "info");
    }
}
