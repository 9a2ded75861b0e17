//! Reachability probe.
//!
//! # Responsibilities
//! - Issue one HEAD request against the target per call
//! - Enforce a per-probe deadline
//! - Report the result as data, never as an error
//!
//! # Design Decisions
//! - A response of any status is a completed probe; classification happens in the evaluator
//! - Timeouts map to the fixed detail "timeout"
//! - Redirects are followed, as a browser would
//! - Environment proxies are bypassed

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use tokio::time;
use url::Url;

/// Error detail recorded when a probe exceeds its deadline.
pub const TIMEOUT_DETAIL: &str = "timeout";

/// Default per-probe deadline.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(4);

/// Result of one reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Whether the probe completed with a protocol-level response.
    pub succeeded: bool,
    /// Status code of the response, when one was received.
    pub status_code: Option<u16>,
    /// Why the probe could not complete (timeout, connection refused, ...).
    pub error_detail: Option<String>,
}

impl ProbeOutcome {
    /// A completed probe that received `status`.
    pub fn response(status: u16) -> Self {
        Self {
            succeeded: true,
            status_code: Some(status),
            error_detail: None,
        }
    }

    /// A probe that could not complete.
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            status_code: None,
            error_detail: Some(detail.into()),
        }
    }

    /// A probe that ran past its deadline.
    pub fn timeout() -> Self {
        Self::error(TIMEOUT_DETAIL)
    }
}

/// Something that can check whether the target is reachable.
///
/// Implementations must not fail: every problem is folded into the returned
/// [`ProbeOutcome`].
pub trait Probe: Send + Sync + 'static {
    fn check(&self, target: &Url) -> impl Future<Output = ProbeOutcome> + Send;
}

/// HEAD-request probe backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("downtime-monitor/", env!("CARGO_PKG_VERSION")))
            // Measure the target itself, not whatever proxy the environment names.
            .no_proxy()
            .build()?;

        Ok(Self { client, timeout })
    }
}

impl Probe for HttpProbe {
    async fn check(&self, target: &Url) -> ProbeOutcome {
        let request = self.client.head(target.clone()).send();

        match time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => {
                let status = response.status();
                tracing::debug!(url = %target, status = %status, "Probe completed");
                ProbeOutcome::response(status.as_u16())
            }
            Ok(Err(e)) if e.is_timeout() => {
                tracing::debug!(url = %target, "Probe failed: client timeout");
                ProbeOutcome::timeout()
            }
            Ok(Err(e)) => {
                let detail = error_chain(&e);
                tracing::debug!(url = %target, error = %detail, "Probe failed: request error");
                ProbeOutcome::error(detail)
            }
            Err(_) => {
                tracing::debug!(url = %target, timeout_ms = self.timeout.as_millis() as u64, "Probe failed: timeout");
                ProbeOutcome::timeout()
            }
        }
    }
}

/// Flatten an error and its sources into one line.
///
/// `reqwest` keeps the interesting part (e.g. "Connection refused") a few
/// sources down.
fn error_chain(err: &dyn StdError) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    detail
}
