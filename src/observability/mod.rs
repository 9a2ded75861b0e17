//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Driver and probes produce:
//!     → logging.rs (structured diagnostics on stderr)
//!     → metrics.rs (probe counters, up gauge, outage histogram)
//!
//! Consumers:
//!     → Terminal or log collector
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
