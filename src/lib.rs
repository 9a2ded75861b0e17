//! Downtime monitor library.
//!
//! Probes a single target on a fixed period and records the length of every
//! outage window.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod output;

pub use config::MonitorConfig;
pub use health::{HealthEvaluator, Monitor, ProbeOutcome, StatusEvent};
pub use lifecycle::Shutdown;
