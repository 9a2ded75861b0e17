//! Downtime monitor.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────┐  tick   ┌──────────────┐  spawn   ┌──────────────┐
//!   │  ticker  │────────▶│ driver loop  │─────────▶│ probe task   │──── HEAD ───▶ target
//!   └──────────┘         │  (active.rs) │          │  (probe.rs)  │
//!                        │              │◀─────────┤              │
//!                        │              │  outcome └──────────────┘
//!                        │      │       │  (mpsc)
//!                        │      ▼       │
//!                        │  evaluator   │
//!                        │  (state.rs)  │
//!                        └──────┬───────┘
//!                               │ StatusEvent
//!                               ▼
//!                     ┌────────────────────┐
//!                     │ format.rs → sink   │───▶ stdout / log file
//!                     └────────────────────┘
//! ```

use std::time::Duration;

use clap::Parser;

use downtime_monitor::config::{Cli, ConfigError, USAGE};
use downtime_monitor::health::{HealthEvaluator, HttpProbe, Monitor};
use downtime_monitor::lifecycle::{signals, Shutdown};
use downtime_monitor::observability::{logging, metrics};
use downtime_monitor::output::open_sink;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    if !config.has_target() {
        println!("{}", USAGE);
        return Ok(());
    }
    let target = config.target_url().map_err(ConfigError::Target)?;

    logging::init(&config.observability.log_level);

    tracing::info!(
        url = %target,
        interval_secs = config.probe.interval_secs,
        timeout_secs = config.probe.timeout_secs,
        accepted_status = %config.probe.accepted_status,
        "Configuration loaded"
    );

    if let Some(addr) = config.observability.metrics_socket() {
        metrics::init_metrics(addr?)?;
    }

    let sink = open_sink(config.output.file.as_deref())?;
    let probe = HttpProbe::new(Duration::from_secs(config.probe.timeout_secs))?;
    let evaluator = HealthEvaluator::new(target.as_str(), config.probe.accepted_status);
    let monitor = Monitor::new(
        target,
        Duration::from_secs(config.probe.interval_secs),
        probe,
        evaluator,
        sink,
    );

    let shutdown = Shutdown::new();
    let mut run = tokio::spawn(monitor.run(shutdown.subscribe()));

    let result = tokio::select! {
        res = &mut run => res,
        _ = signals::terminate() => {
            shutdown.trigger();
            run.await
        }
    };
    result??;

    tracing::info!("Shutdown complete");
    Ok(())
}
