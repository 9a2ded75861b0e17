//! Active monitoring loop.
//!
//! # Responsibilities
//! - Periodically probe the target
//! - Feed outcomes to the single evaluator in completion order
//! - Write status lines for every transition
//!
//! # Design Decisions
//! - Sink writes are blocking I/O and run on the blocking pool; the loop awaits each one so
//!   lines keep their order

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::{self, JoinError};
use tokio::time::{self, Instant, MissedTickBehavior};
use url::Url;

use crate::health::probe::{Probe, ProbeOutcome};
use crate::health::state::{HealthEvaluator, StatusEvent};
use crate::observability::metrics;
use crate::output::format;
use crate::output::{Sink, SinkError};

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("probe interval {0:?} cannot be scheduled")]
    Interval(Duration),

    #[error("status line writer panicked: {0}")]
    Writer(#[from] JoinError),
}

pub struct Monitor<P: Probe> {
    target: Url,
    interval: Duration,
    probe: Arc<P>,
    evaluator: HealthEvaluator,
    sink: Arc<dyn Sink>,
}

impl<P: Probe> Monitor<P> {
    pub fn new(
        target: Url,
        interval: Duration,
        probe: P,
        evaluator: HealthEvaluator,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            target,
            interval,
            probe: Arc::new(probe),
            evaluator,
            sink,
        }
    }

    /// Run until `shutdown` fires or the sink fails.
    ///
    /// Probes still in flight at shutdown are abandoned.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> Result<(), MonitorError> {
        tracing::info!(
            url = %self.target,
            interval_ms = self.interval.as_millis() as u64,
            "Downtime monitor starting"
        );
        // First probe one period after start.
        let first_tick = Instant::now()
            .checked_add(self.interval)
            .filter(|_| !self.interval.is_zero())
            .ok_or(MonitorError::Interval(self.interval))?;

        self.emit(format::startup_line(self.target.as_str())).await?;
        metrics::record_target_up(self.evaluator.is_up());

        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();

        let mut ticker = time::interval_at(first_tick, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.dispatch(&outcome_tx);
                }
                Some(outcome) = outcome_rx.recv() => {
                    if let Some(line) = self.record(&outcome) {
                        self.emit(line).await?;
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Downtime monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        Ok(())
    }

    fn dispatch(&self, outcome_tx: &mpsc::UnboundedSender<ProbeOutcome>) {
        let probe = Arc::clone(&self.probe);
        let target = self.target.clone();
        let outcome_tx = outcome_tx.clone();

        tokio::spawn(async move {
            let outcome = probe.check(&target).await;
            // The receiver is gone once the loop has stopped.
            let _ = outcome_tx.send(outcome);
        });
    }

    /// Evaluate one outcome; returns the status line to write, if any.
    fn record(&mut self, outcome: &ProbeOutcome) -> Option<String> {
        let failing = self.evaluator.is_failing(outcome);
        metrics::record_probe(!failing);

        let event = self.evaluator.evaluate(outcome, Utc::now())?;

        match &event {
            StatusEvent::OutageStarted { diagnostic, .. } => {
                tracing::warn!(url = %self.target, diagnostic = %diagnostic, "Target went down");
                metrics::record_outage_started();
            }
            StatusEvent::OutageEnded { down_duration, .. } => {
                tracing::info!(
                    url = %self.target,
                    down_secs = down_duration.as_secs(),
                    "Target recovered"
                );
                metrics::record_outage_ended(*down_duration);
            }
        }
        metrics::record_target_up(self.evaluator.is_up());

        Some(format::render(&event))
    }

    async fn emit(&self, line: String) -> Result<(), MonitorError> {
        let sink = Arc::clone(&self.sink);
        task::spawn_blocking(move || sink.write(&line)).await??;
        Ok(())
    }
}
