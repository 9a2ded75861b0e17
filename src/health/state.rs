//! Target health state machine.
//!
//! # States
//! - Up: probes are succeeding (initial state)
//! - Down: an outage is in progress, with the time it was first observed
//!
//! # State Transitions
//! ```text
//! Up   → Down: first failing outcome      (emits OutageStarted)
//! Down → Up:   first succeeding outcome   (emits OutageEnded with downtime)
//! ```
//!
//! # Design Decisions
//! - No hysteresis: one outcome is enough to flip state
//! - Time is supplied by the caller; the evaluator never reads a clock
//! - The state change and the emitted event are produced by the same match arm

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::StatusRange;
use crate::health::probe::ProbeOutcome;

/// Reachability of the target as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Up,
    Down { since: DateTime<Utc> },
}

/// A transition worth reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    OutageStarted {
        target: String,
        diagnostic: String,
    },
    OutageEnded {
        target: String,
        down_duration: Duration,
    },
}

/// Consumes probe outcomes one at a time and reports outage transitions.
#[derive(Debug, Clone)]
pub struct HealthEvaluator {
    target: String,
    accepted: StatusRange,
    state: TargetState,
}

impl HealthEvaluator {
    pub fn new(target: impl Into<String>, accepted: StatusRange) -> Self {
        Self {
            target: target.into(),
            accepted,
            state: TargetState::Up,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn is_up(&self) -> bool {
        matches!(self.state, TargetState::Up)
    }

    /// Whether `outcome` counts against the target.
    pub fn is_failing(&self, outcome: &ProbeOutcome) -> bool {
        !outcome.succeeded
            || outcome
                .status_code
                .is_some_and(|code| !self.accepted.contains(code))
    }

    /// Apply one outcome observed at `now`.
    pub fn evaluate(&mut self, outcome: &ProbeOutcome, now: DateTime<Utc>) -> Option<StatusEvent> {
        let failing = self.is_failing(outcome);

        match (self.state, failing) {
            (TargetState::Up, true) => {
                self.state = TargetState::Down { since: now };
                Some(StatusEvent::OutageStarted {
                    target: self.target.clone(),
                    diagnostic: diagnostic(outcome),
                })
            }
            (TargetState::Down { since }, false) => {
                self.state = TargetState::Up;
                // A clock step backwards yields zero rather than a negative outage.
                let down_duration = (now - since).to_std().unwrap_or_default();
                Some(StatusEvent::OutageEnded {
                    target: self.target.clone(),
                    down_duration,
                })
            }
            (TargetState::Up, false) | (TargetState::Down { .. }, true) => None,
        }
    }
}

/// Human summary of a failing outcome; empty when it carries no detail.
fn diagnostic(outcome: &ProbeOutcome) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(code) = outcome.status_code {
        parts.push(format!("Status code {}.", code));
    }
    if let Some(detail) = &outcome.error_detail {
        parts.push(format!("Error message: {}", detail));
    }
    parts.join(" ")
}
