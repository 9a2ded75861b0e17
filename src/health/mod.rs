//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Probing (probe.rs):
//!     HEAD request with deadline
//!     → ProbeOutcome (status code and/or error detail)
//!
//! Driver (active.rs):
//!     Periodic timer
//!     → Spawn one probe task per tick
//!     → Outcomes funnel through a channel to the driver
//!
//! State machine (state.rs):
//!     Up ←→ Down
//!     → StatusEvent on each transition
//! ```
//!
//! # Design Decisions
//! - One target per monitor
//! - Probes run concurrently, evaluation does not
//! - Outcomes are evaluated in completion order

pub mod active;
pub mod probe;
pub mod state;

pub use active::{Monitor, MonitorError};
pub use probe::{HttpProbe, Probe, ProbeOutcome};
pub use state::{HealthEvaluator, StatusEvent, TargetState};
