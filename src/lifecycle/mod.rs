//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → Load config → Validate → Open sink → Start monitor
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop scheduling probes → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - In-flight probes are abandoned, not drained

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
