//! Status output subsystem.
//!
//! # Data Flow
//! ```text
//! StatusEvent
//!     → format.rs (single line with INFO/WARN/RESULT marker)
//!     → sink.rs (timestamp prefix, append, flush)
//!     → stdout or log file
//! ```
//!
//! # Design Decisions
//! - Status lines are the product output; diagnostics go through `tracing` instead
//! - Output file is opened once at startup so a bad path fails before monitoring begins
//! - A failed write is fatal; there is no fallback sink

pub mod format;
pub mod sink;

pub use sink::{open_sink, ConsoleSink, FileSink, Sink, SinkError};
