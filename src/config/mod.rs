//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (cli.rs)
//!     → optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → CLI flags override file values
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the bare `downtime-monitor <target>` form works
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::{Cli, USAGE};
pub use loader::ConfigError;
pub use schema::MonitorConfig;
pub use schema::StatusRange;
