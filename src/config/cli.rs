//! Command line arguments.
//!
//! Flags override values from the optional config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{parse_config, ConfigError};
use crate::config::schema::{MonitorConfig, StatusRange};
use crate::config::validation::validate_config;

/// Printed when no usable target was given.
pub const USAGE: &str = "No url provided or url is too short\n\nUsage: downtime-monitor [OPTIONS] <TARGET>";

#[derive(Debug, Parser)]
#[command(name = "downtime-monitor")]
#[command(about = "Probe a URL periodically and record how long each outage lasts", long_about = None)]
pub struct Cli {
    /// Host or URL to probe (http:// is assumed when no scheme is given)
    pub target: Option<String>,

    /// Output file path, logs to stdout if not provided
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Ping frequency (seconds)
    #[arg(short = 'p', long = "period")]
    pub period: Option<u64>,

    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-probe timeout (seconds)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Status codes counted as up, e.g. 200-299
    #[arg(long, value_name = "LOW-HIGH")]
    pub accept: Option<StatusRange>,

    /// Serve Prometheus metrics on this address
    #[arg(long)]
    pub metrics_address: Option<String>,

    /// Log level for diagnostics on stderr
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Merge flags over the config file (or defaults) and validate the result.
    pub fn into_config(self) -> Result<MonitorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => parse_config(path)?,
            None => MonitorConfig::default(),
        };

        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(file) = self.file {
            config.output.file = Some(file);
        }
        if let Some(period) = self.period {
            config.probe.interval_secs = period;
        }
        if let Some(timeout) = self.timeout {
            config.probe.timeout_secs = timeout;
        }
        if let Some(range) = self.accept {
            config.probe.accepted_status = range;
        }
        if let Some(addr) = self.metrics_address {
            config.observability.metrics_address = Some(addr);
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
