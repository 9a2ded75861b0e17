//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Target presence is not checked here; a missing target is a usage error, not a fault

use thiserror::Error;

use crate::config::schema::MonitorConfig;

/// Longest interval or timeout accepted, one day.
pub const MAX_PERIOD_SECS: u64 = 86_400;

/// Lowest and highest codes a status line can carry.
const STATUS_CODE_BOUNDS: std::ops::RangeInclusive<u16> = 100..=999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("probe.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("probe.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("probe.interval_secs {0} exceeds the 86400s limit")]
    IntervalTooLong(u64),

    #[error("probe.timeout_secs {0} exceeds the 86400s limit")]
    TimeoutTooLong(u64),

    #[error("probe.accepted_status low bound {low} exceeds high bound {high}")]
    InvertedStatusRange { low: u16, high: u16 },

    #[error("status code {0} is outside 100..=999")]
    StatusCodeOutOfBounds(u16),

    #[error("target '{0}' is not a valid URL")]
    InvalidTarget(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.probe.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.probe.interval_secs > MAX_PERIOD_SECS {
        errors.push(ValidationError::IntervalTooLong(config.probe.interval_secs));
    }
    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.probe.timeout_secs > MAX_PERIOD_SECS {
        errors.push(ValidationError::TimeoutTooLong(config.probe.timeout_secs));
    }

    let range = config.probe.accepted_status;
    for code in [range.low, range.high] {
        if !STATUS_CODE_BOUNDS.contains(&code) {
            errors.push(ValidationError::StatusCodeOutOfBounds(code));
        }
    }
    if range.low > range.high {
        errors.push(ValidationError::InvertedStatusRange {
            low: range.low,
            high: range.high,
        });
    }

    if config.has_target() && config.target_url().is_err() {
        errors.push(ValidationError::InvalidTarget(config.target.clone()));
    }

    if let Some(Err(_)) = config.observability.metrics_socket() {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone().unwrap_or_default(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
