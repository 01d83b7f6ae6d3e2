//! Errors raised by the validation layer in front of the analysis pipeline.
//!
//! The numeric stages themselves never fail. These errors only describe pipeline
//! configurations that are programming mistakes.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ConfigError {
    #[error("moving average window must be at least 1 sample")]
    ZeroWindow,

    #[error("FIR kernel must have at least one coefficient")]
    EmptyKernel,

    #[error("FIR coefficient {index} is not finite")]
    NonFiniteCoefficient { index: usize },

    #[error("peak capacity must be at least 1")]
    ZeroCapacity,

    #[error("guard fraction must be finite and non-negative, got {fraction}")]
    InvalidGuard { fraction: f64 },

    #[error("peak threshold must not be NaN")]
    InvalidThreshold,
}
