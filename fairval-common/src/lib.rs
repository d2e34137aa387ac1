//! Fairval Common - Shared configuration, errors, and logging for the valuation engine.
//!
//! This crate provides:
//! - Configuration types and loading (`~/.fairval/config.json` plus `FAIRVAL_*` overrides)
//! - Configuration validation
//! - Error types and handling utilities
//! - Logging setup and tracing span helpers

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{Config, ObservabilityConfig, ScreenerConfig, ValuationConfig};
pub use error::{Error, Result};
pub use validation::{Validate, ValidationError, ValidationResult};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ScreenerConfig, ValuationConfig};
    pub use crate::error::{Error, Result};
    pub use crate::logging::init_logging;
    pub use crate::validation::{Validate, ValidationError};
}
