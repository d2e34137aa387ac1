//! Configuration validation.
//!
//! Ensures configured valuation defaults are usable before they reach the
//! engine. The engine itself never guards degenerate inputs such as a
//! discount rate at or below the perpetual growth rate.

use thiserror::Error;

use crate::config::{Config, ObservabilityConfig, ScreenerConfig, ValuationConfig};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Configuration conflict: {reason}")]
    Conflict { reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["json", "pretty"];

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.valuation.validate() {
            errors.push(e);
        }
        if let Err(e) = self.screener.validate() {
            errors.push(e);
        }
        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }

    /// Load, apply environment overrides, and validate configuration.
    pub fn load_and_validate() -> anyhow::Result<Self> {
        let config = Self::load_with_env()?;
        config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(config)
    }
}

impl Validate for ValuationConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.horizon_years == 0 {
            return Err(ValidationError::InvalidValue {
                field: "valuation.horizon_years".into(),
                reason: "must be at least 1".into(),
            });
        }

        for (field, value) in [
            ("valuation.discount_rate_pct", self.discount_rate_pct),
            ("valuation.perpetual_growth_pct", self.perpetual_growth_pct),
        ] {
            if !value.is_finite() || value <= -100.0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    reason: format!("{value} is not a usable rate"),
                });
            }
        }

        // Gordon growth terminal value is undefined unless discount > growth
        if self.discount_rate_pct <= self.perpetual_growth_pct {
            return Err(ValidationError::Conflict {
                reason: format!(
                    "discount rate {}% must exceed perpetual growth {}%",
                    self.discount_rate_pct, self.perpetual_growth_pct
                ),
            });
        }

        Ok(())
    }
}

impl Validate for ScreenerConfig {
    fn validate(&self) -> ValidationResult<()> {
        if !self.min_margin_of_safety_pct.is_finite() || self.min_margin_of_safety_pct >= 100.0 {
            return Err(ValidationError::InvalidValue {
                field: "screener.min_margin_of_safety_pct".into(),
                reason: "must be a finite percentage below 100".into(),
            });
        }
        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("expected one of {LOG_LEVELS:?}"),
            });
        }
        if !LOG_FORMATS.contains(&self.log_format.as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("expected one of {LOG_FORMATS:?}"),
            });
        }
        Ok(())
    }
}
