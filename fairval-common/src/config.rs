//! Configuration management for fairval.
//!
//! Configuration lives in a single file at `~/.fairval/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (FAIRVAL_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `FAIRVAL_HORIZON_YEARS` → valuation.horizon_years
//! - `FAIRVAL_DISCOUNT_RATE` → valuation.discount_rate_pct
//! - `FAIRVAL_PERPETUAL_GROWTH` → valuation.perpetual_growth_pct
//! - `FAIRVAL_MIN_MARGIN_OF_SAFETY` → screener.min_margin_of_safety_pct
//! - `FAIRVAL_LOG_LEVEL` → observability.log_level
//! - `FAIRVAL_LOG_FORMAT` → observability.log_format

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".fairval"),
        |dirs| dirs.home_dir().join(".fairval"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration. Every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default valuation parameters
    #[serde(default)]
    pub valuation: ValuationConfig,

    /// Screener thresholds
    #[serde(default)]
    pub screener: ScreenerConfig,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FAIRVAL_HORIZON_YEARS") {
            match v.trim().parse() {
                Ok(years) => self.valuation.horizon_years = years,
                Err(_) => tracing::warn!(value = %v, "Ignoring invalid FAIRVAL_HORIZON_YEARS"),
            }
        }
        if let Some(v) = lookup("FAIRVAL_DISCOUNT_RATE") {
            match v.trim().parse() {
                Ok(rate) => self.valuation.discount_rate_pct = rate,
                Err(_) => tracing::warn!(value = %v, "Ignoring invalid FAIRVAL_DISCOUNT_RATE"),
            }
        }
        if let Some(v) = lookup("FAIRVAL_PERPETUAL_GROWTH") {
            match v.trim().parse() {
                Ok(rate) => self.valuation.perpetual_growth_pct = rate,
                Err(_) => tracing::warn!(value = %v, "Ignoring invalid FAIRVAL_PERPETUAL_GROWTH"),
            }
        }
        if let Some(v) = lookup("FAIRVAL_MIN_MARGIN_OF_SAFETY") {
            match v.trim().parse() {
                Ok(pct) => self.screener.min_margin_of_safety_pct = pct,
                Err(_) => {
                    tracing::warn!(value = %v, "Ignoring invalid FAIRVAL_MIN_MARGIN_OF_SAFETY")
                }
            }
        }
        if let Some(level) = lookup("FAIRVAL_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("FAIRVAL_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }
}

// ============================================================================
// Valuation Configuration
// ============================================================================

/// Default parameters for DCF / DDM valuation requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Explicit forecast horizon in years
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Discount rate (%)
    #[serde(default = "default_discount_rate_pct")]
    pub discount_rate_pct: f64,

    /// Perpetual (terminal) growth rate (%)
    #[serde(default = "default_perpetual_growth_pct")]
    pub perpetual_growth_pct: f64,
}

fn default_horizon_years() -> u32 {
    5
}

fn default_discount_rate_pct() -> f64 {
    10.0
}

fn default_perpetual_growth_pct() -> f64 {
    2.5
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            horizon_years: default_horizon_years(),
            discount_rate_pct: default_discount_rate_pct(),
            perpetual_growth_pct: default_perpetual_growth_pct(),
        }
    }
}

// ============================================================================
// Screener Configuration
// ============================================================================

/// Thresholds for ranking a universe of valuations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Minimum margin of safety (%) for a company to be ranked
    #[serde(default)]
    pub min_margin_of_safety_pct: f64,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            min_margin_of_safety_pct: 0.0,
        }
    }
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "json" or "pretty"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}
