//! Logging utilities for fairval.
//!
//! The engine emits `tracing` events and spans only; nothing is printed
//! unless the host process installs a subscriber, for example via
//! [`init_logging`].

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Engine modules that log per-period detail at `debug`/`trace`.
///
/// Kept at `info` unless `RUST_LOG` says otherwise, so a `debug` base
/// level does not flood screener runs with several events per company.
pub const VERBOSE_MODULES: &[&str] = &[
    "fairval_engine::forecast",
    "fairval_engine::scorecard::dividend",
    "fairval_engine::tvm",
    "fairval_engine::valuation",
];

/// Build the default EnvFilter.
///
/// `RUST_LOG` takes precedence when set.
fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = String::from(log_level);
    for module in VERBOSE_MODULES {
        directives.push_str(&format!(",{}=info", module));
    }

    EnvFilter::new(&directives)
}

/// Initialize logging with the given configuration.
///
/// # Arguments
///
/// * `log_level` - Base log level (trace, debug, info, warn, error)
/// * `log_format` - Output format: "json" for structured JSON, "pretty" for human-readable
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging(log_level: &str, log_format: &str) {
    let filter = build_filter(log_level);

    let subscriber = tracing_subscriber::registry().with(filter);

    if log_format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(true)
            .with_file(false)
            .with_line_number(false);
        let _ = subscriber.with(fmt_layer).try_init();
    }

    tracing::info!(
        log_level = %log_level,
        log_format = %log_format,
        "Logging initialized"
    );
}

/// Initialize logging from the observability section of the config.
pub fn init_from_config(config: &ObservabilityConfig) {
    init_logging(&config.log_level, &config.log_format);
}

/// Create a tracing span for a single valuation.
///
/// # Example
///
/// ```ignore
/// let span = valuation_span!(profile.ticker, method = ?method);
/// let _enter = span.enter();
/// ```
#[macro_export]
macro_rules! valuation_span {
    ($ticker:expr) => {
        tracing::debug_span!("valuation", ticker = %$ticker)
    };
    ($ticker:expr, $($field:tt)*) => {
        tracing::debug_span!("valuation", ticker = %$ticker, $($field)*)
    };
}

/// Create a tracing span for a screening run over a universe.
#[macro_export]
macro_rules! screen_span {
    ($universe_size:expr) => {
        tracing::info_span!("screen", universe = $universe_size)
    };
    ($universe_size:expr, $($field:tt)*) => {
        tracing::info_span!("screen", universe = $universe_size, $($field)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_modules_list() {
        assert!(VERBOSE_MODULES.contains(&"fairval_engine::valuation"));
        assert!(VERBOSE_MODULES.contains(&"fairval_engine::tvm"));
        assert!(!VERBOSE_MODULES.contains(&"fairval_engine::series"));
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging("debug", "pretty");
        init_logging("info", "json");
    }

    #[test]
    fn test_spans_build_without_subscriber() {
        let span = valuation_span!("ACME", method = "free_cash_flow");
        let _enter = span.enter();
        let screen = screen_span!(3usize);
        let _screen = screen.enter();
    }
}
