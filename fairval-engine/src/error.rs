//! Engine error types.
//!
//! Only the IRR root search can fail. Valuation, scorecard and allocation
//! degrade to zero-valued results instead of returning errors.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Numerical failures raised by the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// IRR needs at least one inflow and one outflow.
    #[error("Invalid cash flow signs: IRR requires at least one positive and one negative value")]
    InvalidCashFlowSigns,

    /// IRR search exhausted its evaluation budget.
    #[error("No convergence: IRR not found within {evaluations} NPV evaluations")]
    NoConvergence { evaluations: usize },
}
