use rust_decimal::Decimal;
use thiserror::Error;

/// Errors reported by the tax engine to its callers.
///
/// The engine itself never fails on numeric input: every deduction step is
/// clamped at zero. These variants cover values a caller can get wrong before
/// the arithmetic starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxEngineError {
    /// The regime string was neither `new` nor `old`.
    #[error("invalid regime '{0}': expected 'new' or 'old'")]
    InvalidRegime(String),

    /// A numeric input was outside the range accepted by
    /// [`TaxInput::validate`](crate::TaxInput::validate).
    #[error("{field} out of range: {value}")]
    OutOfRangeInput { field: &'static str, value: Decimal },
}
