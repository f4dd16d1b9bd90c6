use thiserror::Error;

/// Failures raised by the performance engine and the period helper.
///
/// The allocation engine never fails: degenerate input collapses to an empty
/// recommendation instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Empty allocation, empty history, or fewer than two usable dates.
    #[error("Insufficient data for performance calculation")]
    InsufficientData,

    /// The allocation weights do not add up to a positive total.
    #[error("Invalid portfolio allocation - total value must be positive")]
    InvalidAllocation,

    /// No trading day is shared by every allocated symbol.
    #[error("No common dates found across symbols")]
    NoCommonDates,

    /// The period label is not one of 1Y, 5Y or 10Y.
    #[error("Unsupported period: {0}. Supported periods: 1Y, 5Y, 10Y")]
    UnsupportedPeriod(String),
}

impl EngineError {
    /// Stable reason code callers can branch on.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InsufficientData => "insufficient_data",
            EngineError::InvalidAllocation => "invalid_allocation",
            EngineError::NoCommonDates => "no_common_dates",
            EngineError::UnsupportedPeriod(_) => "unsupported_period",
        }
    }
}
