//! Pure performance metrics over a daily value series.
//!
//! Every function returns 0.0 on degenerate input (empty or single-point
//! series, zero variance, non-positive start value) instead of failing.

mod drawdown;

pub use drawdown::max_drawdown;

/// Trading days used to annualise daily figures.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annual risk-free rate used when none is configured.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Compound annual growth rate: `(end / start)^(1 / years) - 1`.
///
/// A negative growth ratio has no real root and yields 0.0.
pub fn cagr(start_value: f64, end_value: f64, years: f64) -> f64 {
    if start_value <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    let ratio = end_value / start_value;
    if ratio < 0.0 {
        return 0.0;
    }
    ratio.powf(1.0 / years) - 1.0
}

/// `(end - start) / start`.
pub fn total_return(start_value: f64, end_value: f64) -> f64 {
    if start_value <= 0.0 {
        return 0.0;
    }
    (end_value - start_value) / start_value
}

/// Day-over-day relative change. Steps off a zero value are skipped.
pub fn daily_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Annualised Sharpe ratio of daily `returns` against an annual
/// `risk_free_rate`.
///
/// The annual rate is converted to a daily one as `(1 + rf)^(1/252) - 1`.
/// Uses the population standard deviation of the excess returns.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let daily_risk_free = (1.0 + risk_free_rate).powf(1.0 / TRADING_DAYS_PER_YEAR) - 1.0;
    let excess: Vec<f64> = returns.iter().map(|r| r - daily_risk_free).collect();

    let n = excess.len() as f64;
    let mean = excess.iter().sum::<f64>() / n;
    let variance = excess.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if !(std_dev >= f64::EPSILON) {
        return 0.0;
    }

    mean / std_dev * TRADING_DAYS_PER_YEAR.sqrt()
}
