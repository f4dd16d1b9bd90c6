use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metrics derived from a simulated daily value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub cagr: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub start_value: f64,
    pub end_value: f64,
    pub years: f64,
    pub trading_day_count: usize,
}

/// Metrics together with the series they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub metrics: PerformanceMetrics,
    pub dates: Vec<NaiveDate>,
    pub portfolio_values: Vec<f64>,
    pub daily_returns: Vec<f64>,
}
