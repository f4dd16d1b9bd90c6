pub mod metrics;
pub mod period;
pub mod simulation;

pub use metrics::{
    cagr, daily_returns, max_drawdown, sharpe_ratio, total_return, DEFAULT_RISK_FREE_RATE,
    TRADING_DAYS_PER_YEAR,
};
pub use period::{period_range, BacktestPeriod};
pub use simulation::{simulate, simulate_with_risk_free_rate};
