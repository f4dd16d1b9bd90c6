//! Services that gather collaborator data and hand it to the engines.

pub mod allocation;
pub mod backtest;

pub use allocation::{
    AllocationReport, AllocationService, AllocationStatus, AllocationSummary, PortfolioSummary,
};
pub use backtest::{
    BacktestReport, BacktestService, BacktestStatus, BacktestSummary, MultiPeriodReport,
    PeriodComparison,
};
