use crate::error::{Failure, ServiceError};
use crate::service::allocation::AllocationService;
use backtest_engine::{simulate_with_risk_free_rate, BacktestPeriod, DEFAULT_RISK_FREE_RATE};
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use insight::model::{
    allocation::CurrentAllocation,
    market_data::HistoricalSeries,
    performance::{PerformanceMetrics, PerformanceReport},
    symbol::Symbol,
};
use insight::HistoricalDataSource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub period: BacktestPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_value: f64,
    pub symbols: Vec<Symbol>,
    pub allocation: CurrentAllocation,
}

/// One backtest over the current allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub summary: BacktestSummary,
    pub metrics: PerformanceMetrics,
    pub detail: PerformanceReport,
}

/// Headline metrics for side-by-side comparison of periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub cagr: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

impl From<&PerformanceMetrics> for PeriodComparison {
    fn from(metrics: &PerformanceMetrics) -> Self {
        Self {
            cagr: metrics.cagr,
            total_return: metrics.total_return,
            max_drawdown: metrics.max_drawdown,
            sharpe_ratio: metrics.sharpe_ratio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPeriodReport {
    pub results: BTreeMap<BacktestPeriod, Result<BacktestReport, Failure>>,
    /// Only periods that succeeded.
    pub comparison: BTreeMap<BacktestPeriod, PeriodComparison>,
}

impl MultiPeriodReport {
    pub fn success(&self) -> bool {
        self.results.values().any(Result::is_ok)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestStatus {
    pub history_configured: bool,
    pub allocation_configured: bool,
    pub fully_configured: bool,
}

/// Replays the current allocation over historical bars.
pub struct BacktestService {
    history: Option<Arc<dyn HistoricalDataSource>>,
    allocation: Option<Arc<AllocationService>>,
    risk_free_rate: f64,
}

impl Default for BacktestService {
    fn default() -> Self {
        Self {
            history: None,
            allocation: None,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl BacktestService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, history: Arc<dyn HistoricalDataSource>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_allocation_service(mut self, allocation: Arc<AllocationService>) -> Self {
        self.allocation = Some(allocation);
        self
    }

    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Daily bars for every requested symbol. Symbols the collaborator has no
    /// data for map to an empty list.
    pub async fn historical_data(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries, ServiceError> {
        let history = self
            .history
            .as_deref()
            .ok_or(ServiceError::MissingCollaborator("history"))?;
        if symbols.is_empty() {
            return Err(ServiceError::NoSymbols);
        }

        let mut fetched = history
            .daily_bars(symbols, start, end)
            .await
            .map_err(|e| ServiceError::upstream("history", e))?;

        Ok(symbols
            .iter()
            .map(|symbol| {
                let bars = fetched.remove(symbol).unwrap_or_default();
                if bars.is_empty() {
                    warn!("No historical bars for {symbol} between {start} and {end}");
                }
                (symbol.clone(), bars)
            })
            .collect())
    }

    /// Backtests the current allocation over `period` ending today.
    pub async fn run_backtest(
        &self,
        period: BacktestPeriod,
        initial_value: f64,
    ) -> Result<BacktestReport, ServiceError> {
        self.run_backtest_ending(period, Local::now().date_naive(), initial_value)
            .await
    }

    /// Backtests the current allocation over `period` ending on `end`.
    pub async fn run_backtest_ending(
        &self,
        period: BacktestPeriod,
        end: NaiveDate,
        initial_value: f64,
    ) -> Result<BacktestReport, ServiceError> {
        let allocation_service = self
            .allocation
            .as_deref()
            .ok_or(ServiceError::MissingCollaborator("allocation"))?;

        let allocation = allocation_service.current_allocation().await?;
        if allocation.is_empty() {
            return Err(ServiceError::EmptyAllocation);
        }

        let (start_date, end_date) = period.date_range_ending(end);
        let symbols: Vec<Symbol> = allocation.keys().cloned().collect();
        let history = self.historical_data(&symbols, start_date, end_date).await?;

        let detail =
            simulate_with_risk_free_rate(&allocation, &history, initial_value, self.risk_free_rate)?;
        info!(
            "{period} backtest over {} days: total return {:.4}",
            detail.metrics.trading_day_count, detail.metrics.total_return
        );

        Ok(BacktestReport {
            summary: BacktestSummary {
                period,
                start_date,
                end_date,
                initial_value,
                symbols,
                allocation,
            },
            metrics: detail.metrics.clone(),
            detail,
        })
    }

    /// Runs every period concurrently, ending today. An empty list means
    /// all supported periods.
    pub async fn run_multiple_periods(
        &self,
        periods: &[BacktestPeriod],
        initial_value: f64,
    ) -> MultiPeriodReport {
        self.run_multiple_periods_ending(periods, Local::now().date_naive(), initial_value)
            .await
    }

    pub async fn run_multiple_periods_ending(
        &self,
        periods: &[BacktestPeriod],
        end: NaiveDate,
        initial_value: f64,
    ) -> MultiPeriodReport {
        let periods: &[BacktestPeriod] = if periods.is_empty() {
            &BacktestPeriod::ALL
        } else {
            periods
        };

        let outcomes = join_all(periods.iter().map(|period| async move {
            let outcome = self.run_backtest_ending(*period, end, initial_value).await;
            (*period, outcome)
        }))
        .await;

        let mut results = BTreeMap::new();
        let mut comparison = BTreeMap::new();
        for (period, outcome) in outcomes {
            match outcome {
                Ok(report) => {
                    comparison.insert(period, PeriodComparison::from(&report.metrics));
                    results.insert(period, Ok(report));
                }
                Err(err) => {
                    warn!("{period} backtest failed: {err}");
                    results.insert(period, Err(err.to_failure()));
                }
            }
        }

        MultiPeriodReport {
            results,
            comparison,
        }
    }

    pub fn status(&self) -> BacktestStatus {
        let history_configured = self.history.is_some();
        let allocation_configured = self.allocation.is_some();
        BacktestStatus {
            history_configured,
            allocation_configured,
            fully_configured: history_configured && allocation_configured,
        }
    }
}
