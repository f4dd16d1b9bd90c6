//! Buy-and-hold simulation over daily closes.

use crate::metrics::{
    cagr, daily_returns, max_drawdown, sharpe_ratio, total_return, DEFAULT_RISK_FREE_RATE,
    TRADING_DAYS_PER_YEAR,
};
use chrono::NaiveDate;
use insight::model::{
    market_data::HistoricalSeries,
    performance::{PerformanceMetrics, PerformanceReport},
    symbol::Symbol,
};
use insight::EngineError;
use std::collections::{BTreeMap, BTreeSet};


/// Simulates `initial_value` split across `allocation` and held untouched
/// over `history`, with the default 2% risk-free rate.
pub fn simulate(
    allocation: &BTreeMap<Symbol, f64>,
    history: &HistoricalSeries,
    initial_value: f64,
) -> Result<PerformanceReport, EngineError> {
    simulate_with_risk_free_rate(allocation, history, initial_value, DEFAULT_RISK_FREE_RATE)
}

/// Same as [`simulate`] with an explicit annual risk-free rate for the
/// Sharpe ratio.
///
/// Allocation values are weights: each symbol receives
/// `weight / Σ weights * initial_value` on the first common date, converted
/// into a fixed share count at that day's close. Only dates on which every
/// allocated symbol has a positive close are used.
pub fn simulate_with_risk_free_rate(
    allocation: &BTreeMap<Symbol, f64>,
    history: &HistoricalSeries,
    initial_value: f64,
    risk_free_rate: f64,
) -> Result<PerformanceReport, EngineError> {
    if allocation.is_empty() || history.is_empty() {
        return Err(EngineError::InsufficientData);
    }

    let total_weight: f64 = allocation.values().sum();
    if !(total_weight > 0.0) {
        return Err(EngineError::InvalidAllocation);
    }

    let closes: BTreeMap<&Symbol, BTreeMap<NaiveDate, f64>> = allocation
        .iter()
        .filter(|(_, weight)| **weight != 0.0)
        .map(|(symbol, _)| (symbol, usable_closes(history, symbol)))
        .collect();

    let dates = common_dates(&closes);
    if dates.is_empty() {
        return Err(EngineError::NoCommonDates);
    }
    if dates.len() < 2 {
        return Err(EngineError::InsufficientData);
    }

    let first_date = dates[0];
    let shares: Vec<(&BTreeMap<NaiveDate, f64>, f64)> = closes
        .iter()
        .map(|(symbol, by_date)| {
            let weight = allocation[*symbol];
            let dollar_share = weight / total_weight * initial_value;
            (by_date, dollar_share / by_date[&first_date])
        })
        .collect();

    let portfolio_values: Vec<f64> = dates
        .iter()
        .map(|date| {
            shares
                .iter()
                .map(|(by_date, count)| count * by_date[date])
                .sum::<f64>()
        })
        .collect();

    let returns = daily_returns(&portfolio_values);

    let start_value = portfolio_values[0];
    let end_value = portfolio_values[portfolio_values.len() - 1];
    let trading_day_count = dates.len();
    let years = trading_day_count as f64 / TRADING_DAYS_PER_YEAR;

    let metrics = PerformanceMetrics {
        cagr: cagr(start_value, end_value, years),
        total_return: total_return(start_value, end_value),
        max_drawdown: max_drawdown(&portfolio_values),
        sharpe_ratio: sharpe_ratio(&returns, risk_free_rate),
        start_value,
        end_value,
        years,
        trading_day_count,
    };

    Ok(PerformanceReport {
        metrics,
        dates,
        portfolio_values,
        daily_returns: returns,
    })
}

/// Closes keyed by date, keeping only finite positive prices. A later bar
/// on the same date replaces an earlier one.
fn usable_closes(history: &HistoricalSeries, symbol: &Symbol) -> BTreeMap<NaiveDate, f64> {
    history
        .get(symbol)
        .map(|bars| {
            bars.iter()
                .filter(|bar| bar.close.is_finite() && bar.close > 0.0)
                .map(|bar| (bar.date, bar.close))
                .collect()
        })
        .unwrap_or_default()
}

/// Ascending dates present in every series.
fn common_dates(closes: &BTreeMap<&Symbol, BTreeMap<NaiveDate, f64>>) -> Vec<NaiveDate> {
    let mut series = closes.values();
    let Some(first) = series.next() else {
        return Vec::new();
    };

    let mut common: BTreeSet<NaiveDate> = first.keys().copied().collect();
    for by_date in series {
        common.retain(|date| by_date.contains_key(date));
    }
    common.into_iter().collect()
}
