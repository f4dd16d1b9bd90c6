use backtest_engine::{simulate, BacktestPeriod};
use chrono::{Datelike, NaiveDate, Weekday};
use insight::{Bar, HistoricalSeries, Symbol};
use std::collections::BTreeMap;

/// Weekday bars between `start` and `end` growing by `daily_growth` each day.
fn trending_bars(start: NaiveDate, end: NaiveDate, first_close: f64, daily_growth: f64) -> Vec<Bar> {
    let mut bars = Vec::new();
    let mut close = first_close;
    for date in start.iter_days().take_while(|d| *d <= end) {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        bars.push(Bar::from_close(date, close));
        close *= 1.0 + daily_growth;
    }
    bars
}

#[test]
fn one_year_window_of_steady_growth() {
    let end = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
    let (start, end) = BacktestPeriod::OneYear.date_range_ending(end);

    let mut history = HistoricalSeries::new();
    history.insert(Symbol::from("VTI"), trending_bars(start, end, 200.0, 0.0005));
    history.insert(Symbol::from("BND"), trending_bars(start, end, 70.0, 0.0001));

    let allocation: BTreeMap<Symbol, f64> = [
        (Symbol::from("VTI"), 6_000.0),
        (Symbol::from("BND"), 4_000.0),
    ]
    .into_iter()
    .collect();

    let report = simulate(&allocation, &history, 100_000.0).unwrap();
    let metrics = &report.metrics;

    assert_eq!(report.dates.first(), Some(&start));
    assert_eq!(metrics.trading_day_count, report.portfolio_values.len());
    assert!(metrics.trading_day_count > 250);
    assert!((metrics.start_value - 100_000.0).abs() < 1e-6);
    assert!(metrics.total_return > 0.0);
    assert!(metrics.cagr > 0.0);
    // Strictly rising series never draw down.
    assert_eq!(metrics.max_drawdown, 0.0);
    assert!(metrics.sharpe_ratio > 0.0);
}

#[test]
fn report_serializes_with_iso_dates() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

    let mut history = HistoricalSeries::new();
    history.insert(Symbol::from("VTI"), trending_bars(start, end, 100.0, 0.01));
    let allocation: BTreeMap<Symbol, f64> = [(Symbol::from("VTI"), 1.0)].into_iter().collect();

    let report = simulate(&allocation, &history, 1_000.0).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["dates"][0], "2024-01-01");
    assert_eq!(json["metrics"]["trading_day_count"], 5);
}
