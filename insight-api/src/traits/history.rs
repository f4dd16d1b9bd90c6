//! Defines the `HistoricalDataSource` trait for daily bar ingestion.
//!
//! Implementors may replay files, call a market data vendor, or synthesize
//! series for tests. The backtest service only depends on this contract.

use crate::model::{market_data::HistoricalSeries, symbol::Symbol};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// A collaborator that provides daily bars.
#[async_trait]
pub trait HistoricalDataSource: Send + Sync {
    /// Fetches daily bars for `symbols` between `start` and `end`, inclusive.
    ///
    /// Bars for each symbol must be in ascending date order. Symbols without
    /// data may be omitted or mapped to an empty list.
    async fn daily_bars(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries>;
}
