//! Market data models supplied by external collaborators.
//!
//! Includes `Position` for holdings, `Quote` for current prices, and `Bar` for
//! daily historical prices.

use crate::model::symbol::Symbol;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single holding reported by the brokerage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: Symbol,
    #[serde(default)]
    pub quantity: f64,
    /// Current dollar value of the holding.
    pub market_value: f64,
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub price_paid: Option<f64>,
    #[serde(default)]
    pub total_gain: Option<f64>,
}

impl Position {
    pub fn new(symbol: impl Into<Symbol>, market_value: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity: 0.0,
            market_value,
            last_price: None,
            price_paid: None,
            total_gain: None,
        }
    }

    pub fn with_total_gain(mut self, total_gain: f64) -> Self {
        self.total_gain = Some(total_gain);
        self
    }
}

/// Current quote for a security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    /// The last traded price.
    pub last_price: f64,
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
}

impl Quote {
    pub fn new(symbol: impl Into<Symbol>, last_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            last_price,
            bid: None,
            ask: None,
            previous_close: None,
        }
    }
}

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

impl Bar {
    /// Builds a bar where every price field equals `close`.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }
}

/// Chronologically ordered daily bars per security. Dates across securities
/// need not align.
pub type HistoricalSeries = BTreeMap<Symbol, Vec<Bar>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_optional_fields_default() {
        let json = r#"{"symbol":"AAPL","market_value":1000.0}"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position, Position::new("AAPL", 1000.0));
    }

    #[test]
    fn test_bar_date_format() {
        let json = r#"{"date":"2024-01-02","open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":10}"#;
        let bar: Bar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bar.close, 1.5);
    }
}
