//! A JSON snapshot standing in for brokerage, quote and history endpoints.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use insight::model::{
    account::Account,
    market_data::{HistoricalSeries, Position, Quote},
    symbol::Symbol,
};
use insight::{HistoricalDataSource, HoldingsSource, QuoteSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk layout of a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    /// Positions keyed by `account_id_key`.
    pub positions: BTreeMap<String, Vec<Position>>,
    pub quotes: Vec<Quote>,
    pub history: HistoricalSeries,
}

pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        let snapshot = serde_json::from_reader(reader).context("Failed to deserialize snapshot")?;
        Ok(Self { snapshot })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl HoldingsSource for SnapshotSource {
    async fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.snapshot.accounts.clone())
    }

    async fn positions(&self, account: &Account) -> Result<Vec<Position>> {
        let known = self
            .snapshot
            .accounts
            .iter()
            .any(|a| a.account_id_key == account.account_id_key);
        if !known {
            bail!("Unknown account {}", account.account_id_key);
        }
        Ok(self
            .snapshot
            .positions
            .get(&account.account_id_key)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl QuoteSource for SnapshotSource {
    async fn quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>> {
        Ok(self
            .snapshot
            .quotes
            .iter()
            .filter(|q| symbols.contains(&q.symbol))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HistoricalDataSource for SnapshotSource {
    async fn daily_bars(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries> {
        Ok(symbols
            .iter()
            .filter_map(|symbol| {
                let bars = self.snapshot.history.get(symbol)?;
                let in_range: Vec<_> = bars
                    .iter()
                    .filter(|bar| bar.date >= start && bar.date <= end)
                    .cloned()
                    .collect();
                Some((symbol.clone(), in_range))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight::model::market_data::Bar;

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot {
            accounts: vec![Account::new("acct-1", "BROKERAGE")],
            ..Snapshot::default()
        };
        snapshot
            .positions
            .insert("acct-1".to_string(), vec![Position::new("AAPL", 600.0)]);
        snapshot.quotes = vec![Quote::new("AAPL", 150.0), Quote::new("GOOGL", 200.0)];
        snapshot.history.insert(
            Symbol::from("AAPL"),
            (1..=5)
                .map(|d| Bar::from_close(NaiveDate::from_ymd_opt(2024, 3, d).unwrap(), 100.0 + d as f64))
                .collect(),
        );
        snapshot
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, &sample()).unwrap();

        let loaded = SnapshotSource::load(file.path()).unwrap();

        assert_eq!(loaded.snapshot(), &sample());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{ "accounts": [ }"#).unwrap();

        let err = SnapshotSource::load(file.path()).err().unwrap();
        assert!(format!("{err:#}").contains("Failed to deserialize snapshot"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = SnapshotSource::load(&path).err().unwrap();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[tokio::test]
    async fn test_unknown_account_is_an_error() {
        let source = SnapshotSource::new(sample());
        assert!(source.positions(&Account::new("other", "BROKERAGE")).await.is_err());
        assert_eq!(
            source
                .positions(&Account::new("acct-1", "BROKERAGE"))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_quotes_filtered_to_request() {
        let source = SnapshotSource::new(sample());
        let quotes = source.quotes(&[Symbol::from("GOOGL")]).await.unwrap();
        assert_eq!(quotes, vec![Quote::new("GOOGL", 200.0)]);
    }

    #[tokio::test]
    async fn test_bars_filtered_to_range() {
        let source = SnapshotSource::new(sample());
        let start = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        let series = source
            .daily_bars(&[Symbol::from("AAPL"), Symbol::from("MSFT")], start, end)
            .await
            .unwrap();

        assert_eq!(series["AAPL"].len(), 3);
        assert!(!series.contains_key("MSFT"));
    }
}
