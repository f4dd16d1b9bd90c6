use crate::model::{allocation::PriceTable, symbol::Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole-share purchase counts per security.
///
/// A symbol that is absent was not under-allocated. A symbol present with 0
/// shares was under-allocated but is unpriced or unaffordable. Both mean
/// "don't buy", but callers can tell them apart through [`Self::shares`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharesRecommendation {
    shares: BTreeMap<Symbol, u64>,
}

impl SharesRecommendation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol, shares: u64) {
        self.shares.insert(symbol, shares);
    }

    /// `None` when the symbol was not recommended at all.
    pub fn shares(&self, symbol: &str) -> Option<u64> {
        self.shares.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.shares.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, u64)> {
        self.shares.iter().map(|(symbol, shares)| (symbol, *shares))
    }

    /// Dollars spent if every recommended share is bought at `prices`.
    /// Unpriced symbols contribute nothing.
    pub fn invested_value(&self, prices: &PriceTable) -> f64 {
        self.iter()
            .filter_map(|(symbol, shares)| {
                prices
                    .get(symbol)
                    .filter(|price| **price > 0.0)
                    .map(|price| shares as f64 * price)
            })
            .sum()
    }

    /// Part of `investment_amount` left over after flooring to whole shares.
    pub fn unused_cash(&self, investment_amount: f64, prices: &PriceTable) -> f64 {
        investment_amount - self.invested_value(prices)
    }
}

impl FromIterator<(Symbol, u64)> for SharesRecommendation {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        Self {
            shares: iter.into_iter().collect(),
        }
    }
}
