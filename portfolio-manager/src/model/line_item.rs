use serde::{Deserialize, Serialize};

/// Cost of one recommended purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub shares: u64,
    /// `None` when no positive price was available.
    pub price_per_share: Option<f64>,
    /// `shares * price_per_share`, or 0 when unpriced.
    pub investment_value: f64,
}

impl LineItem {
    pub fn new(shares: u64, price_per_share: Option<f64>) -> Self {
        let investment_value = price_per_share.map_or(0.0, |price| shares as f64 * price);
        Self {
            shares,
            price_per_share,
            investment_value,
        }
    }
}
