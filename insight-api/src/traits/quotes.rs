use crate::model::{market_data::Quote, symbol::Symbol};
use anyhow::Result;
use async_trait::async_trait;

/// A collaborator that returns current quotes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches quotes for `symbols`.
    ///
    /// Symbols the source does not know are simply missing from the result.
    async fn quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>>;
}
