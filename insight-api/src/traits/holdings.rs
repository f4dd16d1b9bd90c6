//! Defines the `HoldingsSource` trait for brokerage account data.

use crate::model::{account::Account, market_data::Position};
use anyhow::Result;
use async_trait::async_trait;

/// A collaborator that knows the investor's accounts and what they hold.
#[async_trait]
pub trait HoldingsSource: Send + Sync {
    /// Lists the accounts available to the authenticated user.
    async fn accounts(&self) -> Result<Vec<Account>>;

    /// Returns the positions held in `account`.
    async fn positions(&self, account: &Account) -> Result<Vec<Position>>;
}
