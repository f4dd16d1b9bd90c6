use crate::error::ServiceError;
use insight::model::{
    account::Account,
    allocation::{CurrentAllocation, PriceTable, TargetAllocation},
    market_data::Position,
    symbol::Symbol,
};
use insight::{HoldingsSource, QuoteSource};
use log::{debug, info, warn};
use portfolio_manager::AllocationPlan;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Allocation result together with the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub target_allocation: TargetAllocation,
    pub current_allocation: CurrentAllocation,
    pub current_prices: PriceTable,
    pub investment_amount: f64,
    #[serde(flatten)]
    pub plan: AllocationPlan,
}

/// Aggregate figures over an account's positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_positions: usize,
    pub total_market_value: f64,
    pub total_gain_loss: f64,
    pub positions_with_gains: usize,
    pub positions_with_losses: usize,
    pub positions: Vec<Position>,
}

impl PortfolioSummary {
    pub fn from_positions(positions: Vec<Position>) -> Self {
        let gain = |p: &Position| p.total_gain.unwrap_or(0.0);
        Self {
            total_positions: positions.len(),
            total_market_value: positions.iter().map(|p| p.market_value).sum(),
            total_gain_loss: positions.iter().map(gain).sum(),
            positions_with_gains: positions.iter().filter(|p| gain(*p) > 0.0).count(),
            positions_with_losses: positions.iter().filter(|p| gain(*p) < 0.0).count(),
            positions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub account: PortfolioSummary,
    pub allocation: AllocationReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationStatus {
    pub holdings_configured: bool,
    pub quotes_configured: bool,
    pub account_selected: bool,
    pub current_account: Option<Account>,
}

/// Feeds positions and quotes into the allocation engine.
///
/// Collaborators are attached with the `with_*` builders; calls that need a
/// missing one fail with [`ServiceError::MissingCollaborator`].
#[derive(Default)]
pub struct AllocationService {
    holdings: Option<Arc<dyn HoldingsSource>>,
    quotes: Option<Arc<dyn QuoteSource>>,
    current_account: Option<Account>,
}

impl AllocationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holdings(mut self, holdings: Arc<dyn HoldingsSource>) -> Self {
        self.holdings = Some(holdings);
        self
    }

    pub fn with_quotes(mut self, quotes: Arc<dyn QuoteSource>) -> Self {
        self.quotes = Some(quotes);
        self
    }

    fn holdings(&self) -> Result<&dyn HoldingsSource, ServiceError> {
        self.holdings
            .as_deref()
            .ok_or(ServiceError::MissingCollaborator("holdings"))
    }

    fn quotes(&self) -> Result<&dyn QuoteSource, ServiceError> {
        self.quotes
            .as_deref()
            .ok_or(ServiceError::MissingCollaborator("quotes"))
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        let accounts = self
            .holdings()?
            .accounts()
            .await
            .map_err(|e| ServiceError::upstream("holdings", e))?;
        debug!("Holdings source returned {} accounts", accounts.len());
        Ok(accounts)
    }

    /// Selects the account later calls operate on.
    pub fn select_account(&mut self, account: Account) -> Result<(), ServiceError> {
        if account.account_id_key.trim().is_empty() {
            return Err(ServiceError::InvalidAccount("account_id_key".to_string()));
        }
        if account.institution_type.trim().is_empty() {
            return Err(ServiceError::InvalidAccount("institution_type".to_string()));
        }
        info!("Selected account {}", account.account_id_key);
        self.current_account = Some(account);
        Ok(())
    }

    /// Looks the account up by id among the listed accounts and selects it.
    pub async fn select_account_by_id(&mut self, account_id_key: &str) -> Result<(), ServiceError> {
        let account = self
            .list_accounts()
            .await?
            .into_iter()
            .find(|a| a.account_id_key == account_id_key)
            .ok_or_else(|| ServiceError::InvalidAccount(format!("unknown account {account_id_key}")))?;
        self.select_account(account)
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.current_account.as_ref()
    }

    pub async fn positions(&self) -> Result<Vec<Position>, ServiceError> {
        let holdings = self.holdings()?;
        let account = self
            .current_account
            .as_ref()
            .ok_or(ServiceError::AccountNotSelected)?;
        holdings
            .positions(account)
            .await
            .map_err(|e| ServiceError::upstream("holdings", e))
    }

    /// Market value per symbol in the selected account.
    pub async fn current_allocation(&self) -> Result<CurrentAllocation, ServiceError> {
        Ok(fold_positions(&self.positions().await?))
    }

    /// Last price per symbol. Symbols without a quote are left out.
    pub async fn current_prices(&self, symbols: &[Symbol]) -> Result<PriceTable, ServiceError> {
        let quotes = self.quotes()?;
        if symbols.is_empty() {
            return Ok(PriceTable::new());
        }
        let quotes = quotes
            .quotes(symbols)
            .await
            .map_err(|e| ServiceError::upstream("quotes", e))?;
        Ok(quotes
            .into_iter()
            .filter(|q| symbols.contains(&q.symbol))
            .map(|q| (q.symbol, q.last_price))
            .collect())
    }

    /// Recommends whole-share purchases of `investment_amount` toward
    /// `target_allocation`.
    ///
    /// Positions and quotes are fetched concurrently. Every target symbol
    /// must have a price; otherwise nothing is computed.
    pub async fn calculate_allocation(
        &self,
        target_allocation: &TargetAllocation,
        investment_amount: f64,
    ) -> Result<AllocationReport, ServiceError> {
        let (positions, current_prices) = self.positions_and_prices(target_allocation).await?;
        build_report(target_allocation, investment_amount, &positions, current_prices)
    }

    pub async fn account_summary(&self) -> Result<PortfolioSummary, ServiceError> {
        Ok(PortfolioSummary::from_positions(self.positions().await?))
    }

    /// Account figures and an allocation, both from a single positions fetch.
    pub async fn allocation_summary(
        &self,
        target_allocation: &TargetAllocation,
        investment_amount: f64,
    ) -> Result<AllocationSummary, ServiceError> {
        let (positions, current_prices) = self.positions_and_prices(target_allocation).await?;
        let allocation =
            build_report(target_allocation, investment_amount, &positions, current_prices)?;
        Ok(AllocationSummary {
            account: PortfolioSummary::from_positions(positions),
            allocation,
        })
    }

    async fn positions_and_prices(
        &self,
        target_allocation: &TargetAllocation,
    ) -> Result<(Vec<Position>, PriceTable), ServiceError> {
        self.holdings()?;
        self.quotes()?;

        let symbols: Vec<Symbol> = target_allocation.keys().cloned().collect();
        tokio::try_join!(self.positions(), self.current_prices(&symbols))
    }

    pub fn status(&self) -> AllocationStatus {
        AllocationStatus {
            holdings_configured: self.holdings.is_some(),
            quotes_configured: self.quotes.is_some(),
            account_selected: self.current_account.is_some(),
            current_account: self.current_account.clone(),
        }
    }
}

fn fold_positions(positions: &[Position]) -> CurrentAllocation {
    let mut allocation = CurrentAllocation::new();
    for position in positions {
        *allocation.entry(position.symbol.clone()).or_insert(0.0) += position.market_value;
    }
    allocation
}

fn build_report(
    target_allocation: &TargetAllocation,
    investment_amount: f64,
    positions: &[Position],
    current_prices: PriceTable,
) -> Result<AllocationReport, ServiceError> {
    let current_allocation = fold_positions(positions);

    let missing: Vec<Symbol> = target_allocation
        .keys()
        .filter(|s| !current_prices.contains_key(*s))
        .cloned()
        .collect();
    if !missing.is_empty() {
        warn!("Quotes missing for {} target symbols", missing.len());
        return Err(ServiceError::MissingPrices(missing));
    }

    let plan = AllocationPlan::build(
        target_allocation,
        investment_amount,
        &current_allocation,
        &current_prices,
    );
    info!(
        "Allocated {:.2} of {:.2} across {} symbols",
        plan.total_investment_value,
        investment_amount,
        plan.recommendation.len()
    );

    Ok(AllocationReport {
        target_allocation: target_allocation.clone(),
        current_allocation,
        current_prices,
        investment_amount,
        plan,
    })
}
