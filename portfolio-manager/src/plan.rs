use crate::allocation::{allocate, future_total_value};
use crate::model::{LineItem, ProjectedHolding};
use insight::model::{
    allocation::{CurrentAllocation, PriceTable, TargetAllocation},
    recommendation::SharesRecommendation,
    symbol::Symbol,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recommendation together with its cost and the resulting portfolio mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub recommendation: SharesRecommendation,
    pub breakdown: BTreeMap<Symbol, LineItem>,
    pub total_investment_value: f64,
    /// Cash left after flooring. Never reinvested.
    pub unused_cash: f64,
    pub projected: BTreeMap<Symbol, ProjectedHolding>,
}

impl AllocationPlan {
    pub fn build(
        target_allocation: &TargetAllocation,
        investment_amount: f64,
        current_allocation: &CurrentAllocation,
        current_prices: &PriceTable,
    ) -> Self {
        let recommendation = allocate(
            target_allocation,
            investment_amount,
            current_allocation,
            current_prices,
        );

        let breakdown: BTreeMap<Symbol, LineItem> = recommendation
            .iter()
            .map(|(symbol, shares)| {
                let price = current_prices.get(symbol).copied().filter(|p| *p > 0.0);
                (symbol.clone(), LineItem::new(shares, price))
            })
            .collect();

        let total_investment_value: f64 = breakdown.values().map(|item| item.investment_value).sum();
        // An empty recommendation spends nothing, whatever the amount.
        let unused_cash = if recommendation.is_empty() {
            investment_amount.max(0.0)
        } else {
            investment_amount - total_investment_value
        };

        let future_total = future_total_value(current_allocation, investment_amount);
        let projected = target_allocation
            .iter()
            .map(|(symbol, target_fraction)| {
                let bought = breakdown.get(symbol).map_or(0.0, |item| item.investment_value);
                let projected_value = current_allocation.get(symbol).copied().unwrap_or(0.0) + bought;
                let projected_fraction = if future_total > 0.0 {
                    projected_value / future_total
                } else {
                    0.0
                };
                (
                    symbol.clone(),
                    ProjectedHolding {
                        projected_value,
                        projected_fraction,
                        target_fraction: *target_fraction,
                    },
                )
            })
            .collect();

        Self {
            recommendation,
            breakdown,
            total_investment_value,
            unused_cash,
            projected,
        }
    }

    /// Symbols with at least one share to buy.
    pub fn purchases(&self) -> impl Iterator<Item = (&Symbol, &LineItem)> {
        self.breakdown.iter().filter(|(_, item)| item.shares > 0)
    }
}
