use insight::model::{
    allocation::{CurrentAllocation, PriceTable, TargetAllocation},
    recommendation::SharesRecommendation,
    symbol::Symbol,
};
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// Portfolio value once the new cash is added: Σ current values + investment.
pub fn future_total_value(current_allocation: &CurrentAllocation, investment_amount: f64) -> f64 {
    current_allocation.values().sum::<f64>() + investment_amount
}

/// Per target symbol, `target_fraction - current_value / future_total_value`.
///
/// Positive means under-allocated. Returns an empty map when the future total
/// is not positive.
pub fn allocation_gaps(
    target_allocation: &TargetAllocation,
    investment_amount: f64,
    current_allocation: &CurrentAllocation,
) -> BTreeMap<Symbol, f64> {
    let future_total = future_total_value(current_allocation, investment_amount);
    if !(future_total > 0.0) {
        return BTreeMap::new();
    }

    target_allocation
        .iter()
        .map(|(symbol, target_fraction)| {
            let current_value = current_allocation.get(symbol).copied().unwrap_or(0.0);
            let current_fraction = current_value / future_total;
            (symbol.clone(), target_fraction - current_fraction)
        })
        .collect()
}

/// Recommends whole shares to buy with `investment_amount`.
///
/// New cash is split across under-allocated symbols in proportion to each
/// symbol's share of the total gap, then floored to whole shares. Symbols at
/// or above target are left out of the result. An under-allocated symbol
/// without a positive price is kept with 0 shares.
///
/// Never fails: empty targets, non-positive investment, non-positive future
/// value, or no under-allocated symbol all give an empty recommendation.
pub fn allocate(
    target_allocation: &TargetAllocation,
    investment_amount: f64,
    current_allocation: &CurrentAllocation,
    current_prices: &PriceTable,
) -> SharesRecommendation {
    if target_allocation.is_empty() || !(investment_amount > 0.0) {
        return SharesRecommendation::new();
    }

    let under_allocated: Vec<(Symbol, f64)> =
        allocation_gaps(target_allocation, investment_amount, current_allocation)
            .into_iter()
            .filter(|(_, gap)| *gap > 0.0)
            .collect();

    if under_allocated.is_empty() {
        return SharesRecommendation::new();
    }

    let total_gap: f64 = under_allocated.iter().map(|(_, gap)| gap).sum();
    if !(total_gap > 0.0) {
        return SharesRecommendation::new();
    }

    under_allocated
        .into_iter()
        .map(|(symbol, gap)| {
            let dollar_amount = (gap / total_gap) * investment_amount;
            let shares = match current_prices.get(&symbol) {
                Some(price) if *price > 0.0 => (dollar_amount / price).floor() as u64,
                _ => 0,
            };
            (symbol, shares)
        })
        .collect()
}
