use super::*;

fn map(entries: &[(&str, f64)]) -> BTreeMap<Symbol, f64> {
    entries
        .iter()
        .map(|(symbol, value)| (Symbol::from(*symbol), *value))
        .collect()
}

fn prices() -> PriceTable {
    map(&[("AAPL", 150.0), ("GOOGL", 200.0)])
}

#[test]
fn test_empty_portfolio_follows_target_weights() {
    let target = map(&[("AAPL", 0.6), ("GOOGL", 0.4)]);

    let rec = allocate(&target, 1000.0, &CurrentAllocation::new(), &prices());

    // AAPL: 600 / 150 = 4, GOOGL: 400 / 200 = 2
    assert_eq!(rec.shares("AAPL"), Some(4));
    assert_eq!(rec.shares("GOOGL"), Some(2));
    assert_eq!(rec.len(), 2);
}

#[test]
fn test_balanced_portfolio_gets_target_split_of_new_money() {
    let target = map(&[("AAPL", 0.6), ("GOOGL", 0.4)]);
    let current = map(&[("AAPL", 600.0), ("GOOGL", 400.0)]);

    let rec = allocate(&target, 1000.0, &current, &prices());

    // Future total 2000. Gaps 0.3 and 0.2, so the 1000 splits 600 / 400.
    assert_eq!(rec.shares("AAPL"), Some(4));
    assert_eq!(rec.shares("GOOGL"), Some(2));
}

#[test]
fn test_over_allocated_security_is_absent() {
    let target = map(&[("AAPL", 0.7), ("GOOGL", 0.3)]);
    let current = map(&[("AAPL", 100.0), ("GOOGL", 900.0)]);

    let rec = allocate(&target, 1000.0, &current, &prices());

    assert!(!rec.contains("GOOGL"));
    // AAPL is the only gap, so it receives the whole 1000: floor(1000 / 150)
    assert_eq!(rec.shares("AAPL"), Some(6));
}

#[test]
fn test_proportional_split_across_three_securities() {
    let target = map(&[("AAPL", 0.5), ("GOOGL", 0.3), ("MSFT", 0.2)]);
    let prices = map(&[("AAPL", 100.0), ("GOOGL", 200.0), ("MSFT", 50.0)]);

    let rec = allocate(&target, 1000.0, &CurrentAllocation::new(), &prices);

    assert_eq!(rec.shares("AAPL"), Some(5));
    assert_eq!(rec.shares("GOOGL"), Some(1));
    assert_eq!(rec.shares("MSFT"), Some(4));
}

#[test]
fn test_gap_weighting_favours_most_lagging() {
    let target = map(&[("AAPL", 0.5), ("GOOGL", 0.5)]);
    // Future total 2000: AAPL gap 0.5 - 0.45 = 0.05, GOOGL gap 0.5 - 0.05 = 0.45
    let current = map(&[("AAPL", 900.0), ("GOOGL", 100.0)]);
    let prices = map(&[("AAPL", 7.0), ("GOOGL", 7.0)]);

    let rec = allocate(&target, 1000.0, &current, &prices);

    // 10% of new cash to AAPL (100 / 7), 90% to GOOGL (900 / 7)
    assert_eq!(rec.shares("AAPL"), Some(14));
    assert_eq!(rec.shares("GOOGL"), Some(128));
}

#[test]
fn test_missing_price_yields_zero_without_affecting_others() {
    let target = map(&[("AAPL", 0.6), ("GOOGL", 0.4)]);
    let prices = map(&[("AAPL", 150.0)]);

    let rec = allocate(&target, 1000.0, &CurrentAllocation::new(), &prices);

    assert_eq!(rec.shares("AAPL"), Some(4));
    assert_eq!(rec.shares("GOOGL"), Some(0));
}

#[test]
fn test_non_positive_price_is_unpriced() {
    let target = map(&[("AAPL", 1.0)]);
    let prices = map(&[("AAPL", 0.0)]);

    let rec = allocate(&target, 1000.0, &CurrentAllocation::new(), &prices);

    assert_eq!(rec.shares("AAPL"), Some(0));
}

#[test]
fn test_degenerate_inputs_give_empty_recommendation() {
    let target = map(&[("AAPL", 0.6), ("GOOGL", 0.4)]);
    let current = map(&[("AAPL", 500.0), ("GOOGL", 500.0)]);

    assert!(allocate(&target, 0.0, &current, &prices()).is_empty());
    assert!(allocate(&target, -100.0, &current, &prices()).is_empty());
    assert!(allocate(&target, f64::NAN, &current, &prices()).is_empty());
    assert!(allocate(&TargetAllocation::new(), 1000.0, &current, &prices()).is_empty());

    // Negative holdings drag the future total below zero.
    let underwater = map(&[("AAPL", -5000.0)]);
    assert!(allocate(&target, 1000.0, &underwater, &prices()).is_empty());
}

#[test]
fn test_no_under_allocated_security_gives_empty() {
    let target = map(&[("AAPL", 0.1), ("GOOGL", 0.1)]);
    let current = map(&[("AAPL", 5000.0), ("GOOGL", 5000.0)]);

    assert!(allocate(&target, 100.0, &current, &prices()).is_empty());
}

#[test]
fn test_results_are_non_negative_and_within_target() {
    let target = map(&[("AAPL", 0.4), ("GOOGL", 0.3), ("MSFT", 0.2), ("TSLA", 0.1)]);
    let current = map(&[("AAPL", 5000.0), ("GOOGL", 3000.0), ("MSFT", 2000.0), ("VTI", 7.0)]);
    let prices = map(&[("AAPL", 150.0), ("GOOGL", 200.0), ("MSFT", 100.0), ("TSLA", 250.0)]);

    let rec = allocate(&target, 3000.0, &current, &prices);

    assert!(!rec.is_empty());
    for (symbol, _) in rec.iter() {
        assert!(target.contains_key(symbol), "{} not in target", symbol);
    }
    // Flooring never overspends.
    assert!(rec.invested_value(&prices) <= 3000.0);
}

#[test]
fn test_allocate_is_deterministic() {
    let target = map(&[("AAPL", 0.4), ("GOOGL", 0.3), ("MSFT", 0.3)]);
    let current = map(&[("AAPL", 1234.0), ("MSFT", 10.0)]);
    let prices = map(&[("AAPL", 150.0), ("GOOGL", 200.0), ("MSFT", 100.0)]);

    let first = allocate(&target, 5000.0, &current, &prices);
    let second = allocate(&target, 5000.0, &current, &prices);

    assert_eq!(first, second);
}

#[test]
fn test_gaps_against_future_total() {
    let target = map(&[("AAPL", 0.6), ("GOOGL", 0.4)]);
    let current = map(&[("AAPL", 600.0), ("GOOGL", 400.0)]);

    let gaps = allocation_gaps(&target, 1000.0, &current);

    assert!((gaps["AAPL"] - 0.3).abs() < 1e-12);
    assert!((gaps["GOOGL"] - 0.2).abs() < 1e-12);
    assert!((future_total_value(&current, 1000.0) - 2000.0).abs() < 1e-12);
}
