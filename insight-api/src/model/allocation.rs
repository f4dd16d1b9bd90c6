//! Portfolio mappings keyed by symbol.
//!
//! Ordered maps are used throughout so that every derived output iterates in
//! the same order for the same input.

use crate::model::symbol::Symbol;
use std::collections::BTreeMap;

/// Desired fraction (0..1) of total portfolio value per security.
///
/// Fractions are read independently and are not required to sum to 1.
pub type TargetAllocation = BTreeMap<Symbol, f64>;

/// Current dollar market value per security. A missing symbol holds 0.
pub type CurrentAllocation = BTreeMap<Symbol, f64>;

/// Last traded price per security. Only prices > 0 are usable.
pub type PriceTable = BTreeMap<Symbol, f64>;
