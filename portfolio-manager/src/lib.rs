//! Allocation engine.
//!
//! Given a target mix, current holdings, current prices and an amount of new
//! cash, recommends how many whole shares of each security to buy so the
//! portfolio moves toward its target.

pub mod allocation;
pub mod model;
pub mod plan;

pub use allocation::{allocate, allocation_gaps, future_total_value};
pub use model::{LineItem, ProjectedHolding};
pub use plan::AllocationPlan;
