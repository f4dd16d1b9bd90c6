use serde::{Deserialize, Serialize};

/// Where a target security would stand after the recommended purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedHolding {
    pub projected_value: f64,
    /// `projected_value` over the future total portfolio value.
    pub projected_fraction: f64,
    pub target_fraction: f64,
}

impl ProjectedHolding {
    /// Signed distance still left to target after buying.
    pub fn remaining_gap(&self) -> f64 {
        self.target_fraction - self.projected_fraction
    }
}
