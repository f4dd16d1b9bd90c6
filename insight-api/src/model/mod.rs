pub mod account;
pub mod allocation;
pub mod market_data;
pub mod performance;
pub mod recommendation;
pub mod symbol;

pub use account::Account;
pub use allocation::{CurrentAllocation, PriceTable, TargetAllocation};
pub use market_data::{Bar, HistoricalSeries, Position, Quote};
pub use performance::{PerformanceMetrics, PerformanceReport};
pub use recommendation::SharesRecommendation;
pub use symbol::Symbol;
