pub mod error;
pub mod model;
pub mod traits;

pub use error::EngineError;
pub use model::account::Account;
pub use model::allocation::{CurrentAllocation, PriceTable, TargetAllocation};
pub use model::market_data::{Bar, HistoricalSeries, Position, Quote};
pub use model::performance::{PerformanceMetrics, PerformanceReport};
pub use model::recommendation::SharesRecommendation;
pub use model::symbol::Symbol;
pub use traits::history::HistoricalDataSource;
pub use traits::holdings::HoldingsSource;
pub use traits::quotes::QuoteSource;

