//! # Insight Core
//!
//! Wires the allocation and backtest engines to their data collaborators.
//!
//! ## Modules
//! - `config`: Layered service configuration (TOML file plus environment).
//! - `args`: Command-line arguments shared by every front end.
//! - `error`: `ServiceError` and the serializable `Failure` it reduces to.
//! - `service`: `AllocationService` and `BacktestService`.
//! - `fs`: JSON snapshot collaborator for offline runs.

pub mod args;
pub mod config;
pub mod error;
pub mod fs;
pub mod service;

pub use error::{Failure, ServiceError};
pub use service::{AllocationService, BacktestService};
