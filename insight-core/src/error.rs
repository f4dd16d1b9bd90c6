use insight::{EngineError, Symbol};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the insight services.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// A required data collaborator was never attached.
    #[error("{0} collaborator is not configured")]
    MissingCollaborator(&'static str),

    #[error("Account not selected. Please select an account first.")]
    AccountNotSelected,

    /// The account is missing a required field.
    #[error("Invalid account: missing required field {0}")]
    InvalidAccount(String),

    /// Target symbols with no current quote.
    #[error("Missing current prices for symbols: {}", join_symbols(.0))]
    MissingPrices(Vec<Symbol>),

    #[error("No symbols provided for historical data fetch")]
    NoSymbols,

    #[error("No current portfolio allocation found")]
    EmptyAllocation,

    /// A collaborator call failed. Never retried.
    #[error("{source_name} request failed: {message}")]
    Upstream {
        source_name: &'static str,
        message: String,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ServiceError {
    pub(crate) fn upstream(source_name: &'static str, err: anyhow::Error) -> Self {
        ServiceError::Upstream {
            source_name,
            message: format!("{err:#}"),
        }
    }

    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::MissingCollaborator(_) => "missing_collaborator",
            ServiceError::AccountNotSelected => "account_not_selected",
            ServiceError::InvalidAccount(_) => "invalid_account",
            ServiceError::MissingPrices(_) => "missing_prices",
            ServiceError::NoSymbols => "no_symbols",
            ServiceError::EmptyAllocation => "empty_allocation",
            ServiceError::Upstream { .. } => "upstream",
            ServiceError::Engine(err) => err.code(),
        }
    }

    pub fn to_failure(&self) -> Failure {
        Failure {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

fn join_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Structured failure handed to callers instead of an error value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub code: String,
    pub message: String,
}

impl From<ServiceError> for Failure {
    fn from(err: ServiceError) -> Self {
        err.to_failure()
    }
}
