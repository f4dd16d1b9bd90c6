//! Layered configuration for the insight services.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `INSIGHT__<SECTION>__<KEY>` environment variables.

use anyhow::{Context, Result};
use backtest_engine::{BacktestPeriod, DEFAULT_RISK_FREE_RATE};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "INSIGHT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub brokerage: BrokerageConfig,
    pub market_data: MarketDataConfig,
    pub backtest: BacktestConfig,
    pub log_level: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            brokerage: BrokerageConfig::default(),
            market_data: MarketDataConfig::default(),
            backtest: BacktestConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokerageEnvironment {
    #[default]
    Sandbox,
    Live,
}

/// Brokerage endpoint and OAuth consumer credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerageConfig {
    pub environment: BrokerageEnvironment,
    pub sandbox_base_url: String,
    pub live_base_url: String,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
}

impl Default for BrokerageConfig {
    fn default() -> Self {
        Self {
            environment: BrokerageEnvironment::Sandbox,
            sandbox_base_url: "https://apisb.etrade.com".to_string(),
            live_base_url: "https://api.etrade.com".to_string(),
            consumer_key: None,
            consumer_secret: None,
        }
    }
}

impl BrokerageConfig {
    /// Base URL for the selected environment.
    pub fn base_url(&self) -> &str {
        match self.environment {
            BrokerageEnvironment::Sandbox => &self.sandbox_base_url,
            BrokerageEnvironment::Live => &self.live_base_url,
        }
    }
}

/// Credentials for the historical market data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    pub paper: bool,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            secret_key: None,
            paper: true,
        }
    }
}

impl MarketDataConfig {
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.secret_key.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub initial_value: f64,
    /// Annual rate used for the Sharpe ratio.
    pub risk_free_rate: f64,
    pub periods: Vec<BacktestPeriod>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_value: 100_000.0,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            periods: BacktestPeriod::ALL.to_vec(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration, layering `path` (if given and present) and the
    /// environment over the defaults.
    pub fn load(path: Option<&Path>) -> Result<InsightConfig> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
