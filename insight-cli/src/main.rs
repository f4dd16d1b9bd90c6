use clap::Parser;
use insight::TargetAllocation;
use insight_core::config::{ConfigLoader, InsightConfig};
use insight_core::fs::SnapshotSource;
use insight_core::{AllocationService, BacktestService, Failure, ServiceError};
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

mod args;

use args::{Cli, Commands};

#[derive(Error, Debug)]
enum CliError {
    #[error("Configuration error: {0:#}")]
    Config(anyhow::Error),

    #[error("Snapshot error: {0:#}")]
    Snapshot(anyhow::Error),

    #[error("{0} is required for this command")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn to_failure(&self) -> Failure {
        match self {
            CliError::Service(err) => err.to_failure(),
            CliError::Config(_) => failure("configuration", self),
            CliError::Snapshot(_) => failure("snapshot", self),
            CliError::MissingArgument(_) => failure("missing_argument", self),
            CliError::Json(_) => failure("output", self),
        }
    }
}

fn failure(code: &str, err: &CliError) -> Failure {
    Failure {
        code: code.to_string(),
        message: err.to_string(),
    }
}

/// Collaborator and settings overview printed by `status`.
#[derive(Serialize)]
struct StatusReport {
    allocation: insight_core::service::AllocationStatus,
    backtest: insight_core::service::BacktestStatus,
    brokerage_base_url: String,
    market_data_credentials: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.common.get_config_path().as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logger("info");
            return report_failure(&CliError::Config(e));
        }
    };
    init_logger(&config.log_level);
    info!("=== Portfolio Insight ===");

    match run(&cli, &config).await {
        Ok(succeeded) => {
            if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => report_failure(&e),
    }
}

fn init_logger(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn report_failure(err: &CliError) -> ExitCode {
    error!("{err}");
    match serde_json::to_string_pretty(&err.to_failure()) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("Failed to encode failure: {e}"),
    }
    ExitCode::FAILURE
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs the selected command. `Ok(false)` means output was printed but the
/// command did not succeed.
async fn run(cli: &Cli, config: &InsightConfig) -> Result<bool, CliError> {
    match &cli.command {
        Commands::Allocate { targets, amount } => {
            let (allocation, _) = build_services(cli, config, true).await?;
            let target: TargetAllocation = targets.iter().cloned().collect();
            info!("Allocating {amount:.2} across {} targets", target.len());

            let report = allocation.calculate_allocation(&target, *amount).await?;
            print_json(&report)?;
            Ok(true)
        }
        Commands::Backtest {
            periods,
            initial_value,
        } => {
            let (_, backtest) = build_services(cli, config, true).await?;
            let periods = if periods.is_empty() {
                config.backtest.periods.clone()
            } else {
                periods.clone()
            };
            let initial_value = initial_value.unwrap_or(config.backtest.initial_value);
            info!("Backtesting {} periods from {initial_value:.2}", periods.len());

            let report = backtest.run_multiple_periods(&periods, initial_value).await;
            print_json(&report)?;
            Ok(report.success())
        }
        Commands::Status => {
            let (allocation, backtest) = build_services(cli, config, false).await?;
            print_json(&StatusReport {
                allocation: allocation.status(),
                backtest: backtest.status(),
                brokerage_base_url: config.brokerage.base_url().to_string(),
                market_data_credentials: config.market_data.has_credentials(),
            })?;
            Ok(true)
        }
    }
}

/// Wires services to the snapshot named on the command line.
async fn build_services(
    cli: &Cli,
    config: &InsightConfig,
    require_data: bool,
) -> Result<(Arc<AllocationService>, BacktestService), CliError> {
    let snapshot_path: Option<PathBuf> = cli.common.get_snapshot_path();
    let mut allocation = AllocationService::new();
    let mut backtest = BacktestService::new().with_risk_free_rate(config.backtest.risk_free_rate);

    match snapshot_path {
        Some(path) => {
            info!("Loading snapshot from {}", path.display());
            let source = Arc::new(SnapshotSource::load(&path).map_err(CliError::Snapshot)?);
            allocation = allocation
                .with_holdings(source.clone())
                .with_quotes(source.clone());
            backtest = backtest.with_history(source);
        }
        None if require_data => return Err(CliError::MissingArgument("--snapshot")),
        None => {}
    }

    match cli.common.get_account() {
        Some(account) => allocation.select_account_by_id(account).await?,
        None if require_data => return Err(CliError::MissingArgument("--account")),
        None => {}
    }

    let allocation = Arc::new(allocation);
    let backtest = backtest.with_allocation_service(allocation.clone());
    Ok((allocation, backtest))
}
