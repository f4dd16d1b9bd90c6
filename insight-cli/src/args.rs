use backtest_engine::BacktestPeriod;
use clap::{Parser, Subcommand};
use insight::Symbol;
use insight_core::args::CommonArgs;

/// Portfolio allocation and backtesting over a brokerage snapshot.
#[derive(Parser, Debug)]
#[command(name = "portfolio-insight")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend whole-share purchases toward a target mix.
    Allocate {
        /// Target weight as SYMBOL=FRACTION (repeatable)
        #[arg(long = "target", value_parser = parse_target, required = true)]
        targets: Vec<(Symbol, f64)>,

        /// Cash to invest
        #[arg(long)]
        amount: f64,
    },
    /// Backtest the current holdings over one or more periods.
    Backtest {
        /// Period label: 1Y, 5Y or 10Y (repeatable; defaults to the configured periods)
        #[arg(long = "period")]
        periods: Vec<BacktestPeriod>,

        /// Starting portfolio value (defaults to the configured value)
        #[arg(long)]
        initial_value: Option<f64>,
    },
    /// Show which collaborators and settings are in place.
    Status,
}

/// Parses `SYMBOL=FRACTION`.
pub fn parse_target(raw: &str) -> Result<(Symbol, f64), String> {
    let (symbol, fraction) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SYMBOL=FRACTION, got '{raw}'"))?;
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(format!("missing symbol in '{raw}'"));
    }
    let fraction: f64 = fraction
        .trim()
        .parse()
        .map_err(|_| format!("invalid fraction in '{raw}'"))?;
    Ok((Symbol::from(symbol.to_uppercase()), fraction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("aapl=0.6"), Ok((Symbol::from("AAPL"), 0.6)));
        assert_eq!(parse_target(" MSFT = 0.25 "), Ok((Symbol::from("MSFT"), 0.25)));
        assert!(parse_target("AAPL").is_err());
        assert!(parse_target("=0.5").is_err());
        assert!(parse_target("AAPL=lots").is_err());
    }

    #[test]
    fn test_parse_allocate() {
        let cli = Cli::try_parse_from([
            "portfolio-insight",
            "allocate",
            "--snapshot",
            "snap.json",
            "--account",
            "acct-1",
            "--target",
            "AAPL=0.6",
            "--target",
            "GOOGL=0.4",
            "--amount",
            "1000",
        ])
        .unwrap();

        assert_eq!(cli.common.get_account(), Some("acct-1"));
        match cli.command {
            Commands::Allocate { targets, amount } => {
                assert_eq!(targets.len(), 2);
                assert_eq!(targets[1].0, Symbol::from("GOOGL"));
                assert_eq!(amount, 1000.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_backtest_periods() {
        let cli = Cli::try_parse_from([
            "portfolio-insight",
            "--config",
            "insight.toml",
            "backtest",
            "--period",
            "1Y",
            "--period",
            "10Y",
        ])
        .unwrap();

        match cli.command {
            Commands::Backtest {
                periods,
                initial_value,
            } => {
                assert_eq!(periods, vec![BacktestPeriod::OneYear, BacktestPeriod::TenYears]);
                assert!(initial_value.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_period() {
        assert!(Cli::try_parse_from(["portfolio-insight", "backtest", "--period", "3Y"]).is_err());
    }

    #[test]
    fn test_allocate_requires_target() {
        assert!(Cli::try_parse_from(["portfolio-insight", "allocate", "--amount", "10"]).is_err());
    }
}
