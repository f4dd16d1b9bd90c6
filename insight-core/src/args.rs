//! Command-line arguments shared by every insight front end.

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where configuration and data come from.
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to a JSON snapshot of accounts, positions, quotes and history
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Account id key to operate on
    #[arg(short, long, global = true)]
    account: Option<String>,
}

impl CommonArgs {
    pub fn get_config_path(&self) -> Option<PathBuf> {
        self.config.clone()
    }

    pub fn get_snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot.clone()
    }

    pub fn get_account(&self) -> Option<&str> {
        self.account.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_parse_common_args() {
        let harness = Harness::parse_from([
            "test",
            "--config",
            "insight.toml",
            "--snapshot",
            "data/snapshot.json",
            "--account",
            "abc123",
        ]);

        assert_eq!(harness.common.get_config_path(), Some(PathBuf::from("insight.toml")));
        assert_eq!(
            harness.common.get_snapshot_path(),
            Some(PathBuf::from("data/snapshot.json"))
        );
        assert_eq!(harness.common.get_account(), Some("abc123"));
    }

    #[test]
    fn test_defaults_are_empty() {
        let harness = Harness::parse_from(["test"]);
        assert!(harness.common.get_config_path().is_none());
        assert!(harness.common.get_snapshot_path().is_none());
        assert!(harness.common.get_account().is_none());
    }
}
