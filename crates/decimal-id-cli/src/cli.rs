//! CLI argument handling.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use decimal_id::Strategy;

use crate::config::Config;

pub fn args() -> Args {
    Args::parse()
}

/// Converts between Steam account IDs and SteamID64s.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Path to the configuration file.
    ///
    /// Will default to `./idconv.toml` if unspecified.
    /// If that file does not exist, default configuration values will be used.
    #[arg(short, long = "config", global = true)]
    pub config_path: Option<PathBuf>,

    /// How to carry out the arithmetic (`auto`, `native` or `digit-string`).
    ///
    /// This takes precedence over the value in the configuration file.
    #[arg(long, global = true)]
    pub strategy: Option<Strategy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Converts account IDs into SteamID64s.
    ToWide {
        /// The account IDs to convert. An empty argument is passed through as empty.
        ids: Vec<String>,
    },

    /// Converts SteamID64s into account IDs.
    ToNarrow {
        /// The SteamID64s to convert. An empty argument is passed through as empty.
        ids: Vec<String>,
    },

    /// Attaches account IDs to a `GetPlayerSummaries` response.
    Profiles {
        /// JSON file to read. Defaults to stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

impl Args {
    /// Applies any overrides specified as CLI flags to the given config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(strategy) = self.strategy {
            config.conversion.strategy = strategy;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn to_wide() {
        let args = Args::try_parse_from(["idconv", "to-wide", "1", "322356345"]).unwrap();

        let Command::ToWide { ids } = args.command else {
            panic!("expected `to-wide`");
        };

        assert_eq!(ids, ["1", "322356345"]);
    }

    #[test]
    fn strategy_override() {
        let argv = ["idconv", "to-narrow", "--strategy", "digit-string", "1"];
        let args = Args::try_parse_from(argv).unwrap();
        let mut config = Config::default();

        args.apply_to_config(&mut config);

        assert_eq!(config.conversion.strategy, Strategy::DigitString);
        assert!(matches!(args.command, Command::ToNarrow { .. }));
    }

    #[test]
    fn no_override() {
        let args = Args::try_parse_from(["idconv", "profiles", "-i", "players.json"]).unwrap();
        let mut config = "[conversion]\nstrategy = \"native\"\n".parse::<Config>().unwrap();

        args.apply_to_config(&mut config);

        assert_eq!(config.conversion.strategy, Strategy::Native);
        assert!(matches!(args.command, Command::Profiles { input: Some(_) }));
    }

    #[test]
    fn invalid_strategy() {
        assert!(Args::try_parse_from(["idconv", "--strategy", "fast", "to-wide", "1"]).is_err());
    }
}
