//! Contains the command line interface for the application.

use std::convert::Infallible;

use clap::{command, Parser};

/// The command line interface for the update prover.
#[derive(Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct UpdateProverCli {
    /// Path to the JSON config file.
    #[clap(long, short = 'c', default_value = "config.json")]
    pub config: String,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The subcommands for the update prover.
#[derive(Clone, Parser)]
pub enum Commands {
    /// Derive the update that hands over the sync committee of a period.
    Period(PeriodCmd),
    /// Derive the update that finalizes an epoch.
    Epoch(EpochCmd),
    /// Derive the update of the sync committee period containing an epoch.
    CommitteeForEpoch(EpochCmd),
    /// Print the sync committee period of the head of the chain.
    LatestPeriod,
}

/// The arguments for the `period` subcommand.
#[derive(Parser, Clone)]
pub struct PeriodCmd {
    /// The sync committee period.
    #[clap(long)]
    pub period: u64,

    /// Output path. If not provided, the output will be written to stdout.
    #[clap(long, short = 'o', value_parser = parse_output_path, default_value = "-")]
    pub output_path: OutputPath,
}

/// The arguments for the `epoch` and `committee-for-epoch` subcommands.
#[derive(Parser, Clone)]
pub struct EpochCmd {
    /// The target epoch.
    #[clap(long)]
    pub epoch: u64,

    /// Output path. If not provided, the output will be written to stdout.
    #[clap(long, short = 'o', value_parser = parse_output_path, default_value = "-")]
    pub output_path: OutputPath,
}

/// The output path for files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputPath {
    /// Write the output to stdout.
    Stdout,
    /// Write the output to a file.
    File(String),
}

#[allow(clippy::unnecessary_wraps)]
fn parse_output_path(path: &str) -> Result<OutputPath, Infallible> {
    if path == "-" {
        Ok(OutputPath::Stdout)
    } else {
        Ok(OutputPath::File(path.to_string()))
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::{Commands, OutputPath, UpdateProverCli};

    #[test]
    fn test_period_defaults_to_stdout() {
        let cli = UpdateProverCli::parse_from(["update-prover", "period", "--period", "7"]);

        assert_eq!(cli.config, "config.json");
        let Commands::Period(cmd) = cli.command else {
            panic!("expected the period subcommand");
        };
        assert_eq!(cmd.period, 7);
        assert_eq!(cmd.output_path, OutputPath::Stdout);
    }

    #[test]
    fn test_epoch_with_output_file() {
        let cli = UpdateProverCli::parse_from([
            "update-prover",
            "-c",
            "sepolia.json",
            "committee-for-epoch",
            "--epoch",
            "40",
            "-o",
            "update.json",
        ]);

        assert_eq!(cli.config, "sepolia.json");
        let Commands::CommitteeForEpoch(cmd) = cli.command else {
            panic!("expected the committee-for-epoch subcommand");
        };
        assert_eq!(cmd.epoch, 40);
        assert_eq!(cmd.output_path, OutputPath::File("update.json".to_string()));
    }

    #[test]
    fn test_latest_period_takes_no_arguments() {
        let cli = UpdateProverCli::parse_from(["update-prover", "latest-period"]);
        assert!(matches!(cli.command, Commands::LatestPeriod));
    }
}
