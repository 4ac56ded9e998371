//! Runs a single command of the update prover.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ethereum_apis::beacon_api::client::BeaconApiClient;
use ethereum_update_prover::{
    prover::UpdateProver,
    update::{EpochUpdate, PeriodUpdate, UpdateRequest},
};
use serde::Serialize;
use tracing::info;

use crate::{
    cli::{Commands, OutputPath, UpdateProverCli},
    config::{parse_config, ProgramConfig},
    observability::init_observability,
};

/// Loads the config named by `cli`, initializes logging and runs the selected command.
///
/// # Errors
/// Returns an error if the config cannot be read, the beacon node fails or an update does not verify.
pub async fn run(cli: UpdateProverCli) -> Result<()> {
    let config_json = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("failed to read config file {}", cli.config))?;
    let config = parse_config(&config_json)?;

    init_observability(config.log_level())?;
    info!("Observability initialized with level: {}", config.log_level());

    let prover = build_prover(config).await?;

    match cli.command {
        Commands::Period(cmd) => {
            let request = UpdateRequest::Period(PeriodUpdate { period: cmd.period });
            let update = prover.derive_update(&request).await?;
            write_output(&cmd.output_path, &update)
        }
        Commands::Epoch(cmd) => {
            let request = UpdateRequest::Epoch(EpochUpdate { epoch: cmd.epoch });
            let update = prover.derive_update(&request).await?;
            write_output(&cmd.output_path, &update)
        }
        Commands::CommitteeForEpoch(cmd) => {
            let update = prover.committee_update_for_epoch(cmd.epoch).await?;
            write_output(&cmd.output_path, &update)
        }
        Commands::LatestPeriod => {
            let period = prover.latest_sync_committee_period().await?;
            println!("{period}");
            Ok(())
        }
    }
}

async fn build_prover(config: ProgramConfig) -> Result<UpdateProver<BeaconApiClient>> {
    let ProgramConfig {
        beacon_api_url,
        prover: section,
        ..
    } = config;
    let client = BeaconApiClient::new(beacon_api_url);

    let spec = match section.spec.clone() {
        Some(spec) => spec,
        None => {
            info!("No spec configured, fetching it from the beacon node");
            client
                .spec()
                .await
                .context("failed to fetch the chain spec")?
                .data
        }
    };

    Ok(UpdateProver::new(client, section.into_config(spec)))
}

fn write_output<T: Serialize>(output_path: &OutputPath, value: &T) -> Result<()> {
    match output_path {
        OutputPath::File(path) => {
            std::fs::write(PathBuf::from(path), serde_json::to_string_pretty(value)?)?;
            info!("Update written to {path}");
        }
        OutputPath::Stdout => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }

    Ok(())
}
