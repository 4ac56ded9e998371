use clap::Parser;
use ethereum_update_prover_cli::{cli::UpdateProverCli, runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = UpdateProverCli::parse();
    runner::run(cli).await
}
