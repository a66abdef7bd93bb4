//! Contact intake server binary

use anyhow::Context;
use clap::Parser;
use contact_intake_api::{run, telemetry, ServerCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ServerCli::parse();
    let config = cli.resolve().context("failed to load configuration")?;

    telemetry::init_tracing(config.log_format)?;

    run(config).await
}
