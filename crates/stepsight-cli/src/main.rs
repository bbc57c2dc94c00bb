use clap::Parser;
use eyre::Result;

use stepsight_cli::cli::Cli;
use stepsight_cli::{commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.log_json);

    commands::run(cli).await
}
