use clap::Parser;
use std::process::ExitCode;

mod cli;
mod duration;
mod logging;
mod presets;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    logging::init_logging(cli.verbose);
    cli::handle_command(cli).await
}
