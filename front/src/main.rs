use clap::Parser;
use lingo::cli::Cli;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    lingo::install_tracing();

    lingo::run(Cli::parse()).await
}
