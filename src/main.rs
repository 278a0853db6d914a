use anyhow::Result;
use clap::Parser;
use denario::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
