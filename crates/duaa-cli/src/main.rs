//! Duaa CLI - render Arabic supplications to images

use anyhow::Result;
use clap::Parser;

use duaa_cli::cli::{Cli, Commands};
use duaa_cli::{commands, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Logger unavailable: {}", e);
    }

    let root = cli.root.as_deref();
    match &cli.command {
        Commands::Generate(args) => commands::generate::run(args, root),
        Commands::Formats => {
            commands::formats::run();
            Ok(())
        },
        Commands::Batch(args) => commands::batch::run(args, root),
    }
}
