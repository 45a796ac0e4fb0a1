mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    match Cli::parse().command {
        Commands::Init {
            templates_path,
            target_path,
            args,
            autoescape,
            dry_run,
            verbose,
        } => commands::init::run(
            templates_path,
            target_path,
            args,
            autoescape,
            dry_run,
            verbose,
        ),
    }
}
