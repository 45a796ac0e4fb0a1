use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "jinjadir",
    about = "Render a directory of templates into a new project",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy and render templates into a target directory
    Init {
        /// Path to the directory with templates
        #[arg(long)]
        templates_path: PathBuf,

        /// Directory to render the templates into (default: current directory)
        target_path: Option<PathBuf>,

        /// Template variable (can be repeated: --arg k0=v0 --arg k1=v1)
        #[arg(long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,

        /// HTML-escape variable values inside file contents (path names are never escaped)
        #[arg(long)]
        autoescape: bool,

        /// Show the files that would be written without writing anything
        #[arg(long)]
        dry_run: bool,

        /// List every file written
        #[arg(short, long)]
        verbose: bool,
    },
}
