use std::path::PathBuf;

use console::style;
use jinjadir::error::JinjadirError;
use jinjadir::InitOptions;
use miette::Result;

pub fn run(
    templates_path: PathBuf,
    target_path: Option<PathBuf>,
    args: Vec<String>,
    autoescape: bool,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    let working_dir = std::env::current_dir().map_err(|e| JinjadirError::Io {
        context: "getting current directory".into(),
        source: e,
    })?;

    let report = jinjadir::init(InitOptions {
        templates_path,
        target_path,
        working_dir,
        args,
        autoescape,
        dry_run,
    })?;

    if dry_run {
        println!(
            "{} Files that would be written in {}:",
            style("==>").cyan().bold(),
            style(report.target_dir.display()).cyan()
        );
        for file in &report.files {
            let action = if file.is_copy { "copy  " } else { "render" };
            println!("  {} {}", style(action).green(), file.relative_path);
        }
        println!(
            "\n{} Dry run, no files written.",
            style("\u{2139}").blue().bold()
        );
    } else if verbose {
        for file in &report.files {
            let action = if file.is_copy { "copied  " } else { "rendered" };
            eprintln!(
                "{} {}",
                style(action).green(),
                style(file.target_path.display()).dim()
            );
        }
        eprintln!(
            "{} {} files written to {}",
            style("\u{2713}").green().bold(),
            report.files.len(),
            style(report.target_dir.display()).cyan()
        );
    }

    Ok(())
}
