pub mod args;
pub mod error;
pub mod output;
pub mod render;
pub mod template;

use std::path::{Path, PathBuf};

use crate::args::parse_arguments;
use crate::error::{JinjadirError, Result};
use crate::output::make_dirs;
use crate::render::{process_templates, ProcessOptions, ProcessReport};

pub struct InitOptions {
    /// Directory holding the templates.
    pub templates_path: PathBuf,
    /// Where to render the templates. Defaults to `working_dir`.
    pub target_path: Option<PathBuf>,
    /// Directory relative paths are resolved against.
    pub working_dir: PathBuf,
    /// Raw `name=value` bindings.
    pub args: Vec<String>,
    pub autoescape: bool,
    pub dry_run: bool,
}

/// Render a templates directory into a target directory.
///
/// Arguments are validated before anything touches the filesystem. The target
/// directory is then created (unless this is a dry run), even if there turn
/// out to be no templates to render.
pub fn init(options: InitOptions) -> Result<ProcessReport> {
    let arguments = parse_arguments(&options.args)?;

    let templates_dir = resolve(&options.working_dir, &options.templates_path);
    let target_dir = match &options.target_path {
        Some(path) => resolve(&options.working_dir, path),
        None => options.working_dir.clone(),
    };

    if !options.dry_run {
        make_dirs(&target_dir)?;
    }

    if !templates_dir.is_dir() {
        return Err(JinjadirError::TemplatesDirectoryMissing {
            path: templates_dir,
        });
    }

    process_templates(
        &templates_dir,
        &target_dir,
        &arguments,
        ProcessOptions {
            autoescape: options.autoescape,
            dry_run: options.dry_run,
        },
    )
}

fn resolve(working_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}
