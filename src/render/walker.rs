use std::path::{Path, PathBuf};

use crate::args::Arguments;
use crate::error::{JinjadirError, Result};
use crate::output::{resolve_target, write_file};
use crate::render::file::{render_template, RenderOutcome};
use crate::template::{list_templates, read_template, TemplateContent, TemplateEntry};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// HTML-escape interpolated values in file contents.
    pub autoescape: bool,
    /// Render everything but write nothing.
    pub dry_run: bool,
}

/// A file produced (or, on a dry run, that would be produced) by a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    /// Rendered path relative to the target directory.
    pub relative_path: String,
    pub target_path: PathBuf,
    /// Whether this file was copied verbatim (true) or rendered from a template (false).
    pub is_copy: bool,
}

#[derive(Debug)]
pub struct ProcessReport {
    pub target_dir: PathBuf,
    pub files: Vec<ProcessedFile>,
}

/// Distinct missing variable names, in the order they were first seen.
#[derive(Debug, Default)]
struct MissingVariables {
    names: Vec<String>,
}

impl MissingVariables {
    fn record(&mut self, names: Vec<String>) {
        for name in names {
            if !self.names.contains(&name) {
                self.names.push(name);
            }
        }
    }

    fn into_result(self, templates_dir: &Path) -> Result<()> {
        if self.names.is_empty() {
            return Ok(());
        }
        Err(JinjadirError::MissingVariables {
            names: self.names,
            templates_path: templates_dir.to_path_buf(),
        })
    }
}

/// Render every template under `templates_dir` into `target_dir`.
///
/// Templates referencing undefined variables are skipped and collected; once
/// the whole tree has been walked they are reported together as a single
/// `MissingVariables` error. Files that rendered completely are written
/// regardless. Any other failure aborts the pass immediately.
pub fn process_templates(
    templates_dir: &Path,
    target_dir: &Path,
    arguments: &Arguments,
    options: ProcessOptions,
) -> Result<ProcessReport> {
    let mut missing = MissingVariables::default();
    let mut files = Vec::new();

    for entry in list_templates(templates_dir)? {
        let mut entry_missing = Vec::new();

        let rendered_path = match render_template(&entry.relative_path, arguments, false)
            .map_err(|e| render_error(&entry, e))?
        {
            RenderOutcome::Rendered(path) => Some(path),
            RenderOutcome::Missing(names) => {
                entry_missing.extend(names);
                None
            }
        };

        let (content, is_copy) = match read_template(&entry)? {
            TemplateContent::Text(text) => {
                match render_template(&text, arguments, options.autoescape)
                    .map_err(|e| render_error(&entry, e))?
                {
                    RenderOutcome::Rendered(rendered) => (Some(rendered.into_bytes()), false),
                    RenderOutcome::Missing(names) => {
                        entry_missing.extend(names);
                        (None, false)
                    }
                }
            }
            TemplateContent::Binary(bytes) => (Some(bytes), true),
        };

        let (Some(rendered_path), Some(content)) = (rendered_path, content) else {
            missing.record(entry_missing);
            continue;
        };

        let target_path = resolve_target(target_dir, &entry.relative_path, &rendered_path)?;
        if !options.dry_run {
            write_file(&target_path, &content)?;
        }

        files.push(ProcessedFile {
            relative_path: rendered_path,
            target_path,
            is_copy,
        });
    }

    missing.into_result(templates_dir)?;

    Ok(ProcessReport {
        target_dir: target_dir.to_path_buf(),
        files,
    })
}

fn render_error(entry: &TemplateEntry, source: tera::Error) -> JinjadirError {
    JinjadirError::RenderError {
        file: entry.relative_path.clone(),
        source,
    }
}
