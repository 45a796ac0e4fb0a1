use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{JinjadirError, Result};

/// Number of leading bytes inspected when deciding whether a file is binary.
const INSPECT_LEN: usize = 8192;

/// One template file found under the templates directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Path relative to the templates directory, always `/`-separated.
    pub relative_path: String,
    pub source_path: PathBuf,
}

/// The contents of a template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    Text(String),
    /// Copied verbatim, never rendered.
    Binary(Vec<u8>),
}

/// List every file under `root`, recursively, sorted by relative path.
pub fn list_templates(root: &Path) -> Result<Vec<TemplateEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let source_path = entry.path().to_path_buf();
        let rel_path = source_path
            .strip_prefix(root)
            .expect("entry must be under the templates directory");

        entries.push(TemplateEntry {
            relative_path: to_slash_path(rel_path),
            source_path,
        });
    }

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(entries)
}

/// Read a template, classifying it as text or binary.
pub fn read_template(entry: &TemplateEntry) -> Result<TemplateContent> {
    let bytes = std::fs::read(&entry.source_path).map_err(|e| JinjadirError::Io {
        context: format!("reading {}", entry.source_path.display()),
        source: e,
    })?;

    if is_binary(&bytes) {
        return Ok(TemplateContent::Binary(bytes));
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(TemplateContent::Text(text)),
        // UTF-16 and friends look like text but cannot be rendered.
        Err(e) => Ok(TemplateContent::Binary(e.into_bytes())),
    }
}

/// Detect binary content using content_inspector (BOM-aware, null-byte scanning).
pub fn is_binary(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(INSPECT_LEN)];
    !content_inspector::inspect(head).is_text()
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn walk_error(root: &Path, err: walkdir::Error) -> JinjadirError {
    let context = match err.path() {
        Some(path) => format!("listing {}", path.display()),
        None => format!("listing {}", root.display()),
    };
    JinjadirError::Io {
        context,
        source: err.into(),
    }
}
