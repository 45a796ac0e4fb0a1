#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum JinjadirError {
    #[error("{} are not in the <name>=<value> format.", quoted(entries))]
    #[diagnostic(help("Pass each variable as --arg name=value, with exactly one '='"))]
    InvalidArgumentFormat { entries: Vec<String> },

    #[error("{} are required inside {}.", quoted(names), templates_path.display())]
    #[diagnostic(help("Provide the missing variables with --arg name=value"))]
    MissingVariables {
        names: Vec<String>,
        templates_path: PathBuf,
    },

    #[error("Template '{template}' renders to '{rendered}', which is outside the target directory")]
    #[diagnostic(help("Rendered paths must be relative and must not contain '..'"))]
    UnsafeTargetPath { template: String, rendered: String },

    #[error("Failed to render template: {file}")]
    #[diagnostic(help("Check your Tera template syntax"))]
    RenderError {
        file: String,
        #[source]
        source: tera::Error,
    },

    #[error("Templates directory not found: {path}")]
    #[diagnostic(help("--templates-path must point to an existing directory"))]
    TemplatesDirectoryMissing { path: PathBuf },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Quote each item and join them with commas: `'a','b'`.
fn quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(",")
}

pub type Result<T> = std::result::Result<T, JinjadirError>;
