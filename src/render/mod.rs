pub mod context;
pub mod file;
pub mod scan;
pub mod walker;

pub use context::build_context;
pub use file::{render_template, RenderOutcome};
pub use walker::{process_templates, ProcessOptions, ProcessReport, ProcessedFile};
