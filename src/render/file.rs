use std::sync::OnceLock;

use regex_lite::Regex;
use tera::Tera;

use crate::args::Arguments;
use crate::render::context::build_context;
use crate::render::scan::{root_name, undefined_variables};

const TEMPLATE_NAME: &str = "__template__";

/// Result of rendering a single template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(String),
    /// Root names of the variables the template uses that are not in the
    /// arguments, in source order.
    Missing(Vec<String>),
}

/// Render `source` against `arguments`.
///
/// The parsed template is scanned for undefined variables before rendering,
/// so every missing name is reported at once, including those Tera would
/// silently treat as false. Undefined lookups the scan cannot see still
/// surface from the render itself. Any other failure is returned as-is.
pub fn render_template(
    source: &str,
    arguments: &Arguments,
    autoescape: bool,
) -> std::result::Result<RenderOutcome, tera::Error> {
    let mut tera = Tera::default();
    if autoescape {
        tera.autoescape_on(vec![TEMPLATE_NAME]);
    } else {
        tera.autoescape_on(vec![]);
    }
    tera.add_raw_template(TEMPLATE_NAME, source)?;

    let missing = undefined_variables(&tera.get_template(TEMPLATE_NAME)?.ast, arguments);
    if !missing.is_empty() {
        return Ok(RenderOutcome::Missing(missing));
    }

    match tera.render(TEMPLATE_NAME, &build_context(arguments)) {
        Ok(rendered) => Ok(RenderOutcome::Rendered(rendered)),
        Err(e) => match undefined_variable(&e) {
            // A supplied argument without the requested attribute is a
            // template error, not a missing variable.
            Some(name) if !arguments.contains_key(&name) => {
                Ok(RenderOutcome::Missing(vec![name]))
            }
            _ => Err(e),
        },
    }
}

/// Extract the root variable name from Tera's "not found in context" error,
/// if that is what `err` (or one of its causes) is.
pub fn undefined_variable(err: &tera::Error) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"Variable `([^`]+)` not found in context").expect("valid regex")
    });

    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(caps) = pattern.captures(&e.to_string()) {
            return Some(root_name(&caps[1]).to_string());
        }
        current = e.source();
    }
    None
}
