use std::collections::BTreeMap;

use crate::error::{JinjadirError, Result};

/// Template variables, keyed by name.
pub type Arguments = BTreeMap<String, String>;

/// Parse a single `name=value` binding.
///
/// The binding must contain exactly one `=` with something on both sides, so
/// `a=b=c`, `=value` and `name=` are all rejected.
pub fn parse_argument(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.split_once('=')?;
    if name.is_empty() || value.is_empty() || value.contains('=') {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

/// Parse every `name=value` binding, reporting all malformed ones at once.
///
/// When a name is given more than once the last binding wins.
pub fn parse_arguments<I, S>(raw: I) -> Result<Arguments>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut arguments = Arguments::new();
    let mut invalid = Vec::new();

    for entry in raw {
        let entry = entry.as_ref();
        match parse_argument(entry) {
            Some((name, value)) => {
                arguments.insert(name, value);
            }
            None => invalid.push(entry.to_string()),
        }
    }

    if !invalid.is_empty() {
        return Err(JinjadirError::InvalidArgumentFormat { entries: invalid });
    }

    Ok(arguments)
}
