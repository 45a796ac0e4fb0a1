use tera::Context;

use crate::args::Arguments;

/// Build a Tera context from the parsed arguments.
pub fn build_context(arguments: &Arguments) -> Context {
    let mut context = Context::new();
    for (key, value) in arguments {
        context.insert(key, value);
    }
    context
}
