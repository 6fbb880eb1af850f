pub mod find_example;
pub mod find_module;
pub mod get_docs;
pub mod get_example;
pub mod get_page;
pub mod search_docs;

pub use find_example::*;
pub use find_module::*;
pub use get_docs::*;
pub use get_example::*;
pub use get_page::*;
pub use search_docs::*;

use crate::registry::suggest_modules;

/// Error text for a module name that does not resolve, with close matches if any.
pub(crate) fn unknown_module(name: &str) -> String {
    let mut message = format!("Unknown module '{}'. Use find_module() to list modules.", name);
    let suggestions = suggest_modules(name);
    if !suggestions.is_empty() {
        message.push_str(&format!(" Did you mean: {}?", suggestions.join(", ")));
    }
    message
}

/// `None` and `Some("")` both mean "not given".
pub(crate) fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
