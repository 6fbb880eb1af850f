//! Recovery of example records from the gallery index page.
//!
//! The gallery page ships its notebook cells as JSON embedded in a script payload,
//! so the interesting `previews([...])` calls only appear after unescaping. Each
//! cell carries a `"name"` field naming its category.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A curated example listed in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Notebook path, e.g. `@d3/bar-chart/2`
    pub path: String,
    pub title: String,
    /// Capitalized category label; empty when the cell has no name
    pub category: String,
    pub author: String,
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(CELL_BOUNDARY, r#"\},\{"id":"#);
regex!(CATEGORY_NAME, r#""name"\s*:\s*"([^"]+)""#);
regex!(PREVIEWS_BLOCK, r"(?s)previews\(\[(.+?)\]\)");
regex!(
    PREVIEW_OBJECT,
    r#"\{\s*path:\s*"([^"]+)",\s*thumbnail:\s*"[^"]+",\s*title:\s*"([^"]+)",\s*author:\s*"([^"]+)"\s*\}"#
);

/// Undo the string-literal escaping applied to the embedded cell source.
fn unescape_js(s: &str) -> String {
    s.replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Parse the raw gallery page into examples, in page order.
///
/// An example listed under several categories appears once per category. A page
/// without any preview blocks yields an empty list; callers treat that as a failed
/// fetch rather than an empty gallery.
pub fn parse_gallery(page: &str) -> Vec<Example> {
    let unescaped = unescape_js(page);
    let mut examples = Vec::new();

    for chunk in CELL_BOUNDARY.split(&unescaped) {
        let category = CATEGORY_NAME
            .captures(chunk)
            .map(|c| capitalize(&c[1]))
            .unwrap_or_default();

        for block in PREVIEWS_BLOCK.captures_iter(chunk) {
            for object in PREVIEW_OBJECT.captures_iter(&block[1]) {
                examples.push(Example {
                    path: object[1].to_string(),
                    title: object[2].to_string(),
                    category: category.clone(),
                    author: object[3].to_string(),
                });
            }
        }
    }

    examples
}
