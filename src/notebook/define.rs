//! Facts recovered from a notebook's `define()` section: file attachments, the
//! chart cell's dependencies, named cells and imports from other notebooks.

use ahash::AHashMap;
use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// ["alphabet.csv", {url: "https://...", mimeType: "text/csv"}]
regex!(
    FILE_ATTACHMENT,
    r#"\["([^"]+)",\s*\{url:\s*"([^"]+)"(?:,\s*mimeType:\s*"([^"]+)")?\}\]"#
);
// main.variable(observer("chart")).define("chart", ["d3","data"], _chart);
regex!(CHART_DEFINE, r#"\.define\("chart",\s*\[([^\]]*)\],\s*_chart\)"#);
regex!(NAMED_CELL, r#"observer\("(\w+)"\)\)\.define\("(\w+)""#);
// main.define("module 1", async () => runtime.module((await import("/@d3/color-legend.js?v=4")).default));
regex!(MODULE_IMPORT, r#"\.define\("(module \d+)".*?import\("(/[^"?]+)"#);
// main.define("Legend", ["module 1", "@variable"], (_, v) => v.import("Legend", _));
regex!(HELPER_IMPORT, r#"\.define\("(\w+)",\s*\["(module \d+)".*?\.import\("(\w+)""#);

/// Name of the cell holding the primary visual output.
pub const CHART_CELL: &str = "chart";

/// Insertion-ordered `(key, value)` pairs where a repeated key overwrites in place.
pub type OrderedPairs = Vec<(String, String)>;

fn upsert(pairs: &mut OrderedPairs, key: &str, value: String) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 = value,
        None => pairs.push((key.to_string(), value)),
    }
}

/// Collect attachment name → URL pairs. Later duplicates win.
pub fn extract_file_attachments(source: &str) -> OrderedPairs {
    let mut attachments = OrderedPairs::new();
    for caps in FILE_ATTACHMENT.captures_iter(source) {
        upsert(&mut attachments, &caps[1], caps[2].to_string());
    }
    attachments
}

/// Dependency names declared for the `chart` cell, or empty if it is not registered.
pub fn find_chart_dependencies(source: &str) -> Vec<String> {
    let Some(caps) = CHART_DEFINE.captures(source) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| d.trim_matches('"').to_string())
        .collect()
}

/// Names of registered cells other than `chart` and underscore-prefixed ones.
pub fn find_named_cells(source: &str) -> Vec<String> {
    NAMED_CELL
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .filter(|name| name != CHART_CELL && !name.starts_with('_'))
        .collect()
}

/// First pass: `"module N"` → notebook path (`/@owner/slug`).
pub fn module_paths(source: &str) -> AHashMap<String, String> {
    MODULE_IMPORT
        .captures_iter(source)
        .map(|caps| (caps[1].to_string(), notebook_path(&caps[2])))
        .collect()
}

/// `/d3/color-legend.js` → `/@d3/color-legend`
fn notebook_path(import_path: &str) -> String {
    let clean = import_path.strip_suffix(".js").unwrap_or(import_path);
    if clean.starts_with("/@") {
        clean.to_string()
    } else {
        format!("/@{}", clean.trim_start_matches('/'))
    }
}

/// Second pass: helper name → `"module N"` it is imported from, in source order.
pub fn helper_modules(source: &str) -> OrderedPairs {
    let mut helpers = OrderedPairs::new();
    for caps in HELPER_IMPORT.captures_iter(source) {
        upsert(&mut helpers, &caps[1], caps[2].to_string());
    }
    helpers
}

/// Join both passes into helper name → source notebook URL.
///
/// Helpers whose module was never resolved are dropped.
pub fn extract_imports(source: &str, notebook_base_url: &str) -> OrderedPairs {
    let paths = module_paths(source);
    let mut imports = OrderedPairs::new();
    for (name, module) in helper_modules(source) {
        if let Some(path) = paths.get(&module) {
            upsert(&mut imports, &name, format!("{}{}", notebook_base_url, path));
        }
    }
    imports
}
