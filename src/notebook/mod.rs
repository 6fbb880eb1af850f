//! Extraction of readable example code from compiled notebook modules.
//!
//! A notebook is served as a JavaScript module: one `function _name(params) {...}`
//! per cell, followed by a `define()` function that registers the cells with the
//! runtime. Nothing here executes the source; everything is pattern matching plus a
//! brace-aware scanner for cell bodies.

mod cell;
mod define;
mod description;

pub use cell::{Cell, extract_cell, extract_function_body};
pub use define::{
    CHART_CELL, OrderedPairs, extract_file_attachments, extract_imports,
    find_chart_dependencies, find_named_cells, helper_modules, module_paths,
};
pub use description::extract_description;

use regex::Regex;
use std::sync::LazyLock;

/// Returned instead of a partial document when a notebook has no chart cell.
pub const NO_CHART_MESSAGE: &str = "No chart code found in this notebook.";

/// Runtime-provided names that never correspond to a notebook cell.
pub const ENVIRONMENT_NAMES: &[&str] = &["d3", "invalidation", "width", "height", "topojson", "DOM"];

static RETURN_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^return\(\s*\n?").unwrap());
static RETURN_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\)$").unwrap());

/// Everything pulled out of one notebook, before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookExtraction {
    pub description: String,
    /// Contents of the fenced code block
    pub code: String,
    /// Attachment name → URL
    pub attachments: OrderedPairs,
    /// Imported helper name → source notebook URL
    pub imports: OrderedPairs,
}

impl NotebookExtraction {
    /// Scan `source`; `None` if the notebook has no `_chart` cell.
    pub fn from_source(source: &str, notebook_base_url: &str) -> Option<Self> {
        let chart = extract_cell(source, &format!("_{}", CHART_CELL))?;
        let attachments = extract_file_attachments(source);

        let mut code_lines = data_annotations(source, !attachments.is_empty());
        if !code_lines.is_empty() {
            code_lines.push(String::new());
        }

        let chart_deps: Vec<&str> = chart
            .param_list()
            .into_iter()
            .filter(|p| !ENVIRONMENT_NAMES.contains(p))
            .collect();
        if !chart_deps.is_empty() {
            code_lines.push(format!("// Dependencies: {}", chart_deps.join(", ")));
        }
        code_lines.push(chart.body);

        Some(Self {
            description: extract_description(source),
            code: code_lines.join("\n"),
            attachments,
            imports: extract_imports(source, notebook_base_url),
        })
    }

    /// Render as the markdown document that gets cached and returned.
    pub fn render(&self) -> String {
        let mut parts = Vec::new();

        if !self.description.is_empty() {
            parts.push(self.description.clone());
        }

        parts.push(format!("```js\n{}\n```", self.code));

        if !self.imports.is_empty() {
            let list: Vec<_> = self
                .imports
                .iter()
                .map(|(name, url)| format!("- `{}` from [{}]({})", name, url, url))
                .collect();
            parts.push(format!("**Imported helpers:**\n\n{}", list.join("\n")));
        }

        if !self.attachments.is_empty() {
            let list: Vec<_> = self
                .attachments
                .iter()
                .map(|(name, url)| format!("- `{}`: {}", name, url))
                .collect();
            parts.push(format!("**Data files:**\n\n{}", list.join("\n")));
        }

        parts.join("\n\n")
    }
}

/// `// Data:` comments for chart dependencies that load file attachments.
fn data_annotations(source: &str, has_attachments: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if !has_attachments {
        return lines;
    }

    for dep in find_chart_dependencies(source) {
        if ENVIRONMENT_NAMES.contains(&dep.as_str()) {
            continue;
        }
        let Some(cell) = extract_cell(source, &format!("_{}", dep)) else {
            continue;
        };
        if !cell.params.contains("FileAttachment") {
            continue;
        }
        lines.push(format!("// Data: {}", dep));
        lines.push(format!("// {}", strip_return_wrapper(cell.body.trim())));
    }
    lines
}

/// `return(\n  expr\n)` → `expr`
fn strip_return_wrapper(body: &str) -> String {
    if !body.starts_with("return(") {
        return body.to_string();
    }
    let inner = RETURN_OPEN.replace(body, "");
    RETURN_CLOSE.replace(&inner, "").into_owned()
}

/// Extract and render a notebook, or return [`NO_CHART_MESSAGE`].
pub fn extract_notebook_code(source: &str, notebook_base_url: &str) -> String {
    match NotebookExtraction::from_source(source, notebook_base_url) {
        Some(extraction) => extraction.render(),
        None => NO_CHART_MESSAGE.to_string(),
    }
}
