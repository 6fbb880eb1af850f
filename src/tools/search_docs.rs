use super::{provided, unknown_module};
use crate::fetch::Fetch;
use crate::registry::{MODULES, module, resolve_module_name};
use crate::search::{parse_sections, score_modules, search_sections};
use crate::source::DocSource;
use rmcp::schemars;
use serde::Deserialize;

/// Modules searched when no module is named
const MAX_MODULES: usize = 5;
/// Matching sections kept per page
const MAX_SECTIONS_PER_PAGE: usize = 3;
/// Stop once this many pages have produced matches
const MAX_PAGES: usize = 10;

const SEPARATOR: &str = "\n\n---\n\n";

/// Parameters for search_docs tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchDocsRequest {
    /// Topic or method to look for, e.g. "tick format" or "scaleLinear"
    pub query: String,
    /// Restrict the search to one module
    #[serde(default)]
    pub module_name: Option<String>,
}

/// Search page sections of the named module, or of the modules that best match the query.
///
/// Pages are fetched one at a time in registry order; a fetch failure aborts the search.
pub async fn handle_search_docs<F: Fetch>(
    source: &DocSource<F>,
    request: SearchDocsRequest,
) -> Result<String, String> {
    let query = request.query.as_str();

    let pages: Vec<&'static str> = match provided(request.module_name.as_deref()) {
        Some(name) => {
            let Some(record) = resolve_module_name(name).and_then(module) else {
                return Err(unknown_module(name));
            };
            record.pages.to_vec()
        }
        None => score_modules(query, MODULES)
            .into_iter()
            .take(MAX_MODULES)
            .flat_map(|(record, _)| record.pages.iter().copied())
            .collect(),
    };

    if pages.is_empty() {
        return Ok(format!("No relevant modules found for '{}'.", query));
    }

    let mut results = Vec::new();
    for page in pages {
        let content = source.fetch_page(page).await.map_err(|e| e.to_string())?;
        let sections = parse_sections(&content);
        let matches = search_sections(query, &sections, MAX_SECTIONS_PER_PAGE);

        if !matches.is_empty() {
            let parts: Vec<String> = matches
                .iter()
                .map(|s| format!("### {}\n\n{}", s.heading, s.content))
                .collect();
            results.push(format!("## {}\n\n{}", page, parts.join(SEPARATOR)));
        }

        if results.len() >= MAX_PAGES {
            break;
        }
    }

    if results.is_empty() {
        return Ok(format!("No results for '{}'.", query));
    }

    Ok(results.join(SEPARATOR))
}
