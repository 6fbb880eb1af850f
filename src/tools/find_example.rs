use super::provided;
use crate::fetch::Fetch;
use crate::gallery::Example;
use crate::search::score_examples;
use crate::source::DocSource;
use rmcp::schemars;
use serde::Deserialize;
use std::collections::BTreeMap;

const MAX_EXAMPLE_RESULTS: usize = 10;

/// Parameters for find_example tool
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FindExampleRequest {
    /// Keywords such as "treemap" or "bar chart"
    #[serde(default)]
    pub query: Option<String>,
    /// Gallery category such as "Bars" (case-insensitive). Takes precedence over query.
    #[serde(default)]
    pub category: Option<String>,
}

/// Browse the gallery: category overview, one category, or a keyword search.
pub async fn handle_find_example<F: Fetch>(
    source: &DocSource<F>,
    request: FindExampleRequest,
) -> Result<String, String> {
    let examples = source.fetch_gallery().await.map_err(|e| e.to_string())?;

    if let Some(category) = provided(request.category.as_deref()) {
        return Ok(list_category(&examples, category));
    }

    match provided(request.query.as_deref()) {
        Some(query) => Ok(search(&examples, query)),
        None => Ok(overview(&examples)),
    }
}

fn overview(examples: &[Example]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for example in examples {
        *counts.entry(example.category.as_str()).or_default() += 1;
    }

    let lines: Vec<String> = counts
        .iter()
        .map(|(category, count)| format!("- **{}** ({})", category, count))
        .collect();

    format!(
        "D3 example categories ({}, {} total examples):\n\n{}\n\n\
         Use `find_example(category=\"Bars\")` to list examples in a category, \
         or `find_example(query=\"treemap\")` to search.",
        counts.len(),
        examples.len(),
        lines.join("\n")
    )
}

fn list_category(examples: &[Example], category: &str) -> String {
    let wanted = category.to_lowercase();
    let filtered: Vec<&Example> = examples
        .iter()
        .filter(|e| e.category.to_lowercase() == wanted)
        .collect();

    let Some(first) = filtered.first() else {
        let categories: std::collections::BTreeSet<&str> =
            examples.iter().map(|e| e.category.as_str()).collect();
        return format!(
            "Unknown category '{}'. Available: {}",
            category,
            categories.into_iter().collect::<Vec<_>>().join(", ")
        );
    };

    let lines: Vec<String> = filtered
        .iter()
        .map(|e| format!("- **{}** by {} — `{}`", e.title, e.author, e.path))
        .collect();
    format!("Examples in '{}' ({}):\n\n{}", first.category, filtered.len(), lines.join("\n"))
}

fn search(examples: &[Example], query: &str) -> String {
    let scored = score_examples(query, examples);
    if scored.is_empty() {
        return format!("No examples found matching '{}'.", query);
    }

    let lines: Vec<String> = scored
        .iter()
        .take(MAX_EXAMPLE_RESULTS)
        .map(|(e, score)| format!("- **{}** [{}] (score {}) — `{}`", e.title, e.category, score, e.path))
        .collect();
    format!(
        "Examples matching '{}':\n\n{}\n\nUse `get_example(path=...)` to get the source code.",
        query,
        lines.join("\n")
    )
}
