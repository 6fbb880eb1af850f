use super::{provided, unknown_module};
use crate::fetch::Fetch;
use crate::registry::{module, resolve_module_name, resolve_page_path};
use crate::source::DocSource;
use rmcp::schemars;
use serde::Deserialize;

/// Parameters for get_docs tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDocsRequest {
    /// Module name, with or without the prefix: "d3-scale" or "scale"
    pub module_name: String,
    /// Sub-page of the module, e.g. "linear" for d3-scale. Omit for the overview.
    #[serde(default)]
    pub page: Option<String>,
}

/// Fetch a module's overview page, or one of its sub-pages.
///
/// The overview gets a footer listing sub-pages when the module has any.
pub async fn handle_get_docs<F: Fetch>(source: &DocSource<F>, request: GetDocsRequest) -> Result<String, String> {
    let Some(record) = resolve_module_name(&request.module_name).and_then(module) else {
        return Err(unknown_module(&request.module_name));
    };

    if let Some(page) = provided(request.page.as_deref()) {
        let candidate = format!("/{}/{}", record.name, page.trim().to_lowercase());
        let Some(resolved) = resolve_page_path(&candidate) else {
            return Err(format!(
                "Unknown page '{}' for {}. Available: {}",
                page,
                record.name,
                record.sub_page_names().join(", ")
            ));
        };
        return source.fetch_page(resolved).await.map_err(|e| e.to_string());
    }

    let mut content = source
        .fetch_page(record.index_page())
        .await
        .map_err(|e| e.to_string())?;

    let sub_pages = record.sub_page_names();
    if !sub_pages.is_empty() {
        let list: Vec<String> = sub_pages.iter().map(|name| format!("- `{}`", name)).collect();
        content.push_str(&format!(
            "\n\n---\n\n## Sub-pages\n\nUse `get_docs(module_name=\"{}\", page=...)` for details:\n\n{}",
            record.name,
            list.join("\n")
        ));
    }

    Ok(content)
}
