use crate::fetch::Fetch;
use crate::registry::resolve_page_path;
use crate::source::DocSource;
use rmcp::schemars;
use serde::Deserialize;

/// Scheme under which raw pages are addressed: `d3-docs://d3-scale/linear`.
pub const PAGE_URI_SCHEME: &str = "d3-docs://";

/// Parameters for get_page tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPageRequest {
    /// Page path such as "d3-scale/linear"; a `d3-docs://` prefix is accepted
    pub page_path: String,
}

/// Raw documentation page, without the sub-page footer `get_docs` adds.
pub async fn handle_get_page<F: Fetch>(source: &DocSource<F>, request: GetPageRequest) -> Result<String, String> {
    let raw = request.page_path.trim();
    let path = raw.strip_prefix(PAGE_URI_SCHEME).unwrap_or(raw);
    let Some(resolved) = resolve_page_path(path) else {
        return Err(format!("Unknown page '{}'.", request.page_path));
    };
    source.fetch_page(resolved).await.map_err(|e| e.to_string())
}
