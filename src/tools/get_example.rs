use crate::fetch::Fetch;
use crate::source::DocSource;
use rmcp::schemars;
use serde::Deserialize;

/// Parameters for get_example tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetExampleRequest {
    /// Notebook path from find_example, e.g. "@d3/bar-chart/2"
    pub path: String,
}

/// `"d3/bar-chart/2 "` → `"@d3/bar-chart/2"`
pub fn normalize_notebook_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('@') {
        path.to_string()
    } else {
        format!("@{}", path)
    }
}

pub async fn handle_get_example<F: Fetch>(
    source: &DocSource<F>,
    request: GetExampleRequest,
) -> Result<String, String> {
    let path = normalize_notebook_path(&request.path);
    let content = source.fetch_notebook(&path).await.map_err(|e| e.to_string())?;
    Ok(format!("## Example: {}\n\n{}", path, content))
}
