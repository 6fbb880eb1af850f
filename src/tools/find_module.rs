use super::provided;
use crate::registry::MODULES;
use crate::search::score_modules;
use rmcp::schemars;
use serde::Deserialize;

const MAX_MODULE_RESULTS: usize = 5;

/// Parameters for find_module tool
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FindModuleRequest {
    /// Keywords such as "scale", "force layout" or "scaleLinear". Omit to list every module.
    #[serde(default)]
    pub query: Option<String>,
}

/// List all modules, or the best keyword matches.
pub fn handle_find_module(request: FindModuleRequest) -> String {
    let Some(query) = provided(request.query.as_deref()) else {
        let lines: Vec<String> = MODULES
            .iter()
            .map(|m| format!("- **{}** ({} pages): {}", m.name, m.pages.len(), m.description))
            .collect();
        return format!("Available D3 modules ({}):\n\n{}", MODULES.len(), lines.join("\n"));
    };

    let scored = score_modules(query, MODULES);
    if scored.is_empty() {
        return format!("No modules found matching '{}'.", query);
    }

    let lines: Vec<String> = scored
        .iter()
        .take(MAX_MODULE_RESULTS)
        .map(|(m, score)| format!("- **{}** (score {}): {}", m.name, score, m.description))
        .collect();
    format!("Modules matching '{}':\n\n{}", query, lines.join("\n"))
}
