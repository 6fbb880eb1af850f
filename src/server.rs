//! MCP server exposing the documentation tools over stdio.

use crate::fetch::HttpFetcher;
use crate::schema::tool_input_schema;
use crate::source::DocSource;
use crate::tools::{
    FindExampleRequest, FindModuleRequest, GetDocsRequest, GetExampleRequest, GetPageRequest,
    SearchDocsRequest,
    handle_find_example, handle_find_module, handle_get_docs, handle_get_example, handle_get_page,
    handle_search_docs,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for d3 API documentation and gallery examples
#[derive(Clone)]
pub struct DocsServer {
    /// Cache-backed upstream access shared by all tool calls
    source: Arc<DocSource<HttpFetcher>>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsServer")
            .field("cache", &self.source.cache().root())
            .finish_non_exhaustive()
    }
}

#[tool_router]
impl DocsServer {
    pub fn new(source: DocSource<HttpFetcher>) -> Self {
        Self {
            source: Arc::new(source),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Find D3.js modules by keyword. Without a query, lists every module with its page count. With a query, returns the 5 best matches.",
        input_schema = tool_input_schema::<FindModuleRequest>()
    )]
    async fn find_module(&self, Parameters(request): Parameters<FindModuleRequest>) -> std::result::Result<String, String> {
        Ok(handle_find_module(request))
    }

    #[tool(
        description = "Get D3.js API documentation. Provide module_name (e.g. \"d3-scale\" or \"scale\") for the overview, and optionally page (e.g. \"linear\") for a specific sub-page.",
        input_schema = tool_input_schema::<GetDocsRequest>()
    )]
    async fn get_docs(&self, Parameters(request): Parameters<GetDocsRequest>) -> std::result::Result<String, String> {
        handle_get_docs(&self.source, request).await
    }

    #[tool(
        description = "Search D3.js documentation pages for sections about a topic or method. Optionally restrict to one module with module_name.",
        input_schema = tool_input_schema::<SearchDocsRequest>()
    )]
    async fn search_docs(&self, Parameters(request): Parameters<SearchDocsRequest>) -> std::result::Result<String, String> {
        handle_search_docs(&self.source, request).await
    }

    #[tool(
        description = "Find D3.js examples from the Observable gallery. Without arguments, lists categories with counts. With category, lists that category. With query, returns the 10 best matches.",
        input_schema = tool_input_schema::<FindExampleRequest>()
    )]
    async fn find_example(&self, Parameters(request): Parameters<FindExampleRequest>) -> std::result::Result<String, String> {
        handle_find_example(&self.source, request).await
    }

    #[tool(
        description = "Get the chart source code of a D3.js gallery example, with its description, imported helpers and data files. Provide the path from find_example, e.g. \"@d3/bar-chart/2\".",
        input_schema = tool_input_schema::<GetExampleRequest>()
    )]
    async fn get_example(&self, Parameters(request): Parameters<GetExampleRequest>) -> std::result::Result<String, String> {
        handle_get_example(&self.source, request).await
    }

    #[tool(
        description = "Get a raw documentation page from d3js.org by path, e.g. \"d3-scale/linear\" or \"d3-docs://d3-axis\".",
        input_schema = tool_input_schema::<GetPageRequest>()
    )]
    async fn get_page(&self, Parameters(request): Parameters<GetPageRequest>) -> std::result::Result<String, String> {
        handle_get_page(&self.source, request).await
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "d3-docs-mcp: D3.js API documentation from d3js.org and example code from the \
                 Observable gallery. Start with find_module or search_docs, read pages with \
                 get_docs, and browse examples with find_example and get_example. \
                 Content is cached on disk for 24 hours."
                    .to_string(),
            )
    }
}
