use clap::{Parser, Subcommand};
use d3_docs_mcp::tracing::{LogFormat, init};
use d3_docs_mcp::{Config, DocSource, DocsServer, HttpFetcher, registry, sync};
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "d3-docs-mcp")]
#[command(
    about = "Serve D3.js documentation and gallery examples to AI assistants over MCP",
    long_about = None
)]
struct Cli {
    /// TOML config file (also read from D3_DOCS_MCP_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the MCP server on stdio (default)
    Serve,
    /// Compare the built-in module registry against the live d3js.org sidebar
    Sync,
    /// Print the cache directory in use
    CachePath,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init(cli.log_format);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Sync => drift(config).await,
        Command::CachePath => {
            println!("{}", config.cache_dir.display());
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting d3-docs-mcp, caching under {}", config.cache_dir.display());

    let fetcher = HttpFetcher::new(config.timeout)?;
    let server = DocsServer::new(DocSource::from_config(&config, fetcher));
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}

async fn drift(config: Config) -> anyhow::Result<()> {
    tracing::info!("Fetching live registry from {}/api", config.docs_base_url);

    let fetcher = HttpFetcher::new(config.timeout)?;
    let live = sync::fetch_live_registry(&fetcher, &config.docs_base_url).await?;
    let report = sync::diff_registry(&live, registry::MODULES);
    println!("{}", report);
    Ok(())
}
