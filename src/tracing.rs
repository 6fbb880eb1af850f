//! Tracing initialization.
//!
//! Log output always goes to stderr: stdout carries the MCP JSON-RPC stream.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Line format for log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

fn is_test_run() -> bool {
    std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok()
}

/// Initialize tracing. Safe to call multiple times; only the first call wins.
pub fn init(format: LogFormat) {
    INIT.call_once(|| {
        let is_test = is_test_run();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true);

        let result = match (format, is_test) {
            (_, true) => builder.with_test_writer().compact().finish().try_init(),
            (LogFormat::Compact, false) => builder
                .with_writer(std::io::stderr)
                .compact()
                .finish()
                .try_init(),
            (LogFormat::Json, false) => builder
                .with_writer(std::io::stderr)
                .json()
                .finish()
                .try_init(),
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
