use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xliff_lsp_core::XliffConfig;

/// Language server for XLIFF translation files, speaking LSP over stdio.
#[derive(Parser)]
#[command(name = "xliff-lsp", version, about)]
struct Cli {
    /// TOML settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xliff=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => XliffConfig::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => XliffConfig::default(),
    }
    .with_env_overrides();

    tracing::info!(
        translation_memory = %config.translation_memory.base_url,
        "starting XLIFF language server"
    );
    xliff_lsp::run_server(config).await
}
