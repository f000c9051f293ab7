//! component-mpa - multi-page application mode for Component
//!
//! Rewrites a host build configuration so that every page under the pages
//! directory becomes its own entry with its own HTML document.
//!
//! # Features
//! - Flat or recursive page discovery
//! - Polyfill and hot reload client injection
//! - Per-page templates and chunk lists
//! - Shared vendors chunk
//! - Interactive entry selection in development

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use component_mpa::Cli;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("component_mpa=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("component_mpa=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute().await
}
