//! Documentation gateway (v1)
//!
//! A small TLS gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌────────────────────────────────────────────────┐
//!                   │                 DOCS GATEWAY                    │
//!   Client (TLS)    │  ┌──────────┐   ┌────────────┐   ┌──────────┐  │
//!   ────────────────┼─▶│ listener │──▶│  pipeline  │──▶│  router  │  │
//!                   │  │  + tls   │   │ version+log│   └────┬─────┘  │
//!                   │  └──────────┘   └────────────┘        │        │
//!                   │             ┌─────────────────────────┴──┐     │
//!                   │             ▼                            ▼     │
//!                   │      ┌─────────────┐             ┌───────────┐ │
//!                   │      │   health    │             │   proxy   │ │
//!                   │      │ feed → 204  │             │ + copier  │ │
//!                   │      └──────┬──────┘             └─────┬─────┘ │
//!                   └─────────────┼──────────────────────────┼───────┘
//!                                 ▼                          ▼
//!                         RSS status feed            documentation page
//! ```

use std::path::PathBuf;

use clap::Parser;

use docs_gateway::config::resolve_config;
use docs_gateway::lifecycle;
use docs_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "docs-gateway", version)]
#[command(about = "TLS gateway for a documentation page with a status-feed health check", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref())?;

    if cli.check {
        println!("configuration OK");
        return Ok(());
    }

    init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "docs-gateway starting");

    lifecycle::run(config).await
}
