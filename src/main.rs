//! Task API (v0.1)
//!
//! Accepts task-creation requests, has each task enriched by a separate
//! worker service and keeps the enriched tasks in memory.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                    TASK API                      │
//!                        │                                                  │
//!     Client Request     │  ┌─────────┐    ┌────────────┐    ┌──────────┐   │
//!     ───────────────────┼─▶│  http   │───▶│   trace    │───▶│ handlers │   │
//!                        │  │ server  │    │ middleware │    │          │   │
//!                        │  └─────────┘    └────────────┘    └────┬─────┘   │
//!                        │                                        │         │
//!                        │                 ┌────────────┐         │         │
//!                        │                 │ enrichment │◀────────┤         │
//!                        │                 │   client   │─────────┼─────────┼──▶ Worker
//!                        │                 └────────────┘         │         │    /enrich
//!                        │                                        ▼         │
//!     Client Response    │                                 ┌──────────┐     │
//!     ◀──────────────────┼─────────────────────────────────│  store   │     │
//!                        │                                 └──────────┘     │
//!                        │                                                  │
//!                        │  ┌────────────────────────────────────────────┐  │
//!                        │  │           Cross-Cutting Concerns            │  │
//!                        │  │  config │ observability │ resilience │ life │  │──▶ Collector
//!                        │  └────────────────────────────────────────────┘  │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use task_api::config::load_config;
use task_api::lifecycle::startup;

#[derive(Parser)]
#[command(name = "task-api")]
#[command(about = "Task API with worker-side enrichment", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
