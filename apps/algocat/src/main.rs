//! # algocat
//!
//! Server and command-line front end for the algorithm topic catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  apps/algocat (THE BINARY)               │
//! │                                                          │
//! │   ┌─────────────┐   ┌─────────────┐   ┌──────────────┐   │
//! │   │    CLI      │   │  HTTP API   │   │    Config    │   │
//! │   │   (clap)    │   │   (axum)    │   │ (toml + env) │   │
//! │   └──────┬──────┘   └──────┬──────┘   └──────┬───────┘   │
//! │          └─────────────────┼─────────────────┘           │
//! │                            ▼                             │
//! │                    ┌───────────────┐                     │
//! │                    │ algocat-core  │                     │
//! │                    │  (THE LOGIC)  │                     │
//! │                    └───────────────┘                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! algocat --catalog data/catalog.json serve --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! algocat validate
//! algocat query --category Graphs --difficulty intermediate
//! algocat show two-pointers
//! ```

use algocat::cli;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    // ALGOCAT_LOG_FORMAT=json switches to JSON lines.
    let log_format = std::env::var("ALGOCAT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "algocat=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    match cli::execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
   __ _| | __ _  ___   ___ __ _| |_
  / _` | |/ _` |/ _ \ / __/ _` | __|
 | (_| | | (_| | (_) | (_| (_| | |_
  \__,_|_|\__, |\___/ \___\__,_|\__|
          |___/

  Algorithm Catalog v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
