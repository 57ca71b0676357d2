//! # algocat CLI Module
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `status` - Show catalog counts (default)
//! - `validate` - Load the catalog and print the load report
//! - `show` - Print one record
//! - `query` - Filter and page through records
//! - `fixtures` - Print the fixture bundle of a record
//! - `categories` - List categories with counts
//! - `export` - Write the canonical export
//! - `hash` - Print the catalog fingerprint

mod commands;

use crate::config::Config;
use algocat_core::CatalogError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// algocat - algorithm topic catalog
///
/// Validates, indexes and serves a static catalog of algorithm topics.
#[derive(Parser, Debug)]
#[command(name = "algocat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the catalog JSON file
    #[arg(short = 'c', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Path to a TOML config file (default: algocat.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show catalog status
    Status,

    /// Load the catalog and report rejected records and warnings
    Validate,

    /// Print one record
    Show {
        /// Record id
        id: String,
    },

    /// Filter and page through records
    Query {
        #[arg(long)]
        category: Option<String>,

        /// easy, intermediate, advance or MandatoryTODO
        #[arg(short, long)]
        difficulty: Option<String>,

        /// coreAlgo, blind75 or core+Blind75
        #[arg(short = 'l', long)]
        list_type: Option<String>,

        /// Company tag (case-insensitive)
        #[arg(short, long)]
        tag: Option<String>,

        /// Text matched against title and problem statement
        #[arg(long)]
        q: Option<String>,

        #[arg(long, default_value = "0")]
        offset: usize,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Print the fixture bundle of a record
    Fixtures {
        /// Record id
        id: String,
    },

    /// List categories with record counts
    Categories,

    /// Write the canonical export
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print checksum and BLAKE3 digest of the canonical export
    Hash,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve settings from config file, environment and flags.
pub fn resolve_config(cli: &Cli) -> Result<Config, CatalogError> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    if let Some(catalog) = &cli.catalog {
        config.catalog.path.clone_from(catalog);
    }
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<ExitCode, CatalogError> {
    let mut config = resolve_config(&cli)?;
    let json_mode = cli.json_mode;
    let verbose = cli.verbose;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_serve(&config).await?;
        }
        Some(Commands::Validate) => return cmd_validate(&config, json_mode, verbose),
        Some(Commands::Show { id }) => cmd_show(&config, json_mode, &id)?,
        Some(Commands::Query {
            category,
            difficulty,
            list_type,
            tag,
            q,
            offset,
            limit,
        }) => {
            let filter = algocat_core::CatalogFilter {
                category,
                difficulty,
                list_type,
                tag,
                text: q,
            };
            cmd_query(
                &config,
                json_mode,
                &filter,
                algocat_core::Pagination::new(offset, limit),
            )?;
        }
        Some(Commands::Fixtures { id }) => cmd_fixtures(&config, &id)?,
        Some(Commands::Categories) => cmd_categories(&config, json_mode)?,
        Some(Commands::Export { output }) => cmd_export(&config, &output)?,
        Some(Commands::Hash) => cmd_hash(&config, json_mode)?,
        Some(Commands::Status) | None => cmd_status(&config, json_mode)?,
    }
    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// TESTS
// =============================================================================
