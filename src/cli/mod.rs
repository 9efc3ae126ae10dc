//! Command-line entry points
//!
//! - `serve`: run the HTTP API (default)
//! - `warm-cache`: populate the list cache for every supported language once

pub mod serve;
pub mod warm;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Multilingual FAQ service
#[derive(Parser)]
#[command(name = "faq-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Warm the list cache for every supported language and exit
    WarmCache,
}

/// Loads `.env`, the layered configuration and the global subscriber
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}
