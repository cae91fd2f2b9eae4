//! TrackShip library root.
//! Daily red-zone vessel passage counter with an EuRIS proxy for the
//! browser map client. Exposes the CLI parser, the high-level run()
//! function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod euris;
pub mod http;

use clap::Parser;
use cli::Cli;
use config::Config;
use errors::AppResult;
use tracing_subscriber::{EnvFilter, fmt};

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let mut cfg = Config::load();

    // CLI flags win over environment variables.
    if let Some(db) = cli.db {
        cfg.database = db;
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    if let Some(bind) = cli.bind {
        cfg.bind = bind;
    }

    http::serve(cfg).await
}
