//! Demo server entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_metadata` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Serving the demo metadata endpoint
//!
//! All core functionality is implemented in the library crate.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use link_metadata::config::Opt;
use link_metadata::initialization::init_logger_with;
use link_metadata::server::start_demo_server;
use link_metadata::{Config, MetadataResolver};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = Config::from(&opt);
    let resolver =
        MetadataResolver::new(config).context("Failed to initialize metadata resolver")?;

    start_demo_server(&opt.bind, Arc::new(resolver))
        .await
        .context("Demo server stopped")
}
