//! # Inkwell
//!
//! Command-line editor for Inkwell blog posts.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod edit;
mod session;
mod telemetry;

use cli::Cli;
use config::AppConfig;
use telemetry::{TelemetryConfig, init_telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    tracing::debug!(base_url = %config.http.base_url, "Starting Inkwell");

    commands::run(cli, config).await
}
