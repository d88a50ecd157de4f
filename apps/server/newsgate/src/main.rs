use newsgate::error::NewsgateError;
use newsgate::logger::initialize as LoggerInitialize;
use newsgate::server::serve;

use news_core::GatewayConfig;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;

use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Newsgate stopped: {e}");
            eprintln!("newsgate: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), NewsgateError> {
    let config = GatewayConfig::load()?;

    create_dir_all(&config.log_dir).map_err(|e| NewsgateError::Startup {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&config.log_dir, config.log_level_filter())?;

    info!("Newsgate starting");
    info!("Log directory: {}", config.log_dir.display());
    info!("Gateway config: {}", config.summary());

    serve(&config).await
}
