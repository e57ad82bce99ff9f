// File: services/slotbook_cli/src/main.rs
use slotbook_common::{log_result, logging, SlotbookError};
use slotbook_config::load_config;
use std::env;
use tracing::{info, warn};

mod app_state;
mod commands;

use app_state::AppState;
use commands::Command;

async fn run() -> Result<(), SlotbookError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = log_result(load_config(), "Configuration loaded", "Failed to load config")?;
    let state = AppState::new(config)?;
    info!("Using booking backend at {}", state.config.api.base_url);

    let token = state.token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling pending request");
            token.cancel();
        }
    });

    commands::run(command, &state).await
}

#[tokio::main]
async fn main() {
    logging::init_with_level(tracing::Level::WARN);

    if let Err(err) = run().await {
        logging::log_error(&err, "slotbook failed");
        if let SlotbookError::ParseError(message) = &err {
            eprintln!("{message}");
        }
        std::process::exit(1);
    }
}
