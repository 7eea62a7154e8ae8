//! CLI module for the registration client
//!
//! Provides subcommands for working with the tournament backend:
//! - `submit`: register a team with its documents
//! - `validate-file`: check a document against the upload policy
//! - `keys`: inspect or clear stored idempotency keys
//! - `teams` / `matches`: admin listings

pub mod admin;
pub mod keys;
pub mod submit;
pub mod validate;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::infrastructure::http::AbortController;
use crate::infrastructure::logging;

/// Cricket tournament registration client
#[derive(Parser)]
#[command(name = "cricket-registration")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit a team registration with its documents
    Submit(submit::SubmitArgs),

    /// Validate a file against the upload policy without sending it
    ValidateFile(validate::ValidateFileArgs),

    /// Manage stored idempotency keys
    Keys {
        #[command(subcommand)]
        action: keys::KeysAction,
    },

    /// List registered teams (admin)
    Teams(admin::TeamsArgs),

    /// List scheduled matches
    Matches,
}

/// Load `.env` and configuration, then initialise logging
pub fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let loaded = AppConfig::load();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };
    logging::init_logging(&config.logging);

    or_default_config(loaded)
}

/// Fall back to defaults on a broken configuration, logging why
///
/// The default key store is in-memory, so the warning is the only sign that pending
/// keys will not survive this run.
fn or_default_config(loaded: Result<AppConfig, ::config::ConfigError>) -> AppConfig {
    loaded.unwrap_or_else(|e| {
        warn!(
            error = %e,
            "Invalid configuration, falling back to defaults (in-memory key store)"
        );
        AppConfig::default()
    })
}

/// Cancel `controller` when Ctrl+C is pressed
pub fn cancel_on_ctrl_c(controller: AbortController) {
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, cancelling request");
            controller.cancel();
        }
    });
}
