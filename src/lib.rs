//! Cricket tournament registration client
//!
//! Client-side submission reliability for the tournament website:
//! - File validation of registration documents before upload
//! - Per-operation idempotency keys that survive retries and restarts
//! - A resilient API client with timeouts, cancellation and bounded retries
//! - Team registration and admin/contact calls built on top of it

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::DomainError;
use infrastructure::http::{ResilientClient, RetryPolicy, ReqwestTransport};
use infrastructure::idempotency::{IdempotencyKeyStore, SharedKeyStore};
use infrastructure::kv_store::KvStoreFactory;
use infrastructure::registration::RegistrationService;
use infrastructure::tournament::TournamentClient;
use tracing::info;

/// Services wired from configuration
#[derive(Debug, Clone)]
pub struct ClientState {
    pub keys: SharedKeyStore,
    pub client: ResilientClient,
    pub registration: RegistrationService,
    pub tournament: TournamentClient,
}

/// Create the client state with default configuration
pub fn create_client_state() -> Result<ClientState, DomainError> {
    create_client_state_with_config(&AppConfig::default())
}

/// Create the client state with custom configuration
pub fn create_client_state_with_config(config: &AppConfig) -> Result<ClientState, DomainError> {
    let store = KvStoreFactory::new().create(&config.storage)?;
    info!(store_type = %config.storage.store_type, "Key-value store ready");

    let keys: SharedKeyStore = IdempotencyKeyStore::from_config(store, &config.idempotency);

    let transport = Arc::new(ReqwestTransport::new(&config.api.base_url)?);
    let client = ResilientClient::new(transport)
        .with_request_timeout(config.api.request_timeout())
        .with_retry_policy(RetryPolicy::from(&config.retry));

    let registration =
        RegistrationService::new(client.clone(), keys.clone(), config.upload.clone());
    let tournament = TournamentClient::new(client.clone(), keys.clone())
        .with_admin_token(config.api.admin_token.clone());

    Ok(ClientState {
        keys,
        client,
        registration,
        tournament,
    })
}
