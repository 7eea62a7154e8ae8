//! Tournament API client
//!
//! Typed calls for the admin dashboard and the contact form. Mutating calls carry an
//! idempotency key per operation and payload, resolved and cleared the same way
//! registrations are.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    parse_api_error, validate_contact_message, ApiError, ContactMessage, DomainError, Match,
    NewMatch, TeamStatus, TeamStatusUpdate, TeamSummary, TransportFailure,
};
use crate::infrastructure::http::{AbortSignal, ApiRequest, ResilientClient};
use crate::infrastructure::idempotency::{generate_idempotency_key, SharedKeyStore};

pub const CREATE_MATCH_OPERATION: &str = "create_match";
pub const CONTACT_MESSAGE_OPERATION: &str = "contact_message";

/// Operation name for a team's status change
pub fn team_status_operation(team_id: &str) -> String {
    format!("team_status_{}", team_id)
}

/// Key-store operation for one mutation: the operation name plus a short digest of the
/// serialized body, so a different payload never reuses a key kept from a failed call.
pub fn payload_operation(operation: &str, payload: &serde_json::Value) -> String {
    let digest = Sha256::digest(payload.to_string().as_bytes());
    format!("{}_{}", operation, &hex::encode(digest)[..16])
}

#[derive(Debug, Error)]
pub enum TournamentClientError {
    /// Rejected locally, nothing was sent
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct TournamentClient {
    client: ResilientClient,
    keys: SharedKeyStore,
    admin_token: Option<String>,
}

impl TournamentClient {
    pub fn new(client: ResilientClient, keys: SharedKeyStore) -> Self {
        Self {
            client,
            keys,
            admin_token: None,
        }
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    fn admin(&self, request: ApiRequest) -> ApiRequest {
        match &self.admin_token {
            Some(token) => request.with_bearer_token(token),
            None => request,
        }
    }

    /// Teams for the admin dashboard, optionally filtered by review status
    pub async fn list_teams(
        &self,
        status: Option<TeamStatus>,
        signal: &AbortSignal,
    ) -> Result<Vec<TeamSummary>, TournamentClientError> {
        let mut request = self.admin(ApiRequest::get("/admin/teams"));
        if let Some(status) = status {
            request = request.with_query("status", status.to_string());
        }

        Ok(self.client.execute_json(&request, signal).await?)
    }

    /// Approve or reject a team
    pub async fn update_team_status(
        &self,
        team_id: &str,
        update: &TeamStatusUpdate,
        signal: &AbortSignal,
    ) -> Result<TeamSummary, TournamentClientError> {
        if team_id.trim().is_empty() {
            return Err(DomainError::validation("Team id is required").into());
        }

        let request = self.admin(ApiRequest::patch(format!("/admin/teams/{}/status", team_id)));
        let team = self
            .send_idempotent(&team_status_operation(team_id), request, update, signal)
            .await?;

        info!(team_id = %team_id, status = %update.status, "Team status updated");
        Ok(team)
    }

    pub async fn list_matches(&self, signal: &AbortSignal) -> Result<Vec<Match>, TournamentClientError> {
        Ok(self
            .client
            .execute_json(&ApiRequest::get("/matches"), signal)
            .await?)
    }

    /// Schedule a new fixture
    pub async fn create_match(
        &self,
        new_match: &NewMatch,
        signal: &AbortSignal,
    ) -> Result<Match, TournamentClientError> {
        new_match.validate()?;

        let request = self.admin(ApiRequest::post("/admin/matches"));
        let created: Match = self
            .send_idempotent(CREATE_MATCH_OPERATION, request, new_match, signal)
            .await?;

        info!(match_id = %created.id, "Match created");
        Ok(created)
    }

    pub async fn submit_contact_message(
        &self,
        contact: &ContactMessage,
        signal: &AbortSignal,
    ) -> Result<(), TournamentClientError> {
        validate_contact_message(contact)?;

        let _: serde_json::Value = self
            .send_idempotent(
                CONTACT_MESSAGE_OPERATION,
                ApiRequest::post("/contact"),
                contact,
                signal,
            )
            .await?;

        Ok(())
    }

    async fn send_idempotent<B, T>(
        &self,
        operation: &str,
        request: ApiRequest,
        body: &B,
        signal: &AbortSignal,
    ) -> Result<T, TournamentClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_value(body).map_err(DomainError::from)?;
        let operation = payload_operation(operation, &payload);

        let key = match self.keys.resolve_idempotency_key(&operation) {
            Ok(key) => key,
            Err(e) => {
                warn!(operation = %operation, error = %e, "Could not persist idempotency key");
                generate_idempotency_key()
            }
        };

        let request = request.with_idempotency_key(&key).with_json(payload);
        let response = self
            .client
            .execute_with_retry(&request, signal, self.client.retry_policy())
            .await?;

        // Keep the key when the body is unreadable; a resend must dedupe.
        let decoded = response.json().map_err(|e| {
            warn!(operation = %operation, error = %e, "Unreadable response, keeping idempotency key");
            TournamentClientError::Api(parse_api_error(TransportFailure::Error {
                message: format!("Failed to parse response: {}", e),
            }))
        })?;

        if let Err(e) = self.keys.clear_idempotency_key(&operation) {
            warn!(operation = %operation, error = %e, "Failed to clear idempotency key");
        }

        Ok(decoded)
    }
}
