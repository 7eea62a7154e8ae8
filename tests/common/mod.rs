#![allow(dead_code)]

use bytes::Bytes;
use cricket_registration_client::domain::{
    Player, PlayerRole, RegistrationDocuments, RegistrationForm, UploadFile,
};
use cricket_registration_client::AppConfig;

/// Configuration pointing at a mock backend with fast retries
pub fn config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.request_timeout_ms = 2_000;
    config.retry.initial_backoff_ms = 10;
    config.retry.max_backoff_ms = 50;
    config
}

pub fn form() -> RegistrationForm {
    RegistrationForm::new(
        "Riverside Strikers",
        "Arjun Kumar",
        "captain@riverside.example",
        "+919876543210",
    )
    .with_city("Pune")
    .with_players((1..=12).map(|n| {
        Player::new(format!("Player {}", n), PlayerRole::Batsman).with_jersey_number(n)
    }))
}

pub fn documents() -> RegistrationDocuments {
    RegistrationDocuments::new(
        UploadFile::new("receipt.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.7 receipt")),
        UploadFile::new("id.jpg", "image/jpeg", Bytes::from_static(b"\xff\xd8\xff id")),
    )
}

pub fn receipt_body() -> serde_json::Value {
    serde_json::json!({
        "registration_id": "reg-1001",
        "status": "pending_review",
        "message": "Registration received"
    })
}
