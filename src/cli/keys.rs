//! Keys command - inspects and clears stored idempotency keys

use clap::Subcommand;

#[derive(Subcommand, Clone)]
pub enum KeysAction {
    /// List stored keys with their age and state
    List,

    /// Remove expired and unreadable keys
    ClearExpired,

    /// Remove every stored key
    ClearAll,
}

pub async fn run(action: KeysAction) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let state = crate::create_client_state_with_config(&config)?;

    match action {
        KeysAction::List => {
            let entries = state.keys.list()?;
            if entries.is_empty() {
                println!("No idempotency keys stored");
            }

            for entry in entries {
                let state_label = match (&entry.record, entry.expired) {
                    (None, _) => "corrupt",
                    (Some(_), true) => "expired",
                    (Some(_), false) => "live",
                };
                let created = entry
                    .record
                    .as_ref()
                    .and_then(|r| r.created())
                    .map(|c| c.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string());
                let key = entry.record.as_ref().map(|r| r.key.as_str()).unwrap_or("-");

                println!("{}\t{}\t{}\t{}", entry.operation, state_label, created, key);
            }
        }
        KeysAction::ClearExpired => {
            let removed = state.keys.clear_expired_idempotency_keys()?;
            println!("Removed {} expired keys", removed);
        }
        KeysAction::ClearAll => {
            let removed = state.keys.clear_all_idempotency_keys()?;
            println!("Removed {} keys", removed);
        }
    }

    Ok(())
}
