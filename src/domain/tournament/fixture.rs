//! Match fixtures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
    Abandoned,
}

/// Scheduled or played match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub venue: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Fixture to be created by an admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub home_team_id: String,
    pub away_team_id: String,
    pub venue: String,
    pub scheduled_at: DateTime<Utc>,
}

impl NewMatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.home_team_id.trim().is_empty() || self.away_team_id.trim().is_empty() {
            return Err(DomainError::validation("Both teams are required"));
        }

        if self.home_team_id == self.away_team_id {
            return Err(DomainError::validation("A team cannot play itself"));
        }

        if self.venue.trim().is_empty() {
            return Err(DomainError::validation("Venue is required"));
        }

        Ok(())
    }
}
