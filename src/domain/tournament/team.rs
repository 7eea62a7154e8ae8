//! Registered team as seen by the admin dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::registration::TeamCategory;

/// Review state of a registered team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for TeamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!(
                "Unknown team status: {}. Valid statuses: pending, approved, rejected",
                s
            )),
        }
    }
}

/// Team row in the admin listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: String,
    pub team_name: String,
    pub captain_name: String,
    #[serde(default)]
    pub category: TeamCategory,
    #[serde(default)]
    pub status: TeamStatus,
    #[serde(default)]
    pub player_count: u32,
    pub registered_at: DateTime<Utc>,
}

/// Review decision sent by an admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatusUpdate {
    pub status: TeamStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
