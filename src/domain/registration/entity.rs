//! Registration form entity

use serde::{Deserialize, Serialize};

/// Tournament category a team enters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamCategory {
    #[default]
    Open,
    Corporate,
    Under19,
    Women,
}

impl std::fmt::Display for TeamCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Corporate => write!(f, "corporate"),
            Self::Under19 => write!(f, "under_19"),
            Self::Women => write!(f, "women"),
        }
    }
}

/// Playing role of a squad member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    #[default]
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

/// A squad member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub role: PlayerRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u16>,
}

impl Player {
    pub fn new(name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            name: name.into(),
            role,
            jersey_number: None,
        }
    }

    pub fn with_jersey_number(mut self, number: u16) -> Self {
        self.jersey_number = Some(number);
        self
    }
}

/// Data collected by the multi-step registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub team_name: String,
    pub captain_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub category: TeamCategory,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl RegistrationForm {
    pub fn new(
        team_name: impl Into<String>,
        captain_name: impl Into<String>,
        contact_email: impl Into<String>,
        contact_phone: impl Into<String>,
    ) -> Self {
        Self {
            team_name: team_name.into(),
            captain_name: captain_name.into(),
            contact_email: contact_email.into(),
            contact_phone: contact_phone.into(),
            city: String::new(),
            category: TeamCategory::default(),
            players: Vec::new(),
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_category(mut self, category: TeamCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_players(mut self, players: impl IntoIterator<Item = Player>) -> Self {
        self.players.extend(players);
        self
    }
}
