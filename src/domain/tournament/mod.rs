//! Tournament domain - Teams, fixtures and contact messages exchanged with the backend

mod contact;
mod fixture;
mod team;

pub use contact::{validate_contact_message, ContactMessage};
pub use fixture::{Match, MatchStatus, NewMatch};
pub use team::{TeamStatus, TeamStatusUpdate, TeamSummary};
