//! Tournament REST surface (admin dashboard and contact form)

mod service;

pub use service::{
    payload_operation, team_status_operation, TournamentClient, TournamentClientError, CONTACT_MESSAGE_OPERATION,
    CREATE_MATCH_OPERATION,
};
