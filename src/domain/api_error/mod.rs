//! API error domain - Normalised classification of every failed remote call

mod classification;
mod code;
mod failure;

pub use classification::{parse_api_error, ApiError, GENERIC_ERROR_MESSAGE};
pub use code::ApiErrorCode;
pub use failure::{BackendErrorBody, TransportFailure};
