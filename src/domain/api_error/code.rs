//! Machine-readable error codes

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error code surfaced to callers for branching
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    ValidationError,
    NetworkError,
    Timeout,
    Cancelled,
    /// Transport error with a status but no structured body
    Http(u16),
    UnknownError,
    /// Any other code reported verbatim by the backend
    Backend(String),
}

impl ApiErrorCode {
    pub fn as_string(&self) -> String {
        match self {
            Self::ValidationError => "VALIDATION_ERROR".to_string(),
            Self::NetworkError => "NETWORK_ERROR".to_string(),
            Self::Timeout => "TIMEOUT".to_string(),
            Self::Cancelled => "CANCELLED".to_string(),
            Self::Http(status) => format!("HTTP_{}", status),
            Self::UnknownError => "UNKNOWN_ERROR".to_string(),
            Self::Backend(code) => code.clone(),
        }
    }

    /// Parses a code string; unrecognised codes are kept as backend codes
    pub fn parse(code: &str) -> Self {
        match code {
            "VALIDATION_ERROR" => Self::ValidationError,
            "NETWORK_ERROR" => Self::NetworkError,
            "TIMEOUT" => Self::Timeout,
            "CANCELLED" => Self::Cancelled,
            "UNKNOWN_ERROR" => Self::UnknownError,
            other => other
                .strip_prefix("HTTP_")
                .and_then(|status| status.parse().ok())
                .map(Self::Http)
                .unwrap_or_else(|| Self::Backend(other.to_string())),
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl Serialize for ApiErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for ApiErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::parse(&code))
    }
}
