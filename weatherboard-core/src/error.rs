use serde::{Deserialize, Serialize};

use crate::location::LocationError;

/// Failure of a provider query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Location query must not be empty")]
    InvalidQuery,
    #[error("Location not found: {0}")]
    NotFound(String),
    #[error("Provider rejected the API key: {0}")]
    Credential(String),
    #[error("Provider rate limit exceeded")]
    RateLimited,
    #[error("Provider request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidQuery => ErrorKind::InvalidQuery,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Credential(_) => ErrorKind::Credential,
            Self::Transport(_) => ErrorKind::Transport,
            Self::RateLimited | Self::Status { .. } | Self::Parse(_) => ErrorKind::Provider,
        }
    }
}

/// Coarse failure category, exposed so presentation can discriminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    LocationUnavailable,
    LocationDenied,
    InvalidQuery,
    NotFound,
    Credential,
    Transport,
    Provider,
}

/// The error indicator carried by a session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SessionError {
    /// Map a failed query to its user-facing message. Name lookups keep the
    /// single "not found or bad key" wording; the kind still tells them apart.
    pub fn from_query(err: &QueryError, by_name: bool) -> Self {
        let kind = err.kind();
        let message = match kind {
            ErrorKind::InvalidQuery => "Please enter a city name.",
            ErrorKind::NotFound | ErrorKind::Credential if by_name => {
                "City not found or invalid API key."
            }
            ErrorKind::Credential => "Invalid API key.",
            ErrorKind::Transport => "Unable to reach the weather service.",
            _ => "Unable to fetch weather data.",
        };
        Self { kind, message: message.to_string() }
    }

    pub fn from_location(err: &LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => Self {
                kind: ErrorKind::LocationDenied,
                message: "Geolocation permission denied.".to_string(),
            },
            LocationError::Unavailable | LocationError::Other(_) => Self {
                kind: ErrorKind::LocationUnavailable,
                message: "Geolocation is not available.".to_string(),
            },
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
