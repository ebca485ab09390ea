//! Error types for songseek.

use thiserror::Error;

/// Result type alias using songseek's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for songseek.
#[derive(Error, Debug)]
pub enum Error {
    /// A required identifier or query was not supplied. No upstream call is made.
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    // Upstream errors
    #[error("Upstream {provider} unavailable: {source}")]
    UpstreamUnavailable {
        provider: String,
        #[source]
        source: HttpError,
    },

    #[error("Upstream {provider} returned a malformed payload: {reason}")]
    UpstreamMalformed { provider: String, reason: String },

    #[error("No playable variant for {id} on {provider} after {attempts} attempts")]
    NoPlayableVariant {
        provider: String,
        id: String,
        attempts: usize,
    },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP-specific errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed with status {status}: {message}")]
    StatusError { status: u16, message: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl Error {
    pub fn unavailable(provider: impl Into<String>, source: HttpError) -> Self {
        Self::UpstreamUnavailable {
            provider: provider.into(),
            source,
        }
    }

    pub fn malformed(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpstreamMalformed {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error originated from talking to a backend.
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. }
                | Self::UpstreamMalformed { .. }
                | Self::NoPlayableVariant { .. }
        )
    }

    /// Returns true if the caller omitted a required input.
    pub const fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput(_))
    }

    /// Returns true if this is a transport timeout.
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable {
                source: HttpError::Timeout,
                ..
            }
        )
    }
}
