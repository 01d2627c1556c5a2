//! Unified error types for the tubenote client stack.
//!
//! Application failures carry the service's published error codes:
//! - E001-E002: video source errors
//! - E006-E007: session lifecycle errors
//! - E008, E010: upstream/configuration errors
//! - E009: lookup misses
//! - E999: unclassified failures

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes the service reports in response envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// E001: submitted URL is not a valid video URL
    InvalidVideoUrl,
    /// E002: transcript missing or disabled for the video
    TranscriptUnavailable,
    /// E006: session exists but has expired
    SessionExpired,
    /// E007: server-side session storage failed
    SessionStorage,
    /// E008: upstream service call failed
    UpstreamFailure,
    /// E009: video or session not found
    NotFound,
    /// E010: required service configuration missing
    ConfigMissing,
    /// E999: unclassified server error
    Unclassified,
    /// Code outside the published table, preserved verbatim.
    Other(String),
}

impl ApiErrorCode {
    /// Parse a wire error code.
    pub fn parse(code: &str) -> Self {
        match code {
            "E001" => Self::InvalidVideoUrl,
            "E002" => Self::TranscriptUnavailable,
            "E006" => Self::SessionExpired,
            "E007" => Self::SessionStorage,
            "E008" => Self::UpstreamFailure,
            "E009" => Self::NotFound,
            "E010" => Self::ConfigMissing,
            "E999" => Self::Unclassified,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the wire code string.
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidVideoUrl => "E001",
            Self::TranscriptUnavailable => "E002",
            Self::SessionExpired => "E006",
            Self::SessionStorage => "E007",
            Self::UpstreamFailure => "E008",
            Self::NotFound => "E009",
            Self::ConfigMissing => "E010",
            Self::Unclassified => "E999",
            Self::Other(code) => code,
        }
    }

    /// Get the HTTP status the service pairs with this code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidVideoUrl => 400,
            Self::TranscriptUnavailable => 404,
            Self::SessionExpired => 410,
            Self::SessionStorage => 500,
            Self::UpstreamFailure => 502,
            Self::NotFound => 404,
            Self::ConfigMissing => 500,
            Self::Unclassified => 500,
            Self::Other(_) => 500,
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Unified error type for the tubenote client stack.
#[derive(Debug, Error)]
pub enum Error {
    /// Coded application error reported by the service.
    #[error("[{code}] {message}")]
    Api {
        code: ApiErrorCode,
        message: String,
        http_status: u16,
    },

    /// Session lookup miss, surfaced as its own kind.
    #[error("session '{session_id}' not found")]
    SessionNotFound { session_id: String },

    /// Session exists but its expiry has passed.
    #[error("session '{session_id}' has expired")]
    SessionExpired { session_id: String },

    /// Network-level failure before an envelope could be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body was not a valid envelope.
    #[error("invalid response: {0}")]
    Decode(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a coded API error.
    pub fn api(code: ApiErrorCode, msg: impl Into<String>) -> Self {
        let http_status = code.http_status();
        Self::Api {
            code,
            message: msg.into(),
            http_status,
        }
    }

    /// Create a coded API error with the observed HTTP status.
    pub fn api_with_status(code: ApiErrorCode, msg: impl Into<String>, http_status: u16) -> Self {
        Self::Api {
            code,
            message: msg.into(),
            http_status,
        }
    }

    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::SessionNotFound {
            session_id: session_id.into(),
        }
    }

    pub fn session_expired(session_id: impl Into<String>) -> Self {
        Self::SessionExpired {
            session_id: session_id.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&ApiErrorCode> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
