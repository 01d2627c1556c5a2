//! Wire types for the `/api/v1` surface.
//!
//! Every endpoint wraps its payload in [`Envelope`]; [`Envelope::into_parts`]
//! converts the wrapper into a discriminated result so callers handle the
//! error arm exhaustively instead of probing optional fields.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiErrorCode, Error, Result};
use crate::session::AnalysisResult;

/// Generic response wrapper used by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl<T> Envelope<T> {
    /// Success envelope carrying a payload.
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            error_code: None,
            data: Some(data),
            session_id: None,
        }
    }

    /// Success envelope carrying a payload and the session it belongs to.
    pub fn success_with_session(data: T, session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Self::success(data)
        }
    }

    /// Error envelope with a wire code and message.
    pub fn error(code: &ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            error_code: Some(code.code().to_string()),
            data: None,
            session_id: None,
        }
    }

    /// Split the envelope into payload and session id, converting an error
    /// status into the coded error it carries.
    pub fn into_parts(self) -> Result<(Option<T>, Option<String>)> {
        if self.status == "error" {
            let code = self
                .error_code
                .as_deref()
                .map(ApiErrorCode::parse)
                .unwrap_or(ApiErrorCode::Unclassified);
            let message = self
                .message
                .unwrap_or_else(|| "unspecified server error".to_string());
            return Err(Error::api(code, message));
        }
        Ok((self.data, self.session_id))
    }

    /// Like [`Envelope::into_parts`] but requires a payload.
    pub fn into_data(self) -> Result<T> {
        let (data, _) = self.into_parts()?;
        data.ok_or_else(|| Error::decode("response envelope is missing its data payload"))
    }
}

/// Parse a non-2xx body into the coded error it carries, falling back to an
/// unclassified error when the body is not an envelope.
pub fn error_from_body(http_status: u16, body: &str) -> Error {
    if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        if let Some(raw) = envelope.error_code {
            let message = envelope
                .message
                .unwrap_or_else(|| "unspecified server error".to_string());
            return Error::api_with_status(ApiErrorCode::parse(&raw), message, http_status);
        }
        if let Some(message) = envelope.message {
            return Error::api_with_status(ApiErrorCode::Unclassified, message, http_status);
        }
    }
    Error::api_with_status(
        ApiErrorCode::Unclassified,
        format!("server returned HTTP {http_status}"),
        http_status,
    )
}

/// Body of `POST /collect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectRequest {
    pub url: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl CollectRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            channel_id: None,
        }
    }

    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }
}

/// Payload of a successful collect call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectData {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
}

/// Collect payload paired with the session the call opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOutcome {
    pub session_id: String,
    pub video: CollectData,
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub session_id: String,
}

/// User edits applied before registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterModifications {
    pub title: String,
    pub summary: String,
    pub categories: Vec<String>,
    pub emotions: String,
}

impl RegisterModifications {
    /// Seed modifications from an analysis result, using its first suggested
    /// title as the page title.
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        let title = analysis
            .suggested_titles
            .split('\n')
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .to_string();
        Self {
            title,
            summary: analysis.summary.clone(),
            categories: analysis.categories.clone(),
            emotions: analysis.emotions.clone(),
        }
    }
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub session_id: String,
    pub modifications: RegisterModifications,
}

/// Payload of a successful register call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    pub notion_url: Url,
}
