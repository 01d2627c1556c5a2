//! Session lifecycle types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Processing state of a server-side session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Collected,
    Analyzed,
    Registered,
    Error,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collected => "collected",
            Self::Analyzed => "analyzed",
            Self::Registered => "registered",
            Self::Error => "error",
        }
    }
}

/// Metadata for a collected video. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
    pub published_at: NaiveDate,
    /// ISO 8601 duration as displayed (e.g. "PT4M13S").
    pub duration: String,
    pub duration_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    pub url: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<Url>,
}

/// Result of a transcript analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    /// Suggested titles as one delimited string, as the service emits them.
    pub suggested_titles: String,
    pub categories: Vec<String>,
    pub emotions: String,
}

/// Server-side session record, referenced client-side by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    /// Session creation time.
    pub timestamp: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub video_data: VideoMetadata,
    pub transcript: String,
    pub transcript_language: String,
    pub status: SessionStatus,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<AnalysisResult>,
}

impl SessionInfo {
    /// Checks whether the session's expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
