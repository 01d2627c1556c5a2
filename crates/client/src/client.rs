//! Typed client for the `/api/v1` surface.
//!
//! Each operation is a single request/response round trip. There is no
//! retry, no caching, and no timeout beyond transport defaults; failures
//! surface to the caller, who decides what the user sees.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use url::Url;

use tubenote_core::error::{ApiErrorCode, Error, Result};
use tubenote_core::protocol::{
    self, AnalyzeRequest, CollectData, CollectOutcome, CollectRequest, Envelope, RegisterData,
    RegisterModifications, RegisterRequest,
};
use tubenote_core::session::{AnalysisResult, SessionInfo};

use crate::config::ClientConfig;

/// Typed facade over the analysis service.
#[derive(Clone)]
pub struct ApiClient {
    /// Service base URL without a trailing slash.
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/');
        // Validate once up front so per-call URL formatting cannot fail.
        Url::parse(trimmed).map_err(|e| Error::InvalidBaseUrl(format!("{trimmed}: {e}")))?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http: reqwest::Client::new(),
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone())
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/v1/health` - read-only service probe.
    pub async fn health(&self) -> Result<()> {
        let envelope: Envelope<()> = self.get("health").await?;
        envelope.into_parts()?;
        Ok(())
    }

    /// `POST /api/v1/collect` - trigger ingestion of a video URL.
    ///
    /// Allocates a server-side session; the returned outcome carries its id.
    pub async fn collect(&self, request: &CollectRequest) -> Result<CollectOutcome> {
        let envelope: Envelope<CollectData> = self.post("collect", request).await?;
        let (data, session_id) = envelope.into_parts()?;

        let video =
            data.ok_or_else(|| Error::decode("collect response is missing its data payload"))?;
        let session_id =
            session_id.ok_or_else(|| Error::decode("collect response is missing session_id"))?;

        Ok(CollectOutcome { session_id, video })
    }

    /// `POST /api/v1/analyze` - analyze the transcript held by a session.
    pub async fn analyze(&self, session_id: &str) -> Result<AnalysisResult> {
        let request = AnalyzeRequest {
            session_id: session_id.to_string(),
        };
        let envelope: Envelope<AnalysisResult> = self.post("analyze", &request).await?;
        envelope
            .into_data()
            .map_err(|e| contextualize_session_error(e, session_id))
    }

    /// `POST /api/v1/register` - write the reviewed result to the note store.
    ///
    /// Returns the URL of the created note page.
    pub async fn register(
        &self,
        session_id: &str,
        modifications: &RegisterModifications,
    ) -> Result<Url> {
        let request = RegisterRequest {
            session_id: session_id.to_string(),
            modifications: modifications.clone(),
        };
        let envelope: Envelope<RegisterData> = self.post("register", &request).await?;
        let data = envelope
            .into_data()
            .map_err(|e| contextualize_session_error(e, session_id))?;
        Ok(data.notion_url)
    }

    /// `GET /api/v1/session/{id}` - read-only session lookup.
    ///
    /// A miss surfaces as [`Error::SessionNotFound`], an expired session as
    /// [`Error::SessionExpired`].
    pub async fn session(&self, session_id: &str) -> Result<SessionInfo> {
        let envelope: Envelope<SessionInfo> =
            self.get(&format!("session/{session_id}")).await?;
        envelope
            .into_data()
            .map_err(|e| contextualize_session_error(e, session_id))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>> {
        let url = format!("{}/api/v1/{}", self.base_url, path);
        debug!(url = %url, "GET");

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "request failed");
            Error::transport(e.to_string())
        })?;

        read_envelope(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        let url = format!("{}/api/v1/{}", self.base_url, path);
        debug!(url = %url, "POST");

        let response = self.http.post(&url).json(body).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "request failed");
            Error::transport(e.to_string())
        })?;

        read_envelope(response).await
    }
}

/// Read a response into an envelope, converting non-2xx statuses into the
/// coded error their body carries.
async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<Envelope<T>> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "server returned error");
        return Err(protocol::error_from_body(status.as_u16(), &body));
    }

    let body = response.text().await.map_err(|e| {
        warn!(error = %e, "failed to read response body");
        Error::transport(e.to_string())
    })?;

    serde_json::from_str(&body).map_err(|e| {
        warn!(error = %e, "failed to parse response envelope");
        Error::decode(format!("invalid envelope: {e}"))
    })
}

/// Attach the session id callers already know to session-shaped errors.
fn contextualize_session_error(err: Error, session_id: &str) -> Error {
    match err {
        Error::Api { code, .. } if code == ApiErrorCode::NotFound => {
            Error::session_not_found(session_id)
        }
        Error::Api { code, .. } if code == ApiErrorCode::SessionExpired => {
            Error::session_expired(session_id)
        }
        other => other,
    }
}
