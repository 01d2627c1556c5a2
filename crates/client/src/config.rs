//! Client configuration.

use serde::{Deserialize, Serialize};

/// Base address used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the analysis service.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
        }
    }
}
