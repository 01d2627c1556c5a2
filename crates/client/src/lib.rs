//! Typed HTTP client for the tubenote analysis service.

pub mod client;
pub mod config;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
