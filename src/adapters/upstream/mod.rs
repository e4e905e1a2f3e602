mod client;

use std::time::Duration;

pub use client::HttpNumberSource;

/// Connection settings for the upstream number service
#[derive(Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub service_path: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>, service_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            service_path: service_path.into(),
            access_token: None,
            timeout,
        }
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}
