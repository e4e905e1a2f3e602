use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::Category;
use crate::ports::{FetchError, NumberSource};

use super::UpstreamConfig;

/// Upstream response body; a missing `numbers` field means no numbers
#[derive(Debug, Deserialize)]
struct NumbersResponse {
    #[serde(default)]
    numbers: Vec<i64>,
}

/// Number source backed by the upstream HTTP service
pub struct HttpNumberSource {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    timeout: Duration,
}

impl HttpNumberSource {
    pub fn new(config: UpstreamConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let base = config.base_url.trim_end_matches('/');
        let path = config.service_path.trim_matches('/');
        let endpoint = if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        };

        Ok(Self {
            client,
            endpoint,
            access_token: config.access_token,
            timeout: config.timeout,
        })
    }

    fn url_for(&self, category: Category) -> String {
        format!("{}/{}", self.endpoint, category.upstream_path())
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(err)
        }
    }
}

#[async_trait]
impl NumberSource for HttpNumberSource {
    async fn fetch(&self, category: Category) -> Result<Vec<i64>, FetchError> {
        let url = self.url_for(category);
        let started = Instant::now();

        let mut request = self.client.get(&url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let parsed: NumbersResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(
            %category,
            count = parsed.numbers.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched numbers from upstream"
        );

        Ok(parsed.numbers)
    }
}
