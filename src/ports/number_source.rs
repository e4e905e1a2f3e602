use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Category;

/// Why a fetch produced no numbers
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Port for fetching numbers from the upstream service
#[async_trait]
pub trait NumberSource: Send + Sync {
    /// Fetch the current number series for a category
    async fn fetch(&self, category: Category) -> Result<Vec<i64>, FetchError>;
}
