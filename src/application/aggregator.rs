use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{Category, WindowSnapshot};
use crate::ports::{FetchError, NumberSource, WindowStore};

/// Fetches numbers for a category and folds them into the shared window
pub struct AverageService {
    source: Arc<dyn NumberSource>,
    store: Arc<dyn WindowStore>,
    fetch_timeout: Duration,
}

impl AverageService {
    pub fn new(source: Arc<dyn NumberSource>, store: Arc<dyn WindowStore>, fetch_timeout: Duration) -> Self {
        Self {
            source,
            store,
            fetch_timeout,
        }
    }

    pub fn window_size(&self) -> usize {
        self.store.capacity()
    }

    /// Fetch numbers within the deadline, dropping the call when it expires
    pub async fn fetch_numbers(&self, category: Category) -> Result<Vec<i64>, FetchError> {
        match tokio::time::timeout(self.fetch_timeout, self.source.fetch(category)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout)),
        }
    }

    /// Fetch, merge and report the window before and after.
    ///
    /// Never fails: an upstream failure is logged and treated as an empty
    /// fetch, so the caller gets the last known window and average.
    pub async fn calculate(&self, category: Category) -> WindowSnapshot {
        let numbers = match self.fetch_numbers(category).await {
            Ok(numbers) => numbers,
            Err(e) => {
                warn!(%category, error = %e, "Upstream fetch failed, keeping current window");
                Vec::new()
            }
        };

        let update = self.store.merge(&numbers);
        let snapshot = WindowSnapshot::new(update.previous, update.current, numbers);
        if snapshot.is_unchanged() {
            debug!(%category, avg = snapshot.avg, "Window unchanged");
        }
        snapshot
    }

    /// Current window without contacting the upstream
    pub fn peek(&self) -> WindowSnapshot {
        let current = self.store.current();
        WindowSnapshot::new(current.clone(), current, Vec::new())
    }
}
