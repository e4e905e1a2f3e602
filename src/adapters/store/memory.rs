use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::NumberWindow;
use crate::ports::{WindowStore, WindowUpdate};

/// In-memory window store shared by every request
pub struct MemoryWindowStore {
    window: Mutex<NumberWindow>,
}

impl MemoryWindowStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            window: Mutex::new(NumberWindow::new(capacity)),
        }
    }

    // Every mutation leaves the window valid, so a poisoned guard is still usable
    fn lock(&self) -> MutexGuard<'_, NumberWindow> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WindowStore for MemoryWindowStore {
    fn merge(&self, numbers: &[i64]) -> WindowUpdate {
        let mut window = self.lock();

        let previous = window.to_vec();
        let stats = window.extend_from(numbers);
        let current = window.to_vec();

        debug!(
            inserted = stats.inserted,
            duplicates = stats.duplicates,
            evicted = stats.evicted,
            len = current.len(),
            "Merged numbers into window"
        );

        WindowUpdate { previous, current }
    }

    fn current(&self) -> Vec<i64> {
        self.lock().to_vec()
    }

    fn capacity(&self) -> usize {
        self.lock().capacity()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn store() -> MemoryWindowStore {
        MemoryWindowStore::new(NonZeroUsize::new(10).unwrap())
    }

    #[test]
    fn test_first_merge_into_empty_window() {
        let store = store();
        let update = store.merge(&[1, 2, 3]);
        assert_eq!(update.previous, Vec::<i64>::new());
        assert_eq!(update.current, vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_skips_present_values() {
        let store = store();
        store.merge(&[1, 2, 3]);
        let update = store.merge(&[3, 4]);
        assert_eq!(update.previous, vec![1, 2, 3]);
        assert_eq!(update.current, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_merge_at_capacity_evicts_oldest() {
        let store = store();
        store.merge(&(1..=10).collect::<Vec<i64>>());
        let update = store.merge(&[11]);
        assert_eq!(update.previous, (1..=10).collect::<Vec<i64>>());
        assert_eq!(update.current, (2..=11).collect::<Vec<i64>>());
        assert_eq!(store.current().len(), 10);
    }

    #[test]
    fn test_empty_merge_leaves_window_unchanged() {
        let store = store();
        store.merge(&[7, 8]);
        let update = store.merge(&[]);
        assert_eq!(update.previous, update.current);
        assert_eq!(store.current(), vec![7, 8]);
    }

    #[test]
    fn test_previous_state_is_detached_copy() {
        let store = store();
        let first = store.merge(&[1]);
        store.merge(&[2, 3]);
        assert_eq!(first.current, vec![1]);
    }

    #[test]
    fn test_concurrent_merges_do_not_lose_values() {
        let store = Arc::new(MemoryWindowStore::new(NonZeroUsize::new(100).unwrap()));

        let handles: Vec<_> = (0..8i64)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..10 {
                        store.merge(&[t * 10 + i]);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let mut contents = store.current();
        contents.sort_unstable();
        assert_eq!(contents, (0..80).collect::<Vec<i64>>());
    }

    #[test]
    fn test_new_store_is_empty() {
        assert_eq!(store().capacity(), 10);
        assert!(store().current().is_empty());
    }
}
