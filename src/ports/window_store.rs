/// Window contents captured on both sides of one merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowUpdate {
    pub previous: Vec<i64>,
    pub current: Vec<i64>,
}

/// Port for the shared window of recently seen numbers
pub trait WindowStore: Send + Sync {
    /// Merge numbers into the window and return the before/after contents.
    ///
    /// Capture, merge and the second capture happen as one step; concurrent
    /// callers never interleave inside it.
    fn merge(&self, numbers: &[i64]) -> WindowUpdate;

    /// Current contents, oldest first
    fn current(&self) -> Vec<i64>;

    /// Maximum number of values held
    fn capacity(&self) -> usize;
}
