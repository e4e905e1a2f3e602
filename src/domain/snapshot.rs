use serde::Serialize;

use super::window::average_of;

/// Before/after view of the window for a single request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub window_prev_state: Vec<i64>,
    pub window_curr_state: Vec<i64>,
    pub numbers: Vec<i64>,
    pub avg: f64,
}

impl WindowSnapshot {
    /// Build a snapshot; the average is always derived from `current`
    pub fn new(previous: Vec<i64>, current: Vec<i64>, numbers: Vec<i64>) -> Self {
        let avg = average_of(current.iter().copied());
        Self {
            window_prev_state: previous,
            window_curr_state: current,
            numbers,
            avg,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.window_prev_state == self.window_curr_state
    }
}
