use std::collections::{HashSet, VecDeque};
use std::num::NonZeroUsize;

/// Outcome of offering a single value to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Inserted,
    /// Inserted after evicting the oldest value
    Evicted(i64),
    Duplicate,
}

/// Per-merge tally, used for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub duplicates: usize,
    pub evicted: usize,
}

/// Bounded, deduplicated, insertion-ordered window of integers.
///
/// Values are appended at the tail. When full, the head (oldest insertion)
/// is evicted before the append, so the length never exceeds the capacity.
/// Duplicate detection only looks at the current contents, so an evicted
/// value can be admitted again later.
#[derive(Debug, Clone)]
pub struct NumberWindow {
    values: VecDeque<i64>,
    members: HashSet<i64>,
    capacity: NonZeroUsize,
}

impl NumberWindow {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity.get()),
            members: HashSet::with_capacity(capacity.get()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Offer one value to the window
    pub fn admit(&mut self, value: i64) -> Admission {
        if self.members.contains(&value) {
            return Admission::Duplicate;
        }

        let evicted = if self.values.len() >= self.capacity.get() {
            self.values.pop_front()
        } else {
            None
        };
        if let Some(old) = evicted {
            self.members.remove(&old);
        }

        self.values.push_back(value);
        self.members.insert(value);

        match evicted {
            Some(old) => Admission::Evicted(old),
            None => Admission::Inserted,
        }
    }

    /// Offer values in the order received
    pub fn extend_from(&mut self, numbers: &[i64]) -> MergeStats {
        let mut stats = MergeStats::default();
        for &value in numbers {
            match self.admit(value) {
                Admission::Inserted => stats.inserted += 1,
                Admission::Evicted(_) => {
                    stats.inserted += 1;
                    stats.evicted += 1;
                }
                Admission::Duplicate => stats.duplicates += 1,
            }
        }
        stats
    }

    /// Copy of the contents, oldest first
    pub fn to_vec(&self) -> Vec<i64> {
        self.values.iter().copied().collect()
    }
}

/// Arithmetic mean rounded to two decimals, zero for no values
pub fn average_of(values: impl IntoIterator<Item = i64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0i128, 0usize), |(sum, count), v| (sum + v as i128, count + 1));

    if count == 0 {
        return 0.0;
    }

    let mean = sum as f64 / count as f64;
    (mean * 100.0).round() / 100.0
}
