use crate::prelude::Position;
use std::collections::VecDeque;

/// Fewest fixes that still define a previous/current pair.
pub const MIN_CAPACITY: usize = 2;

/// Bounded record of received fixes, newest last.
///
/// Always holds at least one entry: a fresh history is seeded with
/// [`Position::SENTINEL`].
#[derive(Debug, Clone)]
pub struct SampleHistory {
    samples: VecDeque<Position>,
    capacity: usize,
}

impl SampleHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        let mut samples = VecDeque::with_capacity(capacity);
        samples.push_back(Position::SENTINEL);
        Self { samples, capacity }
    }

    /// Appends a fix, evicting the oldest one once the buffer is full.
    pub fn record(&mut self, position: Position) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(position);
    }

    /// Drops the newest fix unless it is the only one left.
    pub fn discard_latest(&mut self) -> Option<Position> {
        if self.samples.len() > 1 {
            self.samples.pop_back()
        } else {
            None
        }
    }

    pub fn latest(&self) -> Position {
        self.samples.back().copied().unwrap_or(Position::SENTINEL)
    }

    /// The two most recent fixes as `(previous, current)`.
    pub fn last_pair(&self) -> Option<(Position, Position)> {
        let len = self.samples.len();
        if len < 2 {
            return None;
        }
        Some((self.samples[len - 2], self.samples[len - 1]))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_starts_with_sentinel() {
        let history = SampleHistory::default();
        assert_eq!(history.samples.len(), 1);
        assert_eq!(history.latest(), Position::SENTINEL);
        assert!(history.last_pair().is_none());
    }

    #[test]
    fn first_record_pairs_with_sentinel() {
        let mut history = SampleHistory::default();
        let fix = Position::new(16.0, 80.0, 1000.0);
        history.record(fix);
        assert_eq!(history.last_pair(), Some((Position::SENTINEL, fix)));
    }

    #[test]
    fn ring_buffer_keeps_only_most_recent() {
        let mut history = SampleHistory::with_capacity(2);
        for step in 1..=5 {
            history.record(Position::new(step as f64, 0.0, step as f64 * 10.0));
        }
        assert_eq!(history.samples.len(), 2);
        let (previous, current) = history.last_pair().unwrap();
        assert_eq!(previous.latitude, 4.0);
        assert_eq!(current.latitude, 5.0);
    }

    #[test]
    fn capacity_is_clamped_to_a_pair() {
        assert_eq!(SampleHistory::with_capacity(0).capacity(), MIN_CAPACITY);
    }

    #[test]
    fn discard_never_empties_history() {
        let mut history = SampleHistory::default();
        assert!(history.discard_latest().is_none());
        history.record(Position::new(1.0, 1.0, 1.0));
        assert!(history.discard_latest().is_some());
        assert_eq!(history.latest(), Position::SENTINEL);
        assert_eq!(history.samples.len(), 1);
    }
}
