//! Leaderboard entries and the in-memory per-difficulty ranking.

use chrono::NaiveDateTime;

use crate::types::{Difficulty, LEADERBOARD_CAPACITY};

/// A finished game as recorded on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub moves: u32,
    pub timestamp: NaiveDateTime,
}

/// Per-difficulty rankings, ascending by moves and capped per bucket.
///
/// Ties are broken by the earlier timestamp, then by insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    buckets: [Vec<ScoreEntry>; 3],
    capacity: usize,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(LEADERBOARD_CAPACITY)
    }
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: [Vec::new(), Vec::new(), Vec::new()],
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert an entry, keeping its bucket sorted and capped.
    ///
    /// Returns the entry's 0-based rank, or `None` if it did not make the cut.
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        let capacity = self.capacity;
        let bucket = &mut self.buckets[entry.difficulty.index()];
        // Insert after equal keys so the earlier entry keeps its rank.
        let rank = bucket
            .iter()
            .position(|e| (e.moves, e.timestamp) > (entry.moves, entry.timestamp))
            .unwrap_or(bucket.len());
        bucket.insert(rank, entry);
        bucket.truncate(capacity);
        (rank < capacity).then_some(rank)
    }

    pub fn entries(&self, difficulty: Difficulty) -> &[ScoreEntry] {
        &self.buckets[difficulty.index()]
    }

    /// Buckets in `Difficulty::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, &[ScoreEntry])> {
        Difficulty::ALL
            .into_iter()
            .map(move |d| (d, self.entries(d)))
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}
