//! Transposition table for caching search results.
//!
//! Entries are keyed by position key and by the exact search window, ply and
//! remaining depth they were computed under, and a probe only hits when all
//! of them match. The key does not cover the repetition history on the path
//! to the node or the killer moves in effect, so a hit can differ from what a
//! fresh search of the same node would return along another path.

use std::mem;

use crate::board::Move;

/// Slots per bucket.
const BUCKET_SIZE: usize = 4;

/// Everything a cached value depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey {
    /// Position key (layout hash plus side to move).
    pub key: u64,
    pub alpha: i32,
    pub beta: i32,
    /// Plies below the search root.
    pub ply: u32,
    /// Plies left before the horizon.
    pub depth: u32,
}

/// Cached result of one search node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranspositionEntry {
    pub node: NodeKey,
    pub value: i32,
    /// Best continuation from the cached node.
    pub line: Vec<Move>,
    generation: u8,
}

impl TranspositionEntry {
    /// Replacement priority: shallow (near the root) and recent entries
    /// are worth more.
    fn priority(&self, generation: u8) -> i32 {
        let age = i32::from(generation.wrapping_sub(self.generation));
        64 - 2 * self.node.ply.min(32) as i32 - 4 * age
    }
}

type Bucket = [Option<TranspositionEntry>; BUCKET_SIZE];

/// Fixed-size, bucketed cache of search results.
pub struct TranspositionTable {
    buckets: Vec<Bucket>,
    mask: usize,
    generation: u8,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let bucket_size = mem::size_of::<Bucket>();
        let mut num_buckets = (size_mb * 1024 * 1024) / bucket_size;

        // Power of two for mask indexing
        num_buckets = num_buckets.next_power_of_two() / 2;
        if num_buckets == 0 {
            num_buckets = 1024;
        }

        TranspositionTable {
            buckets: vec![Default::default(); num_buckets],
            mask: num_buckets - 1,
            generation: 0,
        }
    }

    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Start a new search: older entries become cheaper to evict.
    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Find the entry computed for exactly this node.
    #[must_use]
    pub fn probe(&self, node: &NodeKey) -> Option<&TranspositionEntry> {
        self.buckets[self.index(node.key)]
            .iter()
            .flatten()
            .find(|entry| entry.node == *node)
    }

    /// Store a search result.
    ///
    /// Replaces, in order of preference: the same node, an empty slot, the
    /// lowest-priority slot.
    pub fn store(&mut self, node: NodeKey, value: i32, line: &[Move]) {
        let generation = self.generation;
        let entry = TranspositionEntry {
            node,
            value,
            line: line.to_vec(),
            generation,
        };
        let index = self.index(node.key);
        let bucket = &mut self.buckets[index];

        let slot = bucket
            .iter()
            .position(|s| s.as_ref().is_some_and(|e| e.node == node))
            .or_else(|| bucket.iter().position(Option::is_none))
            .unwrap_or_else(|| {
                bucket
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, s)| s.as_ref().map_or(i32::MIN, |e| e.priority(generation)))
                    .map_or(0, |(idx, _)| idx)
            });
        bucket[slot] = Some(entry);
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        // Sample first 1000 buckets
        let sample_size = self.buckets.len().min(1000);
        let occupied = self
            .buckets
            .iter()
            .take(sample_size)
            .flat_map(|bucket| bucket.iter())
            .filter(|slot| slot.is_some())
            .count();
        let total_slots = sample_size * BUCKET_SIZE;
        ((occupied as u64 * 1000) / total_slots as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = Default::default();
        }
    }
}
