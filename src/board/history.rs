use std::collections::HashMap;

/// Occurrence count per position key along the current line.
#[derive(Clone, Debug, Default)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn new() -> Self {
        RepetitionTable {
            counts: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, key: u64) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub(crate) fn set(&mut self, key: u64, count: u32) {
        if count == 0 {
            self.counts.remove(&key);
        } else {
            self.counts.insert(key, count);
        }
    }

    pub(crate) fn increment(&mut self, key: u64) -> u32 {
        let next = self.get(key).saturating_add(1);
        self.set(key, next);
        next
    }

    pub(crate) fn decrement(&mut self, key: u64) -> u32 {
        let next = self.get(key).saturating_sub(1);
        self.set(key, next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_drop_to_absent() {
        let mut table = RepetitionTable::new();
        assert_eq!(table.increment(9), 1);
        assert_eq!(table.increment(9), 2);
        assert_eq!(table.decrement(9), 1);
        assert_eq!(table.decrement(9), 0);
        assert!(table.counts.is_empty());
    }
}
