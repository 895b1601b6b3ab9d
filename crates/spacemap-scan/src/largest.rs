//! Bounded collector for the largest entries seen during a walk.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::path::Path;

use spacemap_core::{LargestEntry, NodeKind};

/// Heap wrapper where a "greater" entry ranks higher.
#[derive(Debug, PartialEq, Eq)]
struct Ranked(LargestEntry);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.rank(&self.0)
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the `capacity` highest-ranked entries offered to it.
///
/// The heap holds the weakest kept entry on top, so each offer is
/// `O(log capacity)` and memory stays bounded regardless of tree size.
#[derive(Debug)]
pub struct LargestTracker {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
    offered: u64,
}

impl LargestTracker {
    /// Create a tracker keeping up to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
            offered: 0,
        }
    }

    /// Offer an entry.
    pub fn offer(&mut self, path: &Path, size: u64, kind: NodeKind) {
        self.offered += 1;
        if self.capacity == 0 {
            return;
        }

        if self.heap.len() == self.capacity {
            let Some(Reverse(weakest)) = self.heap.peek() else {
                return;
            };
            let beats_weakest = weakest.0.size < size
                || (weakest.0.size == size && path < weakest.0.path.as_path());
            if !beats_weakest {
                return;
            }
            self.heap.pop();
        }

        self.heap
            .push(Reverse(Ranked(LargestEntry::new(path, size, kind))));
    }

    /// Number of entries kept.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Number of entries offered, kept or not.
    pub fn offered(&self) -> u64 {
        self.offered
    }

    /// Check if nothing has been kept.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consume the tracker, returning entries ranked largest first.
    pub fn into_sorted(self) -> Vec<LargestEntry> {
        // Ascending order of `Reverse<Ranked>` is descending rank.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(entry))| entry)
            .collect()
    }
}
