/// Bounded top-N largest files tracker.
///
/// Keeps at most `limit` candidates in a min-heap keyed on size, so memory
/// stays constant no matter how many files a scan visits. Each offer is
/// O(log limit).
use crate::model::FileRecord;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A retained file plus its discovery order.
#[derive(Debug, Clone)]
struct Candidate {
    seq: u64,
    record: FileRecord,
}

impl Candidate {
    /// Larger files rank higher; among equal sizes, the earlier discovery
    /// ranks higher so it is the one that survives eviction.
    fn rank(&self, other: &Self) -> Ordering {
        self.record
            .size_bytes
            .cmp(&other.record.size_bytes)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank(other)
    }
}

#[derive(Debug, Clone)]
pub struct TopFiles {
    limit: usize,
    next_seq: u64,
    /// `Reverse` turns the max-heap into a min-heap: the top is the weakest
    /// retained candidate.
    heap: BinaryHeap<Reverse<Candidate>>,
}

impl TopFiles {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            next_seq: 0,
            heap: BinaryHeap::with_capacity(limit + 1),
        }
    }

    /// Offer a file; it is retained only if it ranks among the largest seen.
    pub fn offer(&mut self, record: FileRecord) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.limit == 0 {
            return;
        }

        if self.heap.len() < self.limit {
            self.heap.push(Reverse(Candidate { seq, record }));
            return;
        }

        let beats_weakest = self
            .heap
            .peek()
            .is_some_and(|Reverse(weakest)| record.size_bytes > weakest.record.size_bytes);
        if beats_weakest {
            self.heap.pop();
            self.heap.push(Reverse(Candidate { seq, record }));
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Retained files, largest first. Does not consume the tracker.
    pub fn sorted(&self) -> Vec<FileRecord> {
        let mut candidates: Vec<&Candidate> = self.heap.iter().map(|Reverse(c)| c).collect();
        candidates.sort_unstable_by(|a, b| b.cmp(a));
        candidates.into_iter().map(|c| c.record.clone()).collect()
    }
}
