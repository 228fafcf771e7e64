//! Capacity-bounded top-k ranking structure.
//!
//! # Overview
//!
//! Every ranking metric needs "top C of N" without sorting all N candidates.
//! [`BoundedTopK`] keeps at most C candidates: while candidates stream in,
//! the structure holds them in a min-heap so the lowest-ranked survivor is
//! always at hand for eviction, giving O(N log C) instead of O(N log N).
//! Extraction flips the storage into a sorted drain buffer; either operation
//! may follow the other, the conversion is lazy.
//!
//! # Tie rule
//!
//! Candidates with equal scores rank FIFO: the first-inserted candidate wins
//! eviction contests and drains first. Callers feed candidates in ascending
//! node-id order, so ties resolve to the smaller node id and a run over the
//! same input is reproducible.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use sower_core::NodeId;

/// A scored candidate returned by [`BoundedTopK::pop_max`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    /// The score the candidate was inserted with.
    pub score: f64,
    /// The candidate node.
    pub node: NodeId,
}

/// Internal heap entry. Rank order: higher score first, then FIFO
/// (smaller insertion sequence) among equal scores.
#[derive(Debug, Clone, Copy)]
struct Entry {
    score: f64,
    seq: u64,
    node: NodeId,
}

impl Entry {
    const fn candidate(self) -> RankedCandidate {
        RankedCandidate {
            score: self.score,
            node: self.node,
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Greater = better ranked. Equal scores: the earlier insertion
        // (smaller seq) is the greater entry.
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
enum State {
    /// Min-heap of the retained candidates; the root is the eviction victim.
    Filling(BinaryHeap<Reverse<Entry>>),
    /// Retained candidates sorted ascending; the maximum pops off the end.
    Draining(Vec<Entry>),
}

/// A capacity-limited ranking structure over `(score, node)` pairs.
///
/// Holds the C highest-ranked candidates seen so far. Capacity 0 is legal
/// and always empty.
#[derive(Debug)]
pub struct BoundedTopK {
    capacity: usize,
    next_seq: u64,
    state: State,
}

impl BoundedTopK {
    /// Create a structure retaining at most `capacity` candidates.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            next_seq: 0,
            state: State::Filling(BinaryHeap::with_capacity(capacity)),
        }
    }

    /// Insert a candidate.
    ///
    /// At capacity, a newcomer that does not outrank the lowest retained
    /// candidate is discarded (an equal score loses to the incumbent, per
    /// the FIFO tie rule); otherwise it replaces that candidate.
    pub fn insert(&mut self, score: f64, node: NodeId) {
        if self.capacity == 0 {
            return;
        }
        let entry = Entry {
            score,
            seq: self.next_seq,
            node,
        };
        self.next_seq += 1;

        let capacity = self.capacity;
        let heap = self.filling_mut();
        if heap.len() < capacity {
            heap.push(Reverse(entry));
            return;
        }
        let outranks_lowest = heap
            .peek()
            .is_some_and(|Reverse(lowest)| entry > *lowest);
        if outranks_lowest {
            heap.pop();
            heap.push(Reverse(entry));
        }
    }

    /// Remove and return the highest-ranked candidate, or `None` if empty.
    ///
    /// Repeated calls descend strictly by score, FIFO among equal scores.
    pub fn pop_max(&mut self) -> Option<RankedCandidate> {
        self.draining_mut().pop().map(Entry::candidate)
    }

    /// Count of currently retained candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.state {
            State::Filling(heap) => heap.len(),
            State::Draining(buf) => buf.len(),
        }
    }

    /// Whether no candidates are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The retention capacity this structure was created with.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn filling_mut(&mut self) -> &mut BinaryHeap<Reverse<Entry>> {
        if let State::Draining(buf) = &mut self.state {
            let heap: BinaryHeap<Reverse<Entry>> = buf.drain(..).map(Reverse).collect();
            self.state = State::Filling(heap);
        }
        match &mut self.state {
            State::Filling(heap) => heap,
            State::Draining(_) => unreachable!("state flipped to Filling above"),
        }
    }

    fn draining_mut(&mut self) -> &mut Vec<Entry> {
        if let State::Filling(heap) = &mut self.state {
            let mut buf: Vec<Entry> = heap.drain().map(|Reverse(entry)| entry).collect();
            buf.sort_unstable();
            self.state = State::Draining(buf);
        }
        match &mut self.state {
            State::Filling(_) => unreachable!("state flipped to Draining above"),
            State::Draining(buf) => buf,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
