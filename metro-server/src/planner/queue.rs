//! Min-priority queue with deterministic tie-breaking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

// BinaryHeap is a max-heap, so the ordering is flipped on both keys.
// Equal priorities pop in insertion order.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

/// Priority queue popping the lowest priority first.
pub(super) struct MinQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> MinQueue<T> {
    pub(super) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub(super) fn push(&mut self, priority: f64, item: T) {
        self.heap.push(Entry {
            priority,
            seq: self.next_seq,
            item,
        });
        self.next_seq += 1;
    }

    pub(super) fn pop(&mut self) -> Option<(f64, T)> {
        self.heap.pop().map(|e| (e.priority, e.item))
    }
}
