//! Deferred-task queue keyed by tick.
//!
//! Items pushed for tick `at` come back out of `drain_due` on the first call
//! with `now >= at`, exactly once, in (tick, insertion) order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct Entry<T> {
    at: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed: BinaryHeap is a max-heap and we want the earliest first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: u64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { at, seq, item });
    }

    /// Remove and return every item due at or before `now`.
    pub fn drain_due(&mut self, now: u64) -> Vec<T> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|e| e.at <= now) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.item);
            }
        }
        due
    }

    /// Tick of the earliest pending item.
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|e| e.at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending items in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &T)> {
        self.heap.iter().map(|e| (e.at, &e.item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_tick_then_insertion_order() {
        let mut queue = DeferredQueue::new();
        queue.push(20, "b");
        queue.push(10, "a");
        queue.push(20, "c");
        assert_eq!(queue.next_due(), Some(10));
        assert!(queue.drain_due(9).is_empty());
        assert_eq!(queue.drain_due(20), vec!["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn late_drain_still_delivers_once() {
        let mut queue = DeferredQueue::new();
        queue.push(5, 1);
        assert_eq!(queue.drain_due(50), vec![1]);
        assert!(queue.drain_due(51).is_empty());
    }
}
