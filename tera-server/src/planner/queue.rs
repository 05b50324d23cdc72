//! Priority queue used as the Dijkstra frontier.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A queue that hands back its lowest-priority item first.
///
/// The search only needs push and pop-minimum, so the concrete structure
/// can be swapped without touching the algorithm.
pub trait MinQueue<T> {
    /// Add an item. The same item may be pushed more than once.
    fn push(&mut self, item: T, priority: f64);

    /// Remove and return the item with the lowest priority.
    fn pop_min(&mut self) -> Option<(T, f64)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Binary-heap backed [`MinQueue`].
///
/// Items with equal priority come out in the order they were pushed.
#[derive(Debug)]
pub struct HeapQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> HeapQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Default for HeapQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinQueue<T> for HeapQueue<T> {
    fn push(&mut self, item: T, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
    }

    fn pop_min(&mut self) -> Option<(T, f64)> {
        self.heap.pop().map(|e| (e.item, e.priority))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Debug)]
struct Entry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

// BinaryHeap is a max-heap: order entries so the lowest priority (then the
// oldest push) compares greatest.
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
