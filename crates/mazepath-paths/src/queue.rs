use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::SearchError;

#[derive(Debug, Clone)]
struct Entry<K> {
    item: K,
    priority: f64,
    seq: u64,
}

impl<K> Entry<K> {
    /// Lower priority first, then earlier first insertion.
    #[inline]
    fn precedes(&self, other: &Self) -> bool {
        match self.priority.total_cmp(&other.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.seq < other.seq,
        }
    }
}

/// A binary min-heap keyed by item identity, with decrease-key.
///
/// Each item is held at most once. Inserting an item that is already queued
/// lowers its priority if the new one is smaller and is otherwise a no-op,
/// so the queue always yields an item at its best known priority.
///
/// Equal priorities are served in the order items were *first* inserted;
/// a decrease-key keeps the item's original place in that order.
/// Priorities are compared with [`f64::total_cmp`].
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<K> {
    heap: Vec<Entry<K>>,
    index: HashMap<K, usize>,
    next_seq: u64,
}

impl<K: Copy + Eq + Hash> Default for IndexedPriorityQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> IndexedPriorityQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Create an empty queue with room for `cap` items.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            heap: Vec::with_capacity(cap),
            index: HashMap::with_capacity(cap),
            next_seq: 0,
        }
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `item` is currently queued.
    #[inline]
    pub fn contains(&self, item: &K) -> bool {
        self.index.contains_key(item)
    }

    /// Current priority of `item`, if queued.
    pub fn priority(&self, item: &K) -> Option<f64> {
        self.index.get(item).map(|&i| self.heap[i].priority)
    }

    /// The minimum item and its priority, without removing it.
    pub fn peek(&self) -> Option<(K, f64)> {
        self.heap.first().map(|e| (e.item, e.priority))
    }

    /// Insert `item`, or lower its priority if it is already queued.
    ///
    /// Returns `true` if the queue changed. Re-inserting with a priority that
    /// is not lower than the stored one never raises it and returns `false`.
    pub fn insert(&mut self, item: K, priority: f64) -> bool {
        if let Some(&i) = self.index.get(&item) {
            if priority.total_cmp(&self.heap[i].priority) != Ordering::Less {
                return false;
            }
            self.heap[i].priority = priority;
            self.sift_up(i);
            return true;
        }
        let i = self.heap.len();
        self.heap.push(Entry {
            item,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.index.insert(item, i);
        self.sift_up(i);
        true
    }

    /// Remove and return the item with the lowest priority.
    ///
    /// Returns [`SearchError::EmptyQueueUnderflow`] if the queue is empty.
    pub fn extract_min(&mut self) -> Result<K, SearchError> {
        if self.heap.is_empty() {
            return Err(SearchError::EmptyQueueUnderflow);
        }
        let top = self.heap.swap_remove(0);
        self.index.remove(&top.item);
        if !self.heap.is_empty() {
            self.index.insert(self.heap[0].item, 0);
            self.sift_down(0);
        }
        Ok(top.item)
    }

    /// Remove every item. The insertion counter is reset too.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
        self.next_seq = 0;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.heap[i].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right].precedes(&self.heap[left]) {
                right
            } else {
                left
            };
            if !self.heap[child].precedes(&self.heap[i]) {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }

    // Keeps the item -> slot map in step with the heap.
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].item, a);
        self.index.insert(self.heap[b].item, b);
    }
}
