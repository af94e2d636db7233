//! Indexed binary min-heap used by the shortest-path engine.
//!
//! Items are dense node indices. A position table records where each item
//! currently sits in the heap array, which makes decrease-key a sift-up from a
//! known slot instead of a search.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    item: usize,
    key: f64,
}

impl HeapEntry {
    /// Keys compare with `total_cmp`; equal keys fall back to the item index
    /// so extraction order never depends on insertion history.
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| self.item.cmp(&other.item))
    }
}

#[derive(Debug)]
pub(crate) struct IndexedMinHeap {
    data: Vec<HeapEntry>,
    positions: Vec<Option<usize>>,
}

impl IndexedMinHeap {
    /// Create a heap able to hold items `0..capacity`.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            positions: vec![None; capacity],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, item: usize) -> bool {
        self.positions[item].is_some()
    }

    /// Insert `item`, or lower its key if it is already queued.
    ///
    /// Returns `false` (and leaves the heap unchanged) when the item is queued
    /// with a key that is already lower or equal.
    pub(crate) fn push_or_decrease(&mut self, item: usize, key: f64) -> bool {
        match self.positions[item] {
            Some(slot) => {
                if key >= self.data[slot].key {
                    return false;
                }
                self.data[slot].key = key;
                self.sift_up(slot);
            }
            None => {
                let slot = self.data.len();
                self.data.push(HeapEntry { item, key });
                self.positions[item] = Some(slot);
                self.sift_up(slot);
            }
        }
        true
    }

    /// Remove and return the item with the lowest key.
    pub(crate) fn pop(&mut self) -> Option<(usize, f64)> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.swap_entries(0, last);
        let entry = self.data.pop()?;
        self.positions[entry.item] = None;
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some((entry.item, entry.key))
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.data[slot].cmp_priority(&self.data[parent]) == Ordering::Less {
                self.swap_entries(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.data[left].cmp_priority(&self.data[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < len && self.data[right].cmp_priority(&self.data[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap_entries(slot, smallest);
            slot = smallest;
        }
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.positions[self.data[a].item] = Some(a);
        self.positions[self.data[b].item] = Some(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(heap: &mut IndexedMinHeap) -> Vec<(usize, f64)> {
        std::iter::from_fn(|| heap.pop()).collect()
    }

    #[test]
    fn pops_in_key_order() {
        let mut heap = IndexedMinHeap::with_capacity(6);
        for (item, key) in [(0, 5.0), (1, 3.0), (2, 8.0), (3, 1.0), (4, 4.0), (5, 2.0)] {
            assert!(heap.push_or_decrease(item, key));
        }
        assert_eq!(heap.len(), 6);

        let keys: Vec<f64> = drain(&mut heap).into_iter().map(|(_, key)| key).collect();
        assert_eq!(keys, vec![1.0, 2.0, 3.0, 4.0, 5.0, 8.0]);
        assert!(heap.is_empty());
    }

    #[test]
    fn decrease_key_moves_item_forward() {
        let mut heap = IndexedMinHeap::with_capacity(3);
        heap.push_or_decrease(0, 10.0);
        heap.push_or_decrease(1, 20.0);
        heap.push_or_decrease(2, 30.0);

        assert!(heap.push_or_decrease(2, 5.0));
        assert_eq!(heap.len(), 3, "decrease-key must not duplicate the item");
        assert_eq!(heap.pop(), Some((2, 5.0)));
    }

    #[test]
    fn higher_or_equal_key_is_ignored() {
        let mut heap = IndexedMinHeap::with_capacity(2);
        heap.push_or_decrease(0, 4.0);

        assert!(!heap.push_or_decrease(0, 4.0));
        assert!(!heap.push_or_decrease(0, 9.0));
        assert_eq!(heap.pop(), Some((0, 4.0)));
    }

    #[test]
    fn equal_keys_pop_by_item_index() {
        let mut heap = IndexedMinHeap::with_capacity(4);
        heap.push_or_decrease(3, 1.0);
        heap.push_or_decrease(1, 1.0);
        heap.push_or_decrease(2, 1.0);

        let items: Vec<usize> = drain(&mut heap).into_iter().map(|(item, _)| item).collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn positions_are_cleared_after_pop() {
        let mut heap = IndexedMinHeap::with_capacity(2);
        heap.push_or_decrease(0, 1.0);
        heap.push_or_decrease(1, 2.0);
        assert!(heap.contains(0));

        heap.pop();
        assert!(!heap.contains(0));
        assert!(heap.contains(1));

        // A popped item may be queued again.
        assert!(heap.push_or_decrease(0, 0.5));
        assert_eq!(heap.pop(), Some((0, 0.5)));
    }
}
