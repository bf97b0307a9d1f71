//! Bounded-capacity binary min-heap used as the K-way merge frontier.
//!
//! Array-packed binary heap (`parent(i) = (i-1)/2`, `left(i) = 2i+1`,
//! `right(i) = 2i+2`). Capacity is fixed at construction time; inserting past
//! capacity or popping an empty heap is a programmer error, not a recoverable
//! condition.

/// One entry in the merge frontier: a value together with the index of the
/// input block it was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeapElement {
    pub(crate) key: i32,
    pub(crate) idx: usize,
}

pub(crate) struct MinHeap {
    capacity: usize,
    data: Vec<HeapElement>,
}

impl MinHeap {
    pub(crate) fn new(capacity: usize) -> MinHeap {
        assert!(capacity > 0, "heap capacity must be positive");
        MinHeap {
            capacity,
            data: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert `el`, sifting it up while its parent's key is strictly greater.
    pub(crate) fn insert(&mut self, el: HeapElement) {
        debug_assert!(self.data.len() < self.capacity, "heap overflow");
        self.data.push(el);
        let mut i = self.data.len() - 1;
        while i != 0 {
            let parent = (i - 1) / 2;
            if self.data[parent].key > self.data[i].key {
                self.data.swap(parent, i);
                i = parent;
            } else {
                break;
            }
        }
    }

    /// Remove and return the minimal element, replacing the root with the
    /// last element and sifting down.
    pub(crate) fn pop(&mut self) -> HeapElement {
        debug_assert!(!self.data.is_empty(), "heap underflow");
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let top = self.data.pop().expect("heap underflow");
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        top
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.data.len();
        loop {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut smallest = i;
            if l < len && self.data[l].key < self.data[smallest].key {
                smallest = l;
            }
            if r < len && self.data[r].key < self.data[smallest].key {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.data.swap(i, smallest);
            i = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_nondecreasing_order() {
        let mut heap = MinHeap::new(16);
        for (idx, key) in [5, 3, 8, 1, 9, 2, 7].into_iter().enumerate() {
            heap.insert(HeapElement { key, idx });
        }
        let mut popped = Vec::new();
        while !heap.is_empty() {
            popped.push(heap.pop().key);
        }
        let mut sorted = popped.clone();
        sorted.sort();
        assert_eq!(popped, sorted);
    }

    #[test]
    fn drains_full_multiset() {
        let values = [4, 4, 1, -3, 0, 9, 9, -3];
        let mut heap = MinHeap::new(values.len());
        for (idx, &key) in values.iter().enumerate() {
            heap.insert(HeapElement { key, idx });
        }
        let mut popped = Vec::new();
        while !heap.is_empty() {
            popped.push(heap.pop().key);
        }
        let mut expected = values.to_vec();
        expected.sort();
        assert_eq!(popped, expected);
    }

    #[test]
    fn single_element_round_trips() {
        let mut heap = MinHeap::new(1);
        heap.insert(HeapElement { key: 42, idx: 0 });
        assert!(!heap.is_empty());
        let el = heap.pop();
        assert_eq!(el.key, 42);
        assert!(heap.is_empty());
    }

    #[test]
    fn equal_keys_preserve_multiset() {
        let mut heap = MinHeap::new(4);
        for idx in 0..4 {
            heap.insert(HeapElement { key: 7, idx });
        }
        let mut seen = Vec::new();
        while !heap.is_empty() {
            seen.push(heap.pop().idx);
        }
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
