//! A binary min-heap over elements with dense integer ids.
//!
//! Besides `push` and `pop`, keys of elements already in the heap can be
//! updated in `O(log n)`. A position table maps each element id to its
//! current slot in the heap array, so an update never needs a linear scan
//! or a remove/reinsert round trip.
//!
//! # Examples
//!
//! ```
//! use alt_routing_engine::datastr::index_heap::{IndexedMinHeap, Indexing};
//!
//! #[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Debug)]
//! struct Entry {
//!     key: u64,
//!     id: usize,
//! }
//!
//! impl Indexing for Entry {
//!     fn as_index(&self) -> usize {
//!         self.id
//!     }
//! }
//!
//! let mut heap = IndexedMinHeap::new(3);
//! heap.push(Entry { key: 42, id: 0 });
//! heap.push(Entry { key: 23, id: 1 });
//! heap.update_key(Entry { key: 7, id: 0 });
//! assert_eq!(heap.pop(), Some(Entry { key: 7, id: 0 }));
//! ```

/// Maps a heap element to the dense integer id it represents.
///
/// The id doubles as the slot into the heap's position table, so two live
/// elements must never share one.
pub trait Indexing {
    fn as_index(&self) -> usize;
}

const INVALID_POSITION: usize = usize::MAX;

/// Indexed binary min-heap for elements with ids in `[0, max_index)`.
///
/// Ordering comes from the element's `Ord` impl. Every swap keeps the
/// position table in sync, which is what makes `decrease_key` and friends
/// possible.
#[derive(Debug)]
pub struct IndexedMinHeap<T> {
    positions: Vec<usize>,
    data: Vec<T>,
}

impl<T: Ord + Indexing> IndexedMinHeap<T> {
    /// Creates an empty heap for elements whose ids lie in `[0, max_index)`.
    pub fn new(max_index: usize) -> IndexedMinHeap<T> {
        IndexedMinHeap {
            positions: vec![INVALID_POSITION; max_index],
            data: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Is an element with this id currently in the heap?
    pub fn contains_index(&self, id: usize) -> bool {
        self.positions[id] != INVALID_POSITION
    }

    /// The smallest element, or `None` when empty.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Drops all elements.
    pub fn clear(&mut self) {
        for element in &self.data {
            self.positions[element.as_index()] = INVALID_POSITION;
        }
        self.data.clear();
    }

    /// Inserts an element. Its id must not already be in the heap.
    pub fn push(&mut self, element: T) {
        assert!(!self.contains_index(element.as_index()));
        let position = self.data.len();
        self.positions[element.as_index()] = position;
        self.data.push(element);
        self.sift_up(position);
    }

    /// Removes and returns the smallest element, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        let mut popped = self.data.pop()?;
        if self.data.is_empty() {
            self.positions[popped.as_index()] = INVALID_POSITION;
            return Some(popped);
        }
        // move the tail element to the root, then restore order below it
        std::mem::swap(&mut popped, &mut self.data[0]);
        self.positions[popped.as_index()] = INVALID_POSITION;
        self.positions[self.data[0].as_index()] = 0;
        self.sift_down(0);
        Some(popped)
    }

    /// Replaces the element with the same id by one with a smaller key.
    pub fn decrease_key(&mut self, element: T) {
        let position = self.positions[element.as_index()];
        self.data[position] = element;
        self.sift_up(position);
    }

    /// Replaces the element with the same id by one with a larger key.
    pub fn increase_key(&mut self, element: T) {
        let position = self.positions[element.as_index()];
        self.data[position] = element;
        self.sift_down(position);
    }

    /// Replaces the element with the same id, restoring heap order for a key
    /// change in either direction: sift down first, and only when the element
    /// did not move, sift up.
    pub fn update_key(&mut self, element: T) {
        let position = self.positions[element.as_index()];
        self.data[position] = element;
        if !self.sift_down(position) {
            self.sift_up(position);
        }
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if self.data[parent] <= self.data[position] {
                break;
            }
            self.swap_entries(parent, position);
            position = parent;
        }
    }

    /// Returns whether the element moved.
    fn sift_down(&mut self, start: usize) -> bool {
        let mut position = start;
        loop {
            let first_child = 2 * position + 1;
            if first_child >= self.data.len() {
                break;
            }
            let mut smallest_child = first_child;
            let second_child = first_child + 1;
            if second_child < self.data.len() && self.data[second_child] < self.data[first_child] {
                smallest_child = second_child;
            }
            if self.data[position] <= self.data[smallest_child] {
                break;
            }
            self.swap_entries(position, smallest_child);
            position = smallest_child;
        }
        position != start
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        self.positions.swap(self.data[a].as_index(), self.data[b].as_index());
        self.data.swap(a, b);
    }

    /// Panics unless the heap order holds everywhere and the position table
    /// and the heap array agree in both directions. Intended for tests and
    /// debugging, O(max_index).
    pub fn check_invariants(&self) {
        for (position, element) in self.data.iter().enumerate() {
            if position > 0 {
                let parent = (position - 1) / 2;
                assert!(
                    self.data[parent] <= self.data[position],
                    "heap order violated between positions {} and {}",
                    parent,
                    position
                );
            }
            assert_eq!(self.positions[element.as_index()], position, "stale position entry for id {}", element.as_index());
        }
        for (id, &position) in self.positions.iter().enumerate() {
            if position != INVALID_POSITION {
                assert!(position < self.data.len(), "position out of bounds for id {}", id);
                assert_eq!(self.data[position].as_index(), id, "heap slot {} does not hold id {}", position, id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Debug)]
    struct Entry {
        key: u64,
        id: usize,
    }

    impl Indexing for Entry {
        fn as_index(&self) -> usize {
            self.id
        }
    }

    #[test]
    fn pops_in_key_order() {
        let mut heap = IndexedMinHeap::new(5);
        for (id, key) in [(0, 40), (1, 10), (2, 50), (3, 30), (4, 20)] {
            heap.push(Entry { key, id });
            heap.check_invariants();
        }

        let mut popped = Vec::new();
        while let Some(entry) = heap.pop() {
            heap.check_invariants();
            popped.push(entry.key);
        }
        assert_eq!(popped, vec![10, 20, 30, 40, 50]);
        assert!(heap.is_empty());
    }

    #[test]
    fn update_key_moves_both_directions() {
        let mut heap = IndexedMinHeap::new(4);
        for (id, key) in [(0, 10), (1, 20), (2, 30), (3, 40)] {
            heap.push(Entry { key, id });
        }

        heap.update_key(Entry { key: 5, id: 3 });
        heap.check_invariants();
        assert_eq!(heap.peek(), Some(&Entry { key: 5, id: 3 }));

        heap.update_key(Entry { key: 35, id: 3 });
        heap.check_invariants();
        assert_eq!(heap.pop(), Some(Entry { key: 10, id: 0 }));
    }

    #[test]
    fn directed_key_updates() {
        let mut heap = IndexedMinHeap::new(3);
        heap.push(Entry { key: 10, id: 0 });
        heap.push(Entry { key: 20, id: 1 });
        heap.push(Entry { key: 30, id: 2 });

        heap.decrease_key(Entry { key: 15, id: 2 });
        heap.check_invariants();
        heap.increase_key(Entry { key: 25, id: 0 });
        heap.check_invariants();

        assert_eq!(heap.pop(), Some(Entry { key: 15, id: 2 }));
        assert_eq!(heap.pop(), Some(Entry { key: 20, id: 1 }));
        assert_eq!(heap.pop(), Some(Entry { key: 25, id: 0 }));
    }

    #[test]
    fn contains_tracks_membership() {
        let mut heap = IndexedMinHeap::new(2);
        assert!(!heap.contains_index(0));
        heap.push(Entry { key: 1, id: 0 });
        assert!(heap.contains_index(0));
        heap.pop();
        assert!(!heap.contains_index(0));
    }

    #[test]
    fn clear_forgets_positions() {
        let mut heap = IndexedMinHeap::new(3);
        heap.push(Entry { key: 3, id: 1 });
        heap.push(Entry { key: 1, id: 2 });
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains_index(1));
        assert!(!heap.contains_index(2));
        heap.check_invariants();
    }

    // Many repeated key decreases on the same ids before anything is popped,
    // with the full invariant check after every operation.
    #[test]
    fn randomized_decrease_key_stress() {
        let mut rng = StdRng::seed_from_u64(0xa17);
        let n = 64;
        let mut heap = IndexedMinHeap::new(n);
        let mut keys = vec![u64::MAX; n];

        for _ in 0..2000 {
            let id = rng.gen_range(0..n);
            let key = rng.gen_range(0..1_000_000);
            if heap.contains_index(id) {
                if key < keys[id] {
                    keys[id] = key;
                    heap.decrease_key(Entry { key, id });
                }
            } else {
                keys[id] = key;
                heap.push(Entry { key, id });
            }
            heap.check_invariants();
        }

        let mut last = 0;
        while let Some(Entry { key, .. }) = heap.pop() {
            heap.check_invariants();
            assert!(key >= last);
            last = key;
        }
    }
}
