/*!
A max-heap over a subset of elements with fixed indices.

The heap is backed by a value store indexed by element, together with a companion vector tracking where on the heap each element currently sits.
The value store covers *every* element, whether or not the element is presently on the heap, and so doubles as the comparator: the ordering of heap elements is the ordering of their stored values.

This is the shape a variable-order heap needs:
- Variables keep an activity whether or not they are unvalued.
- A variable is inserted when it loses its value, removed when chosen, and must be reorderable in place when its activity is bumped.
*/

/// A max-heap on element indices, ordered by a value store covering all elements.
#[derive(Debug, Clone, Default)]
pub struct IndexHeap<V> {
    values: Vec<V>,
    heap: Vec<usize>,
    position: Vec<Option<usize>>,
}

impl<V: PartialOrd + Copy + Default> IndexHeap<V> {
    /// Extends the value store to cover elements up to `count`, with default values.
    pub fn grow_to(&mut self, count: usize) {
        if self.values.len() < count {
            self.values.resize(count, V::default());
            self.position.resize(count, None);
        }
    }

    /// A count of elements covered by the value store.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of elements presently on the heap.
    pub fn active_count(&self) -> usize {
        self.heap.len()
    }

    /// True exactly when no element is on the heap.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// True exactly when `element` is on the heap.
    pub fn contains(&self, element: usize) -> bool {
        self.position[element].is_some()
    }

    /// The element at `slot` on the heap, used to choose an element at random.
    pub fn element_at(&self, slot: usize) -> usize {
        self.heap[slot]
    }

    /// The stored value of `element`.
    pub fn value_of(&self, element: usize) -> V {
        self.values[element]
    }

    /// Stores `value` for `element` and restores heap order if the element is active.
    pub fn set_value(&mut self, element: usize, value: V) {
        self.values[element] = value;
        if let Some(slot) = self.position[element] {
            let slot = self.sift_up(slot);
            self.sift_down(slot);
        }
    }

    /// Applies `f` to every stored value.
    ///
    /// The heap is not re-ordered, so `f` must preserve the relative order of values (e.g. a uniform rescale).
    pub fn apply_to_all(&mut self, f: impl Fn(V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(*value);
        }
    }

    /// Puts `element` on the heap, if absent.
    /// Returns true if the element was inserted, false if it was already present.
    pub fn insert(&mut self, element: usize) -> bool {
        match self.position[element] {
            Some(_) => false,
            None => {
                let slot = self.heap.len();
                self.heap.push(element);
                self.position[element] = Some(slot);
                self.sift_up(slot);
                true
            }
        }
    }

    /// Removes `element` from the heap, if present.
    /// Returns true if the element was removed, false otherwise.
    pub fn remove(&mut self, element: usize) -> bool {
        match self.position[element] {
            None => false,
            Some(slot) => {
                let last = self.heap.len() - 1;
                self.heap.swap(slot, last);
                self.position[self.heap[slot]] = Some(slot);
                self.heap.pop();
                self.position[element] = None;
                if slot < self.heap.len() {
                    let slot = self.sift_up(slot);
                    self.sift_down(slot);
                }
                true
            }
        }
    }

    /// Removes and returns the element with the maximal value, if any.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = *self.heap.first()?;
        self.remove(max);
        Some(max)
    }

    /// Clears the heap and refills it with the given elements.
    pub fn rebuild(&mut self, elements: impl Iterator<Item = usize>) {
        for &element in &self.heap {
            self.position[element] = None;
        }
        self.heap.clear();

        for element in elements {
            self.position[element] = Some(self.heap.len());
            self.heap.push(element);
        }

        for slot in (0..self.heap.len() / 2).rev() {
            self.sift_down(slot);
        }
    }

    fn value_at_slot(&self, slot: usize) -> V {
        self.values[self.heap[slot]]
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.value_at_slot(parent) >= self.value_at_slot(slot) {
                break;
            }
            self.swap_slots(parent, slot);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let mut largest = slot;
            for child in [2 * slot + 1, 2 * slot + 2] {
                if child < self.heap.len() && self.value_at_slot(child) > self.value_at_slot(largest)
                {
                    largest = child;
                }
            }
            if largest == slot {
                break;
            }
            self.swap_slots(slot, largest);
            slot = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_of(pairs: &[(usize, i32)]) -> IndexHeap<i32> {
        let mut heap = IndexHeap::default();
        heap.grow_to(1 + pairs.iter().map(|(e, _)| *e).max().unwrap_or(0));
        for (element, value) in pairs {
            heap.set_value(*element, *value);
            heap.insert(*element);
        }
        heap
    }

    #[test]
    fn pop_order() {
        let mut heap = heap_of(&[(6, 10), (5, 20), (4, 30), (1, 60), (0, 70)]);

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), None);
    }

    #[test]
    fn reorder_in_place() {
        let mut heap = heap_of(&[(0, 1), (1, 2), (2, 3)]);

        heap.set_value(0, 9);
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(2));
        assert_eq!(heap.pop_max(), Some(1));
    }

    #[test]
    fn remove_and_reinsert() {
        let mut heap = heap_of(&[(0, 0), (1, 1), (4, 4), (5, 5), (6, 6)]);

        assert!(heap.remove(4));
        assert!(!heap.remove(4));
        assert!(heap.remove(6));

        heap.set_value(4, 10);
        assert!(heap.insert(4));
        assert!(!heap.insert(4));

        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn rebuild_from_scratch() {
        let mut heap = heap_of(&[(0, 5), (1, 6), (2, 7)]);
        heap.pop_max();

        heap.rebuild([0, 2].into_iter());
        assert_eq!(heap.active_count(), 2);
        assert!(!heap.contains(1));
        assert_eq!(heap.pop_max(), Some(2));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn sparse_growth() {
        let mut heap: IndexHeap<i32> = IndexHeap::default();
        heap.grow_to(601);
        heap.set_value(600, 10);
        heap.set_value(0, 70);
        heap.insert(600);
        heap.insert(0);

        assert_eq!(heap.count(), 601);
        assert_eq!(heap.value_of(5), 0);
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(600));
        assert_eq!(heap.pop_max(), None);
    }
}
