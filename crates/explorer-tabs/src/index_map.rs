//! Display order of the tab strip.
//!
//! The [`TabIndexMap`] is the only place the order of tabs is stored. It
//! keeps a positional list of ids plus a reverse map for O(1) index
//! lookup, and re-derives the reverse entries whenever positions shift.

use explorer_tabs_core::{TabError, TabId, TabResult};
use std::collections::HashMap;

/// Bidirectional mapping between tab ids and positions `[0, len)`.
///
/// # Example
///
/// ```
/// use explorer_tabs::TabIndexMap;
///
/// let mut order = TabIndexMap::new();
/// order.insert(0, 10);
/// order.insert(0, 20);
/// assert_eq!(order.index_of(10), Some(1));
/// assert_eq!(order.id_at(0).ok(), Some(20));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TabIndexMap {
    /// Tab ids in display order
    order: Vec<TabId>,
    /// Mapping from TabId to index for O(1) lookup
    indices: HashMap<TabId, usize>,
}

impl TabIndexMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        TabIndexMap {
            order: Vec::new(),
            indices: HashMap::new(),
        }
    }

    /// Inserts `id` at `index`, clamping past-the-end indices to an append.
    /// Returns the index actually used.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already present.
    pub fn insert(&mut self, index: usize, id: TabId) -> usize {
        assert!(
            !self.indices.contains_key(&id),
            "tab {} inserted into the strip twice",
            id
        );

        let index = index.min(self.order.len());
        self.order.insert(index, id);
        self.reindex_from(index);
        index
    }

    /// Removes `id`, compacting the positions after it. Returns the index
    /// it occupied.
    pub fn remove(&mut self, id: TabId) -> Option<usize> {
        let index = self.indices.remove(&id)?;
        self.order.remove(index);

        // Update indices for tabs after the removed one
        for idx in self.indices.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }

        Some(index)
    }

    /// Swaps the tabs at two positions.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::IndexOutOfRange`] if either index is invalid.
    pub fn swap(&mut self, a: usize, b: usize) -> TabResult<()> {
        self.check(a)?;
        self.check(b)?;

        self.order.swap(a, b);
        self.indices.insert(self.order[a], a);
        self.indices.insert(self.order[b], b);
        Ok(())
    }

    /// Moves `id` to `new_index` (clamped to the last position), shifting
    /// the tabs in between. Returns the old and new positions.
    pub fn move_to(&mut self, id: TabId, new_index: usize) -> Option<(usize, usize)> {
        let from = self.index_of(id)?;
        let to = new_index.min(self.order.len() - 1);

        if from != to {
            let moved = self.order.remove(from);
            self.order.insert(to, moved);
            self.reindex_from(from.min(to));
        }

        Some((from, to))
    }

    /// Position of `id`.
    #[must_use]
    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// Tab at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TabError::IndexOutOfRange`] for positions the UI made up.
    pub fn id_at(&self, index: usize) -> TabResult<TabId> {
        self.order
            .get(index)
            .copied()
            .ok_or(TabError::IndexOutOfRange {
                index,
                count: self.order.len(),
            })
    }

    #[must_use]
    pub fn contains(&self, id: TabId) -> bool {
        self.indices.contains_key(&id)
    }

    /// Ids in display order.
    #[must_use]
    pub fn ids(&self) -> &[TabId] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn check(&self, index: usize) -> TabResult<()> {
        if index < self.order.len() {
            Ok(())
        } else {
            Err(TabError::IndexOutOfRange {
                index,
                count: self.order.len(),
            })
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (idx, &id) in self.order.iter().enumerate().skip(start) {
            self.indices.insert(id, idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map_of(ids: &[TabId]) -> TabIndexMap {
        let mut map = TabIndexMap::new();
        for &id in ids {
            map.insert(map.len(), id);
        }
        map
    }

    fn assert_contiguous(map: &TabIndexMap) {
        for (idx, &id) in map.ids().iter().enumerate() {
            assert_eq!(map.index_of(id), Some(idx));
        }
        assert_eq!(map.indices.len(), map.len());
    }

    // ==================== Insert Tests ====================

    #[test]
    fn test_insert_append() {
        let map = map_of(&[1, 2, 3]);
        assert_eq!(map.ids(), &[1, 2, 3]);
        assert_contiguous(&map);
    }

    #[test]
    fn test_insert_middle_shifts_later_tabs() {
        let mut map = map_of(&[1, 2, 3]);
        assert_eq!(map.insert(1, 9), 1);
        assert_eq!(map.ids(), &[1, 9, 2, 3]);
        assert_eq!(map.index_of(3), Some(3));
        assert_contiguous(&map);
    }

    #[test]
    fn test_insert_past_end_is_clamped() {
        let mut map = map_of(&[1]);
        assert_eq!(map.insert(50, 2), 1);
        assert_eq!(map.ids(), &[1, 2]);
    }

    #[test]
    #[should_panic(expected = "inserted into the strip twice")]
    fn test_insert_duplicate_panics() {
        let mut map = map_of(&[1]);
        map.insert(0, 1);
    }

    // ==================== Remove Tests ====================

    #[test]
    fn test_remove_compacts() {
        let mut map = map_of(&[1, 2, 3]);
        assert_eq!(map.remove(2), Some(1));
        assert_eq!(map.ids(), &[1, 3]);
        assert_eq!(map.index_of(3), Some(1));
        assert!(!map.contains(2));
        assert_contiguous(&map);
    }

    #[test]
    fn test_remove_missing() {
        let mut map = map_of(&[1]);
        assert_eq!(map.remove(5), None);
        assert_eq!(map.len(), 1);
    }

    // ==================== Swap / Move Tests ====================

    #[test]
    fn test_swap() {
        let mut map = map_of(&[1, 2, 3]);
        map.swap(0, 2).expect("valid swap");
        assert_eq!(map.ids(), &[3, 2, 1]);
        assert_contiguous(&map);
    }

    #[test]
    fn test_swap_out_of_range() {
        let mut map = map_of(&[1, 2]);
        let result = map.swap(0, 2);
        assert!(matches!(
            result,
            Err(TabError::IndexOutOfRange { index: 2, count: 2 })
        ));
        assert_eq!(map.ids(), &[1, 2]);
    }

    #[test]
    fn test_move_to_right_and_left() {
        let mut map = map_of(&[1, 2, 3, 4]);
        assert_eq!(map.move_to(1, 2), Some((0, 2)));
        assert_eq!(map.ids(), &[2, 3, 1, 4]);
        assert_eq!(map.move_to(4, 0), Some((3, 0)));
        assert_eq!(map.ids(), &[4, 2, 3, 1]);
        assert_contiguous(&map);
    }

    #[test]
    fn test_move_to_clamps() {
        let mut map = map_of(&[1, 2, 3]);
        assert_eq!(map.move_to(1, 99), Some((0, 2)));
        assert_eq!(map.ids(), &[2, 3, 1]);
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_id_at_out_of_range_is_recoverable() {
        let map = map_of(&[1]);
        assert_eq!(map.id_at(0).ok(), Some(1));
        assert!(matches!(
            map.id_at(3),
            Err(TabError::IndexOutOfRange { index: 3, count: 1 })
        ));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(usize),
        Remove(usize),
        Swap(usize, usize),
        Move(usize, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..12).prop_map(Op::Insert),
            (0usize..12).prop_map(Op::Remove),
            (0usize..12, 0usize..12).prop_map(|(a, b)| Op::Swap(a, b)),
            (0usize..12, 0usize..12).prop_map(|(a, b)| Op::Move(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn prop_indices_stay_contiguous(ops in proptest::collection::vec(op(), 0..64)) {
            let mut map = TabIndexMap::new();
            let mut next_id: TabId = 1;

            for op in ops {
                match op {
                    Op::Insert(at) => {
                        map.insert(at, next_id);
                        next_id += 1;
                    }
                    Op::Remove(at) => {
                        if let Ok(id) = map.id_at(at) {
                            map.remove(id);
                        }
                    }
                    Op::Swap(a, b) => {
                        let _ = map.swap(a, b);
                    }
                    Op::Move(at, to) => {
                        if let Ok(id) = map.id_at(at) {
                            map.move_to(id, to);
                        }
                    }
                }

                for (idx, &id) in map.ids().iter().enumerate() {
                    prop_assert_eq!(map.index_of(id), Some(idx));
                }
                prop_assert_eq!(map.indices.len(), map.len());
            }
        }
    }
}
