//! Generational slot storage for entry records
//!
//! Every record lives in a slot addressed by a [`SlotId`] that pairs the slot
//! index with the slot's generation at insertion time. Removing a record bumps
//! the generation, so any `SlotId` still held elsewhere (the expiration
//! frontier keeps them) resolves to `None` from then on, even after the slot
//! has been reused for a newer record.

/// Stable handle to a record stored in an [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SlotId {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    value: Option<T>,
}

/// Slot map with generation-checked handles and free-slot reuse
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity), free: Vec::new(), len: 0 }
    }

    /// Stores `value` and returns its handle
    pub(crate) fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.value = Some(value);
            return SlotId { index, generation: slot.generation };
        }

        let index = self.slots.len();
        self.slots.push(Slot { generation: 0, value: Some(value) });
        SlotId { index, generation: 0 }
    }

    /// Returns the record for `id` if it has not been removed since
    pub(crate) fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Removes and returns the record for `id`, invalidating every copy of
    /// the handle
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(value)
    }

    /// Drops every record, invalidating all outstanding handles
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.len = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for expiring::arena.
    use super::*;

    /// Validates `Arena::insert` and `Arena::get` for live handles.
    ///
    /// Assertions:
    /// - Confirms `arena.get(a)` equals `Some(&"a")`.
    /// - Confirms `arena.len()` equals `2`.
    #[test]
    fn test_insert_and_get() {
        let mut arena = Arena::with_capacity(2);
        let a = arena.insert("a");
        let b = arena.insert("b");

        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
    }

    /// Validates `Arena::remove` invalidates the handle even after slot
    /// reuse.
    ///
    /// Assertions:
    /// - Confirms `arena.get(old)` equals `None` after removal.
    /// - Ensures the reused slot is reachable only through the new handle.
    #[test]
    fn test_removed_handle_stays_dead_after_reuse() {
        let mut arena = Arena::with_capacity(1);
        let old = arena.insert(1);
        assert_eq!(arena.remove(old), Some(1));
        assert_eq!(arena.get(old), None);

        let new = arena.insert(2);
        assert_ne!(old, new);
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get(new), Some(&2));
        assert_eq!(arena.len(), 1);
    }

    /// Validates `Arena::remove` is a no-op for dead handles.
    ///
    /// Assertions:
    /// - Confirms the second `remove` returns `None`.
    /// - Confirms `arena.len()` equals `0`.
    #[test]
    fn test_double_remove() {
        let mut arena = Arena::with_capacity(0);
        let id = arena.insert("x");
        assert_eq!(arena.remove(id), Some("x"));
        assert_eq!(arena.remove(id), None);
        assert_eq!(arena.len(), 0);
    }

    /// Validates `Arena::clear` invalidates every outstanding handle.
    ///
    /// Assertions:
    /// - Confirms `arena.get(a)` and `arena.get(b)` equal `None`.
    /// - Confirms slots are reused after clearing.
    #[test]
    fn test_clear_invalidates_handles() {
        let mut arena = Arena::with_capacity(2);
        let a = arena.insert('a');
        let b = arena.insert('b');

        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), None);

        let c = arena.insert('c');
        assert_eq!(arena.get(c), Some(&'c'));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), None);
    }
}
