//! Fixed-capacity circular sequence.
//!
//! Slots are allocated once when the buffer is built and then overwritten
//! in place, so pushing never allocates. Once every slot has been written,
//! each push replaces the oldest element.

use std::iter::Chain;
use std::slice::{Iter, IterMut};

/// A fixed-capacity ring of pre-allocated slots.
///
/// Iteration runs from the oldest to the newest element; call `.rev()` on
/// the iterator to walk from the newest to the oldest.
#[derive(Debug, Clone)]
pub struct RingBuffer<E> {
    slots: Vec<E>,
    /// Index of the slot written by the next push
    end: usize,
    /// Number of valid elements
    len: usize,
}

impl<E> RingBuffer<E> {
    /// Creates a ring whose capacity is the number of given slots.
    ///
    /// The slots start out invalid; they only provide storage.
    pub fn from_slots(slots: Vec<E>) -> Self {
        Self {
            slots,
            end: 0,
            len: 0,
        }
    }

    /// Creates a ring of `capacity` slots built by `make_slot`.
    pub fn with_capacity_by<F>(capacity: usize, make_slot: F) -> Self
    where
        F: FnMut() -> E,
    {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, make_slot);
        Self::from_slots(slots)
    }

    /// Maximum number of elements held.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of valid elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no element has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true once every slot holds a valid element.
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Claims the slot for a new newest element and returns it for overwriting.
    ///
    /// When the ring is full the claimed slot is the one that held the oldest
    /// element.
    ///
    /// # Panics
    ///
    /// Panics if the ring has zero capacity.
    pub fn push_slot(&mut self) -> &mut E {
        assert!(!self.slots.is_empty(), "push into a zero-capacity ring");
        let index = self.end;
        self.end = (self.end + 1) % self.slots.len();
        self.len = (self.len + 1).min(self.slots.len());
        &mut self.slots[index]
    }

    /// Pushes a new newest element, overwriting the oldest when full.
    pub fn push(&mut self, value: E) {
        *self.push_slot() = value;
    }

    /// The most recently pushed element.
    pub fn newest(&self) -> Option<&E> {
        if self.is_empty() {
            return None;
        }
        let index = (self.end + self.slots.len() - 1) % self.slots.len();
        self.slots.get(index)
    }

    /// The oldest valid element.
    pub fn oldest(&self) -> Option<&E> {
        self.iter().next()
    }

    /// Iterates from the oldest to the newest element.
    pub fn iter(&self) -> Chain<Iter<'_, E>, Iter<'_, E>> {
        let (newer, older) = self.slots.split_at(self.end);
        // Before the first wrap `end == len` and `older` holds no valid slot.
        older[..self.len - self.end].iter().chain(newer.iter())
    }

    /// Mutably iterates from the oldest to the newest element.
    pub fn iter_mut(&mut self) -> Chain<IterMut<'_, E>, IterMut<'_, E>> {
        let valid_older = self.len - self.end;
        let (newer, older) = self.slots.split_at_mut(self.end);
        older[..valid_older].iter_mut().chain(newer.iter_mut())
    }
}

impl<'a, E> IntoIterator for &'a RingBuffer<E> {
    type Item = &'a E;
    type IntoIter = Chain<Iter<'a, E>, Iter<'a, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
