//! Expiration frontier: a min-heap of pending deadlines
//!
//! Each entry pairs a deadline with the [`SlotId`] of the record it was
//! pushed for. The frontier never owns records and is never updated when a
//! record is overwritten or erased; the purge pass resolves each popped
//! handle against the arena and drops the ones that no longer resolve.
//!
//! # Complexity
//! - `push`: `O(log n)`
//! - `pop`: `O(log n)`
//! - `peek`: `O(1)`

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::arena::SlotId;

/// A deadline waiting to be checked by the purge pass
///
/// Ordered by deadline first; the slot only breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Pending {
    pub(crate) deadline: i64,
    pub(crate) slot: SlotId,
}

#[derive(Debug, Default)]
pub(crate) struct Frontier(BinaryHeap<Reverse<Pending>>);

impl Frontier {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self(BinaryHeap::with_capacity(capacity))
    }

    pub(crate) fn push(&mut self, deadline: i64, slot: SlotId) {
        self.0.push(Reverse(Pending { deadline, slot }));
    }

    /// Earliest pending deadline without removing it
    pub(crate) fn peek(&self) -> Option<Pending> {
        self.0.peek().map(|Reverse(pending)| *pending)
    }

    pub(crate) fn pop(&mut self) -> Option<Pending> {
        self.0.pop().map(|Reverse(pending)| pending)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}
