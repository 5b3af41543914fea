// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Placement order of the arms on the antenna.
//!
//! Arms have to come off in the reverse order they were put down, so the stack is strictly LIFO.
//! An id is never stored twice and the capacity is never exceeded; both conditions are reported
//! through [`StackError`] and leave the stack unchanged.

use heapless::Vec;

use crate::error::StackError;
use crate::motion::ChannelId;

/// Bounded LIFO of channel ids.
#[derive(Clone, Debug, Default)]
pub struct BeamStack<const N: usize> {
    items: Vec<ChannelId, N>,
}

impl<const N: usize> BeamStack<N> {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn is_present(&self, id: ChannelId) -> bool {
        self.items.contains(&id)
    }

    pub fn push(&mut self, id: ChannelId) -> Result<(), StackError> {
        if self.is_present(id) {
            return Err(StackError::Duplicate);
        }
        self.items.push(id).map_err(|_| StackError::Overflow)
    }

    /// Remove the most recently pushed id.
    #[inline]
    pub fn pop(&mut self) -> Option<ChannelId> {
        self.items.pop()
    }

    #[inline]
    pub fn peek(&self) -> Option<ChannelId> {
        self.items.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() == N
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Ids from bottom (first put) to top.
    pub fn iter(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.items.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_returns_most_recent_push() {
        let mut stack = BeamStack::<5>::new();
        assert_eq!(stack.pop(), None);

        for i in [3, 0, 2] {
            stack.push(ChannelId(i)).unwrap();
        }
        assert_eq!(stack.peek(), Some(ChannelId(2)));
        assert_eq!(stack.pop(), Some(ChannelId(2)));

        stack.push(ChannelId(4)).unwrap();
        assert_eq!(stack.pop(), Some(ChannelId(4)));
        assert_eq!(stack.pop(), Some(ChannelId(0)));
        assert_eq!(stack.pop(), Some(ChannelId(3)));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut stack = BeamStack::<5>::new();
        stack.push(ChannelId(1)).unwrap();
        assert_eq!(stack.push(ChannelId(1)), Err(StackError::Duplicate));
        assert_eq!(stack.len(), 1);
        assert!(stack.is_present(ChannelId(1)));
        assert!(!stack.is_present(ChannelId(0)));
    }

    #[test]
    fn overflow_is_reported_and_nothing_changes() {
        let mut stack = BeamStack::<2>::new();
        stack.push(ChannelId(0)).unwrap();
        stack.push(ChannelId(1)).unwrap();
        assert!(stack.is_full());

        assert_eq!(stack.push(ChannelId(2)), Err(StackError::Overflow));
        assert_eq!(stack.iter().collect::<std::vec::Vec<_>>(), [ChannelId(0), ChannelId(1)]);

        stack.clear();
        assert!(stack.is_empty());
    }
}
