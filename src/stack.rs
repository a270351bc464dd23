//! Stacks with save and restore points, [`MarkableStack`].

use crate::prelude::*;

/// A stack whose size can be saved with [`MarkableStack::mark`] and restored with
/// [`MarkableStack::unwind`], for tracking nested scopes.
///
/// Marks are expected to bracket every push and pop. Working outside of a mark, popping below the
/// active mark, or unwinding a stack that grew within its mark are caller bugs. They're logged as
/// warnings, and the operation goes through anyway.
///
/// Iterating goes from the bottom of the stack to the top.
#[derive(Clone, Debug)]
pub struct MarkableStack<E> {
    /// The stack, top last.
    items: Vec<E>,
    /// Saved stack sizes, innermost last.
    marks: SmallVec<usize>,
}

impl<E> Default for MarkableStack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MarkableStack<E> {
    /// An empty stack with no marks.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// An empty stack with no marks and room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            marks: SmallVec::new(),
        }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of active marks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.marks.len()
    }

    /// The top item.
    #[must_use]
    pub fn peek(&self) -> Option<&E> {
        self.items.last()
    }

    /// Iterates from the bottom of the stack to the top.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    /// Saves the current size.
    pub fn mark(&mut self) {
        self.marks.push(self.items.len());
    }

    /// Drops the innermost mark, truncating the stack back to the size it saved.
    ///
    /// Returns the number of items discarded. Items pushed within the mark should have been popped
    /// already, so anything discarded is logged.
    pub fn unwind(&mut self) -> usize {
        let Some(mark) = self.marks.pop() else {
            log::warn!("unwinding a stack without an active mark");
            return 0;
        };

        let len = self.items.len();
        match len.cmp(&mark) {
            std::cmp::Ordering::Greater => {
                log::warn!("unwinding discards {} items above the mark", len - mark);
                self.items.truncate(mark);
                len - mark
            }
            std::cmp::Ordering::Less => {
                log::warn!("stack was popped {} items below its mark", mark - len);
                0
            }
            std::cmp::Ordering::Equal => 0,
        }
    }

    /// Pushes an item on top.
    pub fn push(&mut self, item: E) {
        if self.marks.is_empty() {
            log::warn!("pushing onto a stack outside of a marked scope");
        }
        self.items.push(item);
    }

    /// Pops the top item.
    pub fn pop(&mut self) -> Option<E> {
        match self.marks.last() {
            None => log::warn!("popping from a stack outside of a marked scope"),
            Some(&mark) if self.items.len() <= mark => {
                log::warn!("popping below the active mark at {mark}");
            }
            Some(_) => {}
        }
        self.items.pop()
    }

    /// Removes every item and every mark.
    pub fn clear(&mut self) {
        self.items.clear();
        self.marks.clear();
    }
}

impl<'a, E> IntoIterator for &'a MarkableStack<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Iterates from the bottom of the stack to the top, dropping the marks.
impl<E> IntoIterator for MarkableStack<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Tests for [`MarkableStack`].
#[cfg(test)]
mod stack {
    use super::*;

    /// Shows diagnostics when running with `RUST_LOG`.
    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn unwind_restores_size() {
        init_logging();
        let mut stack = MarkableStack::new();
        stack.mark();
        stack.push('w');

        stack.mark();
        stack.push('x');
        stack.push('y');
        assert_eq!(stack.unwind(), 2);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek(), Some(&'w'));

        assert_eq!(stack.pop(), Some('w'));
        assert_eq!(stack.unwind(), 0);
        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn balanced_scopes() {
        init_logging();
        let mut stack = MarkableStack::new();
        stack.mark();
        for n in 0..3 {
            stack.push(n);
        }
        stack.mark();
        stack.push(3);
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.unwind(), 0);

        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!((&stack).into_iter().count(), 3);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn misuse_still_goes_through() {
        init_logging();
        let mut stack = MarkableStack::new();
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.unwind(), 0);
        assert_eq!(stack.pop(), Some(2));

        stack.mark();
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.unwind(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn clear() {
        let mut stack: MarkableStack<_> = MarkableStack::with_capacity(4);
        stack.mark();
        stack.push("a");
        stack.mark();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.into_iter().count(), 0);
    }
}
