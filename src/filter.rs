//! Predicates [`Filter`] and the lazy [`FilteringIterator`] built from them.

use crate::prelude::*;

// -------------------- Filters -------------------- //

/// A stateless predicate over items of type `T`.
///
/// Every `Fn(&T) -> bool` is a filter. Filters combine with [`Filter::and`], [`Filter::or`] and
/// [`Filter::negate`].
pub trait Filter<T: ?Sized> {
    /// Whether the item passes the filter.
    fn accept(&self, item: &T) -> bool;

    /// Accepts items passing both filters. The second filter is only asked if the first accepts.
    fn and<G: Filter<T>>(self, other: G) -> And<Self, G>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Accepts items passing either filter. The second filter is only asked if the first rejects.
    fn or<G: Filter<T>>(self, other: G) -> Or<Self, G>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    /// Accepts exactly the items this filter rejects.
    fn negate(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool> Filter<T> for F {
    fn accept(&self, item: &T) -> bool {
        self(item)
    }
}

/// Conjunction of two filters. See [`Filter::and`].
#[derive(Clone, Copy, Debug)]
pub struct And<F, G>(F, G);

impl<T: ?Sized, F: Filter<T>, G: Filter<T>> Filter<T> for And<F, G> {
    fn accept(&self, item: &T) -> bool {
        self.0.accept(item) && self.1.accept(item)
    }
}

/// Disjunction of two filters. See [`Filter::or`].
#[derive(Clone, Copy, Debug)]
pub struct Or<F, G>(F, G);

impl<T: ?Sized, F: Filter<T>, G: Filter<T>> Filter<T> for Or<F, G> {
    fn accept(&self, item: &T) -> bool {
        self.0.accept(item) || self.1.accept(item)
    }
}

/// Negation of a filter. See [`Filter::negate`].
#[derive(Clone, Copy, Debug)]
pub struct Not<F>(F);

impl<T: ?Sized, F: Filter<T>> Filter<T> for Not<F> {
    fn accept(&self, item: &T) -> bool {
        !self.0.accept(item)
    }
}

// -------------------- FilteringIterator -------------------- //

/// What a [`FilteringIterator`] knows about its next item.
#[derive(Clone, Debug)]
enum Lookahead<T> {
    /// Nothing was looked up yet.
    Pending,
    /// The next accepted item.
    Ready(T),
    /// The source ran out.
    Exhausted,
}

/// Lazily yields the items of a source iterator accepted by a [`Filter`].
///
/// Each source item is tested exactly once, and rejected items are never surfaced. Looking ahead
/// with [`FilteringIterator::has_next`] or [`FilteringIterator::peek`] tests source items until one
/// is accepted and caches it.
#[derive(Clone, Debug)]
pub struct FilteringIterator<I: Iterator, F> {
    /// The source iterator.
    source: I,
    /// The filter items must pass.
    filter: F,
    /// The cached lookahead.
    lookahead: Lookahead<I::Item>,
}

impl<I: Iterator, F: Filter<I::Item>> FilteringIterator<I, F> {
    /// Filters a source iterator.
    pub fn new(source: I, filter: F) -> Self {
        Self {
            source,
            filter,
            lookahead: Lookahead::Pending,
        }
    }

    /// Caches the next accepted item, if that wasn't done already.
    fn prime(&mut self) {
        if let Lookahead::Pending = self.lookahead {
            self.lookahead = match self.source.find(|item| self.filter.accept(item)) {
                Some(item) => Lookahead::Ready(item),
                None => Lookahead::Exhausted,
            };
        }
    }

    /// Whether another item will be yielded.
    pub fn has_next(&mut self) -> bool {
        self.prime();
        matches!(self.lookahead, Lookahead::Ready(_))
    }

    /// The next item, without consuming it.
    pub fn peek(&mut self) -> Option<&I::Item> {
        self.prime();
        match &self.lookahead {
            Lookahead::Ready(item) => Some(item),
            _ => None,
        }
    }

    /// Items can't be removed through a filtering iterator.
    ///
    /// ## Errors
    ///
    /// Always [`Error::Unsupported`].
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::Unsupported("removal through a filtering iterator"))
    }

    /// Returns the source iterator. A cached lookahead item is lost.
    pub fn into_inner(self) -> I {
        self.source
    }
}

impl<I: Iterator, F: Filter<I::Item>> Iterator for FilteringIterator<I, F> {
    type Item = I::Item;

    /// Consumes the cached item, then immediately looks up the one after it.
    fn next(&mut self) -> Option<I::Item> {
        self.prime();
        match mem::replace(&mut self.lookahead, Lookahead::Pending) {
            Lookahead::Ready(item) => {
                self.prime();
                Some(item)
            }
            _ => {
                self.lookahead = Lookahead::Exhausted;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (ready, upper) = match self.lookahead {
            Lookahead::Pending => (0, self.source.size_hint().1),
            Lookahead::Ready(_) => (1, self.source.size_hint().1),
            Lookahead::Exhausted => (0, Some(0)),
        };
        (ready, upper.and_then(|upper| upper.checked_add(ready)))
    }
}

impl<I: Iterator, F: Filter<I::Item>> std::iter::FusedIterator for FilteringIterator<I, F> {}

/// Adds [`FilterExt::filtering`] to every iterator.
pub trait FilterExt: Iterator + Sized {
    /// Lazily filters the iterator. See [`FilteringIterator`].
    fn filtering<F: Filter<Self::Item>>(self, filter: F) -> FilteringIterator<Self, F> {
        FilteringIterator::new(self, filter)
    }
}

impl<I: Iterator> FilterExt for I {}

/// Tests for [`FilteringIterator`].
#[cfg(test)]
mod filter {
    use super::*;
    use std::cell::Cell;

    /// Whether a number is even.
    fn even(n: &u32) -> bool {
        n % 2 == 0
    }

    #[test]
    fn evens() {
        let mut iter = [1, 2, 3, 4].into_iter().filtering(even);
        assert!(iter.has_next());
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.peek(), Some(&4));
        assert_eq!(iter.next(), Some(4));
        assert!(!iter.has_next());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn rejects_everything() {
        let mut iter = FilteringIterator::new(1..10, |_: &u32| false);
        assert!(!iter.has_next());
        assert_eq!(iter.peek(), None);
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }

    #[test]
    fn tests_each_item_once() {
        let calls = Cell::new(0);
        let counting = |n: &u32| {
            calls.set(calls.get() + 1);
            even(n)
        };

        let mut iter = (1..=6).filtering(counting);
        assert!(iter.has_next());
        assert!(iter.has_next());
        assert_eq!(calls.get(), 2);

        let all: Vec<_> = iter.by_ref().collect();
        assert_eq!(all, [2, 4, 6]);
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn combinators() {
        let small = |n: &u32| *n < 5;
        let picked: Vec<_> = (0..10).filtering(small.and(even)).collect();
        assert_eq!(picked, [0, 2, 4]);

        let picked: Vec<_> = (0..10).filtering(small.negate().or(|n: &u32| *n == 1)).collect();
        assert_eq!(picked, [1, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn remove_is_unsupported() {
        let mut iter = [2].into_iter().filtering(even);
        iter.next();
        assert!(matches!(iter.remove(), Err(Error::Unsupported(_))));
    }
}
