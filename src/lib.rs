//! # Multisets and nested sets
//!
//! In-memory collections with set algebra:
//!
//! - [`MultiHashSet`](mset::MultiHashSet), a hash-based multiset (bag) where every element
//!   carries a quantity.
//! - [`NestedHashSet`](nested::NestedHashSet), a set of sets which keeps a flattened multiset of
//!   all of its atoms in step with its elementary sets.
//! - [`FilteringIterator`](filter::FilteringIterator), a lazy iterator adapter driven by a
//!   [`Filter`](filter::Filter).
//! - [`IntegerMap`](int_map::IntegerMap), a chained hash map keyed by primitive integers.
//! - [`MarkableStack`](stack::MarkableStack), a stack with save and restore marks for nested
//!   scopes.
//!
//! None of these types lock internally. Wrap them yourself if you need to share them across
//! threads.

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod error;
pub mod filter;
pub mod int_map;
pub mod mset;
pub mod nested;
pub mod prelude;
pub mod stack;
pub mod utils;


/// Small vector.
type SmallVec<T> = smallvec::SmallVec<[T; 4]>;

/// A seal for [`NestedSet`](nested::NestedSet), avoiding foreign implementations.
trait Seal {}
