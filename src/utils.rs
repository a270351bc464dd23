//! Hashing and formatting helpers shared by the collections.

use crate::prelude::*;
use std::{collections::hash_map::DefaultHasher, sync::OnceLock};

/// Hashes a single value with fixed keys.
///
/// Two equal values always get the same fingerprint, no matter which collection computes it. This
/// lets unordered collections combine the fingerprints of their entries with a commutative
/// operation and still agree on a hash.
pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A memoized hash code.
///
/// Collections hold one of these and call [`HashMemo::invalidate`] from the single method that
/// records their structural changes. The hash is then only recomputed the next time it's asked
/// for, through [`HashMemo::get_or_compute`].
#[derive(Clone, Debug, Default)]
pub struct HashMemo(OnceLock<u64>);

impl HashMemo {
    /// An empty memo.
    #[must_use]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the memoized hash, computing it with `compute` if it's stale.
    pub fn get_or_compute<F: FnOnce() -> u64>(&self, compute: F) -> u64 {
        *self.0.get_or_init(compute)
    }

    /// Marks the memoized hash as stale.
    pub fn invalidate(&mut self) {
        self.0.take();
    }

    /// Whether a hash is currently memoized.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.0.get().is_some()
    }
}

/// Writes a sequence in roster notation `{a, b, c}`, using `each` for every item.
pub(crate) fn write_roster<T, I, F>(f: &mut Formatter<'_>, iter: I, mut each: F) -> FmtResult
where
    I: IntoIterator<Item = T>,
    F: FnMut(&mut Formatter<'_>, T) -> FmtResult,
{
    f.write_str("{")?;
    let mut iter = iter.into_iter();
    if let Some(fst) = iter.next() {
        each(f, fst)?;
        for next in iter {
            f.write_str(", ")?;
            each(f, next)?;
        }
    }
    f.write_str("}")
}

#[cfg(test)]
mod utils {
    use super::*;

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(fingerprint("atom"), fingerprint(&String::from("atom")));
        assert_ne!(fingerprint(&1u32), fingerprint(&2u32));
    }

    #[test]
    fn memo() {
        let mut memo = HashMemo::new();
        assert!(!memo.is_fresh());
        assert_eq!(memo.get_or_compute(|| 7), 7);
        assert_eq!(memo.get_or_compute(|| 8), 7);
        assert!(memo.is_fresh());

        memo.invalidate();
        assert!(!memo.is_fresh());
        assert_eq!(memo.get_or_compute(|| 8), 8);
    }
}
