//! Hash-based multisets [`MultiHashSet`], and the [`MultiSet`] trait with the set algebra shared
//! by every multiset.

use crate::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// -------------------- Operands -------------------- //

/// The right-hand side of a multiset operation.
///
/// Multiset algorithms accept plain sets, multisets, and arbitrary sequences. The kind of
/// collection is fixed when the operand is built, and each algorithm dispatches once to a path
/// specialized for it.
#[derive(Debug, From)]
pub enum Operand<'a, E> {
    /// A plain set. Every element has quantity one.
    Set(&'a HashSet<E>),
    /// A multiset.
    Multi(&'a MultiHashSet<E>),
    /// An arbitrary sequence. Repeated elements count as repeated instances.
    Items(&'a [E]),
}

impl<E> Clone for Operand<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Operand<'_, E> {}

impl<'a, E> From<&'a Vec<E>> for Operand<'a, E> {
    fn from(items: &'a Vec<E>) -> Self {
        Self::Items(items)
    }
}

impl<'a, E, const N: usize> From<&'a [E; N]> for Operand<'a, E> {
    fn from(items: &'a [E; N]) -> Self {
        Self::Items(items)
    }
}

impl<'a, E: Eq + Hash> Operand<'a, E> {
    /// Total number of instances.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::Set(set) => set.len(),
            Self::Multi(multi) => multi.size(),
            Self::Items(items) => items.len(),
        }
    }

    /// Copies the operand into a new multiset.
    #[must_use]
    pub fn to_multiset(self) -> MultiHashSet<E>
    where
        E: Clone,
    {
        match self {
            Self::Set(set) => set.iter().cloned().collect(),
            Self::Multi(multi) => multi.clone(),
            Self::Items(items) => items.iter().cloned().collect(),
        }
    }

    /// Resolves the operand into something that answers quantity queries in constant time.
    fn counted(self) -> Counted<'a, E> {
        match self {
            Self::Set(set) => Counted::Set(set),
            Self::Multi(multi) => Counted::Multi(multi),
            Self::Items(items) => Counted::Items(items.iter().collect()),
        }
    }
}

/// An [`Operand`] whose quantities can be looked up by hashing.
enum Counted<'a, E> {
    /// See [`Operand::Set`].
    Set(&'a HashSet<E>),
    /// See [`Operand::Multi`].
    Multi(&'a MultiHashSet<E>),
    /// The sequence from [`Operand::Items`], counted.
    Items(MultiHashSet<&'a E>),
}

impl<E: Eq + Hash> Counted<'_, E> {
    /// Quantity of an element in the operand.
    fn quantity(&self, element: &E) -> usize {
        match self {
            Self::Set(set) => usize::from(set.contains(element)),
            Self::Multi(multi) => multi.quantity(element),
            Self::Items(counts) => counts.quantity(&element),
        }
    }
}

// -------------------- MultiSet -------------------- //

/// A collection where every element carries a positive quantity.
///
/// Implementors provide quantity lookups, an absolute quantity setter, bulk removal and the
/// distinct entries. Everything else, including the whole set algebra, comes as provided methods
/// built on top of those.
///
/// ## Invariants
///
/// - No element is ever stored with quantity zero.
/// - [`MultiSet::size`] is the sum of all quantities.
/// - [`MultiSet::set_size`] is the number of distinct elements.
pub trait MultiSet<E: Eq + Hash> {
    // -------------------- Basic methods -------------------- //

    /// Number of instances of an element, zero if absent.
    fn quantity(&self, element: &E) -> usize;

    /// Sets the absolute quantity of an element. A quantity of zero removes it.
    ///
    /// Returns whether the multiset changed. It doesn't if the size would overflow.
    fn set_quantity(&mut self, element: E, quantity: usize) -> bool;

    /// Removes up to `quantity` instances of an element.
    ///
    /// Returns `false` if `quantity` is zero or the element was absent.
    fn remove_many(&mut self, element: &E, quantity: usize) -> bool;

    /// Total number of instances, counting repetitions.
    fn size(&self) -> usize;

    /// Number of distinct elements.
    fn set_size(&self) -> usize;

    /// Iterates over every distinct element with its quantity.
    fn distinct<'a>(&'a self) -> impl Iterator<Item = (&'a E, usize)>
    where
        E: 'a;

    /// Whether the multiset has no elements.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether at least one instance of the element is present.
    fn contains(&self, element: &E) -> bool {
        self.quantity(element) > 0
    }

    /// Adds one instance of an element. Succeeds unless the size would overflow.
    fn add(&mut self, element: E) -> bool {
        self.add_many(element, 1)
    }

    /// Adds `quantity` instances of an element.
    ///
    /// Returns `false` and leaves the multiset untouched if `quantity` is zero, or if the quantity
    /// or the size would overflow.
    fn add_many(&mut self, element: E, quantity: usize) -> bool {
        if quantity == 0 {
            return false;
        }

        match self.quantity(&element).checked_add(quantity) {
            Some(total) if self.size().checked_add(quantity).is_some() => {
                self.set_quantity(element, total)
            }
            _ => false,
        }
    }

    /// Removes one instance of an element. Returns whether it was present.
    fn remove(&mut self, element: &E) -> bool {
        self.remove_many(element, 1)
    }

    /// The distinct elements as a plain set.
    fn to_set(&self) -> HashSet<E>
    where
        E: Clone,
    {
        self.distinct().map(|(element, _)| element.clone()).collect()
    }

    /// Copies the multiset into a [`MultiHashSet`].
    fn to_multiset(&self) -> MultiHashSet<E>
    where
        E: Clone,
    {
        let mut result = MultiHashSet::with_capacity(self.set_size());
        for (element, quantity) in self.distinct() {
            result.add_many(element.clone(), quantity);
        }
        result
    }

    // -------------------- Constructions -------------------- //

    /// Union. Each element gets the larger of both quantities.
    fn union<'a, O: Into<Operand<'a, E>>>(&self, other: O) -> MultiHashSet<E>
    where
        E: Clone + 'a,
    {
        let other: Operand<'a, E> = other.into();
        let mut result = other.to_multiset();
        for (element, quantity) in self.distinct() {
            if quantity > result.quantity(element) {
                result.set_quantity(element.clone(), quantity);
            }
        }
        result
    }

    /// Intersection. Each element gets the smaller of both quantities.
    ///
    /// When both sides know their distinct elements, only the side with fewer of them is
    /// traversed.
    fn intersection<'a, O: Into<Operand<'a, E>>>(&self, other: O) -> MultiHashSet<E>
    where
        E: Clone + 'a,
    {
        let other: Operand<'a, E> = other.into();
        let mut result = MultiHashSet::new();
        match other {
            Operand::Multi(multi) => {
                if multi.set_size() < self.set_size() {
                    for (element, quantity) in multi.distinct() {
                        result.add_many(element.clone(), quantity.min(self.quantity(element)));
                    }
                } else {
                    for (element, quantity) in self.distinct() {
                        result.add_many(element.clone(), quantity.min(multi.quantity(element)));
                    }
                }
            }
            Operand::Set(set) => {
                if set.len() < self.set_size() {
                    for element in set.iter().filter(|element| self.contains(element)) {
                        result.add(element.clone());
                    }
                } else {
                    for (element, _) in self.distinct().filter(|(el, _)| set.contains(*el)) {
                        result.add(element.clone());
                    }
                }
            }
            // Keep an instance for as long as this side has enough of them.
            Operand::Items(items) => {
                for element in items {
                    if result.quantity(element) < self.quantity(element) {
                        result.add(element.clone());
                    }
                }
            }
        }
        result
    }

    /// Sum. Quantities add up.
    fn sum<'a, O: Into<Operand<'a, E>>>(&self, other: O) -> MultiHashSet<E>
    where
        E: Clone + 'a,
    {
        let other: Operand<'a, E> = other.into();
        let mut result = self.to_multiset();
        match other {
            Operand::Set(set) => result.extend(set.iter().cloned()),
            Operand::Multi(multi) => {
                for (element, quantity) in multi.distinct() {
                    result.add_many(element.clone(), quantity);
                }
            }
            Operand::Items(items) => result.extend(items.iter().cloned()),
        }
        result
    }

    /// Asymmetric difference. Quantities subtract, stopping at zero.
    fn difference<'a, O: Into<Operand<'a, E>>>(&self, other: O) -> MultiHashSet<E>
    where
        E: Clone + 'a,
    {
        let other: Operand<'a, E> = other.into();
        let other = other.counted();
        let mut result = MultiHashSet::new();
        for (element, quantity) in self.distinct() {
            result.add_many(
                element.clone(),
                quantity.saturating_sub(other.quantity(element)),
            );
        }
        result
    }

    /// Symmetric difference. Each element gets the absolute difference of both quantities.
    fn symmetric_difference<'a, O: Into<Operand<'a, E>>>(&self, other: O) -> MultiHashSet<E>
    where
        E: Clone + 'a,
    {
        let other: Operand<'a, E> = other.into();
        let mut result = other.to_multiset();
        for (element, quantity) in self.distinct() {
            let diff = quantity.abs_diff(result.quantity(element));
            result.set_quantity(element.clone(), diff);
        }
        result
    }

    // -------------------- Relations -------------------- //

    /// Superset relation ⊇: every element of `other` appears here at least as often.
    fn superset<'a, O: Into<Operand<'a, E>>>(&self, other: O) -> bool
    where
        E: 'a,
    {
        let other: Operand<'a, E> = other.into();
        match other {
            Operand::Set(set) => {
                set.len() <= self.set_size() && set.iter().all(|element| self.contains(element))
            }
            Operand::Multi(multi) => {
                multi.set_size() <= self.set_size()
                    && multi.size() <= self.size()
                    && multi
                        .distinct()
                        .all(|(element, quantity)| quantity <= self.quantity(element))
            }
            // Count instances as they come, bailing out as soon as one is in excess.
            Operand::Items(items) => {
                if items.len() > self.size() {
                    return false;
                }

                let mut seen = MultiHashSet::new();
                items.iter().all(|element| {
                    let fits = seen.quantity(&element) < self.quantity(element);
                    seen.add(element);
                    fits
                })
            }
        }
    }

    /// Subset relation ⊆: every element here appears in `other` at least as often.
    fn subset<'a, O: Into<Operand<'a, E>>>(&self, other: O) -> bool
    where
        E: 'a,
    {
        let other: Operand<'a, E> = other.into();
        if self.size() > other.size() {
            return false;
        }

        match other {
            // A plain set can only contain single instances.
            Operand::Set(set) => self
                .distinct()
                .all(|(element, quantity)| quantity == 1 && set.contains(element)),
            Operand::Multi(multi) => {
                self.set_size() <= multi.set_size()
                    && self
                        .distinct()
                        .all(|(element, quantity)| quantity <= multi.quantity(element))
            }
            Operand::Items(_) => {
                let other = other.counted();
                self.distinct()
                    .all(|(element, quantity)| quantity <= other.quantity(element))
            }
        }
    }

    /// Whether no element appears on both sides. Traverses the side with fewer distinct elements.
    fn disjoint<'a, O: Into<Operand<'a, E>>>(&self, other: O) -> bool
    where
        E: 'a,
    {
        let other: Operand<'a, E> = other.into();
        match other {
            Operand::Set(set) => {
                if set.len() < self.set_size() {
                    !set.iter().any(|element| self.contains(element))
                } else {
                    !self.distinct().any(|(element, _)| set.contains(element))
                }
            }
            Operand::Multi(multi) => {
                if multi.set_size() < self.set_size() {
                    !multi.distinct().any(|(element, _)| self.contains(element))
                } else {
                    !self.distinct().any(|(element, _)| multi.contains(element))
                }
            }
            Operand::Items(items) => !items.iter().any(|element| self.contains(element)),
        }
    }
}

// -------------------- MultiHashSet -------------------- //

/// A [multiset](https://en.wikipedia.org/wiki/Multiset) backed by a hash map from elements to
/// their quantities.
///
/// Iteration yields every instance of an element consecutively before moving on to the next
/// distinct element. The order of distinct elements is unspecified.
///
/// ## Invariants
///
/// Every stored quantity is positive, and `size` is their sum, which never overflows. Every
/// structural change goes
/// through [`MultiHashSet::touch`], which stamps the modification and invalidates the memoized
/// hash.
#[derive(Clone)]
pub struct MultiHashSet<E> {
    /// Quantity of each distinct element.
    delegate: HashMap<E, usize>,
    /// Sum of all quantities.
    size: usize,
    /// Identifies the current state. Checked by [`Cursor`].
    stamp: u64,
    /// Memoized hash code.
    hash: HashMemo,
}

/// Source of modification stamps, shared by every multiset.
static STAMPS: AtomicU64 = AtomicU64::new(0);

/// A modification stamp no multiset has used before.
fn next_stamp() -> u64 {
    STAMPS.fetch_add(1, AtomicOrdering::Relaxed)
}

impl<E> Default for MultiHashSet<E> {
    fn default() -> Self {
        Self {
            delegate: HashMap::new(),
            size: 0,
            stamp: next_stamp(),
            hash: HashMemo::new(),
        }
    }
}

impl<E> MultiHashSet<E> {
    /// The empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The empty multiset, with room for `capacity` distinct elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            delegate: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        if !self.delegate.is_empty() {
            self.delegate.clear();
            self.size = 0;
            self.touch();
        }
    }

    /// Iterates over all instances, repetitions included.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            entries: self.delegate.iter(),
            current: None,
            remaining: self.size,
        }
    }

    /// Iterates over the distinct elements.
    pub fn elements(&self) -> hash_map::Keys<'_, E, usize> {
        self.delegate.keys()
    }

    /// Records a structural change.
    fn touch(&mut self) {
        self.stamp = next_stamp();
        self.hash.invalidate();
    }
}

impl<E: Eq + Hash + Clone> MultiHashSet<E> {
    /// A fail-fast cursor over all instances.
    ///
    /// The cursor doesn't borrow the multiset, so the multiset can still be modified while the
    /// cursor is alive. Any modification not made through [`Cursor::remove`] is reported by the
    /// next cursor call.
    #[must_use]
    pub fn cursor(&self) -> Cursor<E> {
        Cursor {
            elements: self.delegate.keys().cloned().collect::<Vec<_>>().into_iter(),
            current: None,
            stamp: self.stamp,
            removable: false,
        }
    }
}

impl<E: Eq + Hash> MultiSet<E> for MultiHashSet<E> {
    fn quantity(&self, element: &E) -> usize {
        self.delegate.get(element).copied().unwrap_or_default()
    }

    fn set_quantity(&mut self, element: E, quantity: usize) -> bool {
        let old = self.quantity(&element);
        if old == quantity {
            return false;
        }

        let Some(size) = (self.size - old).checked_add(quantity) else {
            return false;
        };

        self.size = size;
        if quantity == 0 {
            self.delegate.remove(&element);
        } else {
            self.delegate.insert(element, quantity);
        }
        self.touch();
        true
    }

    fn remove_many(&mut self, element: &E, quantity: usize) -> bool {
        if quantity == 0 {
            return false;
        }
        let Some(current) = self.delegate.get_mut(element) else {
            return false;
        };

        let removed = quantity.min(*current);
        if removed == *current {
            self.delegate.remove(element);
        } else {
            *current -= removed;
        }
        self.size -= removed;
        self.touch();
        true
    }

    fn size(&self) -> usize {
        self.size
    }

    fn set_size(&self) -> usize {
        self.delegate.len()
    }

    fn distinct<'a>(&'a self) -> impl Iterator<Item = (&'a E, usize)>
    where
        E: 'a,
    {
        self.delegate.iter().map(|(element, quantity)| (element, *quantity))
    }

    fn is_empty(&self) -> bool {
        self.delegate.is_empty()
    }

    fn add_many(&mut self, element: E, quantity: usize) -> bool {
        if quantity == 0 {
            return false;
        }

        // No quantity exceeds the size, so checking the size is enough.
        let Some(size) = self.size.checked_add(quantity) else {
            return false;
        };

        *self.delegate.entry(element).or_default() += quantity;
        self.size = size;
        self.touch();
        true
    }

    fn to_multiset(&self) -> MultiHashSet<E>
    where
        E: Clone,
    {
        self.clone()
    }
}

// -------------------- Basic traits -------------------- //

impl<E: Eq + Hash> PartialEq for MultiHashSet<E> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.delegate == other.delegate
    }
}

impl<E: Eq + Hash> Eq for MultiHashSet<E> {}

/// Hashes the entries independently of their order. The result is memoized until the next
/// structural change.
impl<E: Hash> Hash for MultiHashSet<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let hash = self.hash.get_or_compute(|| {
            self.delegate
                .iter()
                .map(|entry| fingerprint(&entry))
                .fold(0, u64::wrapping_add)
        });
        state.write_u64(hash);
    }
}

impl<E: Eq + Hash> FromIterator<E> for MultiHashSet<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<E: Eq + Hash> Extend<E> for MultiHashSet<E> {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<E: Eq + Hash, const N: usize> From<[E; N]> for MultiHashSet<E> {
    fn from(array: [E; N]) -> Self {
        array.into_iter().collect()
    }
}

/// Writes every instance, e.g. `{a, b, b, c}`.
impl<E: Debug> Debug for MultiHashSet<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Roster notation with every instance, e.g. `{a, b, b, c}`.
impl<E: Display> Display for MultiHashSet<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_roster(f, self.iter(), |f, element| write!(f, "{element}"))
    }
}

// -------------------- Iterators -------------------- //

/// Iterator over the instances of a [`MultiHashSet`]. See [`MultiHashSet::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, E> {
    /// The distinct entries.
    entries: hash_map::Iter<'a, E, usize>,
    /// The element being repeated, and how many more times.
    current: Option<(&'a E, usize)>,
    /// Instances left overall.
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        loop {
            if let Some((element, left)) = &mut self.current {
                if *left > 0 {
                    *left -= 1;
                    self.remaining -= 1;
                    return Some(*element);
                }
            }

            let (element, quantity) = self.entries.next()?;
            self.current = Some((element, *quantity));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> std::iter::FusedIterator for Iter<'_, E> {}

impl<'a, E> IntoIterator for &'a MultiHashSet<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

/// Owning iterator over the instances of a [`MultiHashSet`]. Repeated instances are clones.
#[derive(Debug)]
pub struct IntoIter<E> {
    /// The distinct entries.
    entries: hash_map::IntoIter<E, usize>,
    /// The element being repeated, and how many more times.
    current: Option<(E, usize)>,
    /// Instances left overall.
    remaining: usize,
}

impl<E: Clone> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        loop {
            match self.current.take() {
                // Hand out the last instance itself.
                Some((element, 1)) => {
                    self.remaining -= 1;
                    return Some(element);
                }
                Some((element, left)) => {
                    let next = element.clone();
                    self.current = Some((element, left - 1));
                    self.remaining -= 1;
                    return Some(next);
                }
                None => self.current = Some(self.entries.next()?),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E: Clone> ExactSizeIterator for IntoIter<E> {}

impl<E: Clone> IntoIterator for MultiHashSet<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> IntoIter<E> {
        IntoIter {
            entries: self.delegate.into_iter(),
            current: None,
            remaining: self.size,
        }
    }
}

// -------------------- Cursor -------------------- //

/// A fail-fast cursor over the instances of a [`MultiHashSet`]. See [`MultiHashSet::cursor`].
///
/// The distinct elements are snapshotted on creation. Each call checks the modification stamp of
/// the multiset it's given, and fails with [`Error::ConcurrentModification`] if anything other
/// than the cursor itself changed it.
///
/// Stamps are never reused across multisets, so a cursor also fails on any multiset other than
/// its source. Only an untouched clone of the source shares its stamp.
#[derive(Clone, Debug)]
pub struct Cursor<E> {
    /// Distinct elements still to visit.
    elements: std::vec::IntoIter<E>,
    /// The element last returned, and how many more of its instances remain.
    current: Option<(E, usize)>,
    /// The last modification stamp the cursor knows about.
    stamp: u64,
    /// Whether the last returned instance may be removed.
    removable: bool,
}

impl<E: Eq + Hash + Clone> Cursor<E> {
    /// Fails if `set` was modified since the cursor last looked at it.
    fn check(&self, set: &MultiHashSet<E>) -> Result<()> {
        if set.stamp == self.stamp {
            Ok(())
        } else {
            log::trace!(
                "cursor expected stamp {}, multiset is at {}",
                self.stamp,
                set.stamp
            );
            Err(Error::ConcurrentModification)
        }
    }

    /// Advances to the next instance. Returns `Ok(None)` once every instance was visited.
    ///
    /// ## Errors
    ///
    /// [`Error::ConcurrentModification`] if `set` was modified outside this cursor.
    pub fn next(&mut self, set: &MultiHashSet<E>) -> Result<Option<E>> {
        self.check(set)?;
        loop {
            if let Some((element, left)) = &mut self.current {
                if *left > 0 {
                    *left -= 1;
                    self.removable = true;
                    return Ok(Some(element.clone()));
                }
            }

            if let Some(element) = self.elements.next() {
                let quantity = set.quantity(&element);
                self.current = Some((element, quantity));
            } else {
                self.current = None;
                self.removable = false;
                return Ok(None);
            }
        }
    }

    /// Removes the instance last returned by [`Cursor::next`] from `set`.
    ///
    /// ## Errors
    ///
    /// - [`Error::ConcurrentModification`] if `set` was modified outside this cursor.
    /// - [`Error::IllegalState`] if no instance was returned since the last removal.
    pub fn remove(&mut self, set: &mut MultiHashSet<E>) -> Result<()> {
        self.check(set)?;
        let element = match &self.current {
            Some((element, _)) if self.removable => element,
            _ => return Err(Error::IllegalState("remove must follow a call to next")),
        };

        set.remove(element);
        self.stamp = set.stamp;
        self.removable = false;
        Ok(())
    }
}

/// Tests for [`MultiHashSet`].
#[cfg(test)]
mod mset {
    use super::*;

    /// The multiset `{a, a, b, c, c, c}`.
    fn sample() -> MultiHashSet<char> {
        "aabccc".chars().collect()
    }

    #[test]
    fn seeded() {
        let set = MultiHashSet::from(['a', 'a', 'b']);
        assert_eq!(set.quantity(&'a'), 2);
        assert_eq!(set.quantity(&'b'), 1);
        assert_eq!(set.quantity(&'z'), 0);
        assert_eq!(set.size(), 3);
        assert_eq!(set.set_size(), 2);
    }

    #[test]
    fn add_and_remove() {
        let mut set = sample();
        assert!(set.add('d'));
        assert!(set.add_many('a', 3));
        assert!(!set.add_many('a', 0));
        assert_eq!(set.quantity(&'a'), 5);
        assert_eq!(set.size(), 10);

        assert!(set.remove_many(&'c', 10));
        assert!(!set.contains(&'c'));
        assert!(!set.remove_many(&'a', 0));
        assert!(!set.remove(&'z'));
        assert!(set.remove(&'d'));
        assert_eq!(set.size(), 6);
        assert_eq!(set.set_size(), 2);
    }

    #[test]
    fn set_quantity() {
        let mut set = sample();
        assert!(!set.set_quantity('a', 2));
        assert!(set.set_quantity('a', 7));
        assert_eq!(set.size(), 11);
        assert!(set.set_quantity('b', 0));
        assert!(!set.contains(&'b'));
        assert!(!set.set_quantity('z', 0));
        assert_eq!(set.size(), 10);
    }

    #[test]
    fn algebra() {
        let fst = sample();
        let snd: MultiHashSet<char> = "abbd".chars().collect();

        let union = fst.union(&snd);
        assert_eq!(union, "aabbcccd".chars().collect());
        assert_eq!(fst.intersection(&snd), "ab".chars().collect());
        assert_eq!(fst.sum(&snd), "aaabbbcccd".chars().collect());
        assert_eq!(fst.difference(&snd), "accc".chars().collect());
        assert_eq!(snd.difference(&fst), "bd".chars().collect());
        assert_eq!(fst.symmetric_difference(&snd), "abcccd".chars().collect());
    }

    #[test]
    fn algebra_with_items() {
        let fst = sample();
        let items = vec!['a', 'c', 'c', 'c', 'c', 'e'];

        assert_eq!(fst.union(&items), "aabcccce".chars().collect());
        assert_eq!(fst.intersection(&items), "accc".chars().collect());
        assert_eq!(fst.difference(&items), "ab".chars().collect());
        assert!(!fst.subset(&items));
        assert!(fst.superset(&['c', 'a', 'c']));
        assert!(!fst.superset(&['b', 'b']));
    }

    #[test]
    fn relations_with_sets() {
        let fst = sample();
        let set: HashSet<char> = "abc".chars().collect();

        assert!(fst.superset(&set));
        assert!(!fst.subset(&set));
        assert!(fst.to_multiset().intersection(&set).subset(&set));
        assert!(!fst.disjoint(&set));
        assert!(fst.disjoint(&"xyz".chars().collect::<HashSet<_>>()));
        assert_eq!(fst.to_set(), set);
    }

    #[test]
    fn relations() {
        let fst = sample();
        let snd: MultiHashSet<char> = "acc".chars().collect();

        assert!(fst.superset(&snd));
        assert!(snd.subset(&fst));
        assert!(!snd.superset(&fst));
        assert!(!fst.subset(&snd));
        assert!(fst.superset(&MultiHashSet::new()));
        assert!(MultiHashSet::<char>::new().subset(&fst));
        assert!(snd.disjoint(&MultiHashSet::from(['b'])));
    }

    #[test]
    fn consecutive_iteration() {
        let set = sample();
        let items: Vec<_> = set.iter().copied().collect();
        assert_eq!(items.len(), 6);
        assert_eq!(set.iter().len(), 6);

        // Equal instances must be adjacent.
        let mut runs = items.clone();
        runs.dedup();
        assert_eq!(runs.len(), 3);

        let mut owned: Vec<_> = set.into_iter().collect();
        owned.sort_unstable();
        assert_eq!(owned, ['a', 'a', 'b', 'c', 'c', 'c']);
    }

    #[test]
    fn display() {
        assert_eq!(MultiHashSet::<u8>::new().to_string(), "{}");
        assert_eq!(MultiHashSet::from([4, 4]).to_string(), "{4, 4}");

        let shown = MultiHashSet::from(['b', 'a', 'b']).to_string();
        assert!(shown == "{a, b, b}" || shown == "{b, b, a}", "{shown}");
    }

    #[test]
    fn eq_and_hash() {
        let fst = sample();
        let mut snd: MultiHashSet<char> = "cbcaca".chars().collect();
        assert_eq!(fst, snd);
        assert_eq!(fingerprint(&fst), fingerprint(&snd));

        snd.add('a');
        assert_ne!(fst, snd);
        assert_ne!(fingerprint(&fst), fingerprint(&snd));
        snd.remove(&'a');
        assert_eq!(fingerprint(&fst), fingerprint(&snd));
    }

    #[test]
    fn cursor_removes_own_instances() {
        let mut set = sample();
        let mut cursor = set.cursor();
        let mut seen = 0;

        while let Some(element) = cursor.next(&set).unwrap() {
            seen += 1;
            if element == 'c' {
                cursor.remove(&mut set).unwrap();
            }
        }

        assert_eq!(seen, 6);
        assert_eq!(set, "aab".chars().collect());
    }

    #[test]
    fn cursor_fails_fast() {
        let mut set = sample();
        let mut cursor = set.cursor();
        assert!(cursor.next(&set).unwrap().is_some());

        set.add('z');
        assert_eq!(cursor.next(&set), Err(Error::ConcurrentModification));
        assert_eq!(cursor.remove(&mut set), Err(Error::ConcurrentModification));
    }

    #[test]
    fn cursor_protocol() {
        let mut set = sample();
        let mut cursor = set.cursor();
        assert!(matches!(
            cursor.remove(&mut set),
            Err(Error::IllegalState(_))
        ));

        cursor.next(&set).unwrap();
        cursor.remove(&mut set).unwrap();
        assert!(matches!(
            cursor.remove(&mut set),
            Err(Error::IllegalState(_))
        ));
    }

    #[test]
    fn cursor_rejects_other_sets() {
        let source = MultiHashSet::from(['x']);
        let other = MultiHashSet::from(['y']);
        let mut cursor = source.cursor();
        assert_eq!(cursor.next(&other), Err(Error::ConcurrentModification));

        let mut fresh = MultiHashSet::new();
        let mut cursor = MultiHashSet::<char>::new().cursor();
        assert_eq!(cursor.remove(&mut fresh), Err(Error::ConcurrentModification));
    }

    #[test]
    fn quantities_saturate() {
        let mut set = MultiHashSet::new();
        assert!(set.add_many('a', usize::MAX));
        assert!(!set.add('a'));
        assert!(!set.add('b'));
        assert!(!set.set_quantity('b', 1));
        assert_eq!(set.quantity(&'a'), usize::MAX);
        assert_eq!(set.quantity(&'b'), 0);
        assert_eq!(set.size(), usize::MAX);

        assert!(set.remove(&'a'));
        assert!(set.add('b'));
        assert_eq!(set.size(), usize::MAX);
        assert_eq!(set.set_size(), 2);
    }
}
