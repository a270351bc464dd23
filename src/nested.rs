//! Nested sets [`NestedHashSet`]: sets whose elements are themselves sets.
//!
//! Each set contained in a nested set is called an *elementary set*, and the values contained in
//! elementary sets are called *atoms*. Besides the elementary sets, a nested set keeps a flattened
//! [`MultiHashSet`] counting, for every atom, how many elementary sets contain it.

use crate::prelude::*;

/// Builds an elementary set out of a collection of atoms.
///
/// ## Errors
///
/// [`Error::NotASet`] if an atom is repeated.
fn elementary<E: Ord, I: IntoIterator<Item = E>>(atoms: I) -> Result<BTreeSet<E>> {
    let mut set = BTreeSet::new();
    for atom in atoms {
        if !set.insert(atom) {
            return Err(Error::NotASet);
        }
    }
    Ok(set)
}

// -------------------- NestedSet -------------------- //

/// A set of sets.
///
/// Implementors provide the elementary sets, membership and the transactional mutations that keep
/// the flattened view in step. The queries across both structures come as provided methods.
///
/// The trait is sealed so that the flattened view can be trusted by the provided methods.
#[allow(private_bounds)]
pub trait NestedSet<E: Ord + Hash + Clone>: crate::Seal {
    // -------------------- Basic methods -------------------- //

    /// Iterates over the elementary sets.
    fn elementary_sets<'a>(&'a self) -> impl Iterator<Item = &'a BTreeSet<E>>
    where
        E: 'a;

    /// The flattened view: the quantity of an atom is the number of elementary sets containing it.
    fn flat(&self) -> &MultiHashSet<E>;

    /// Number of elementary sets.
    fn len(&self) -> usize;

    /// Adds an elementary set. Returns whether it was absent.
    fn insert(&mut self, set: BTreeSet<E>) -> bool;

    /// Removes an elementary set. Returns whether it was present.
    fn remove(&mut self, set: &BTreeSet<E>) -> bool;

    /// Whether an elementary set is contained. Atoms are not looked at.
    fn contains(&self, set: &BTreeSet<E>) -> bool;

    /// Whether there are no elementary sets.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds the elementary set made up of `atoms`.
    ///
    /// ## Errors
    ///
    /// [`Error::NotASet`] if an atom is repeated. The nested set is left untouched.
    fn try_insert<I: IntoIterator<Item = E>>(&mut self, atoms: I) -> Result<bool> {
        Ok(self.insert(elementary(atoms)?))
    }

    /// Removes the elementary set made up of `atoms`.
    ///
    /// ## Errors
    ///
    /// [`Error::NotASet`] if an atom is repeated. The nested set is left untouched.
    fn try_remove<I: IntoIterator<Item = E>>(&mut self, atoms: I) -> Result<bool> {
        Ok(self.remove(&elementary(atoms)?))
    }

    /// Whether the elementary set made up of `atoms` is contained.
    ///
    /// ## Errors
    ///
    /// [`Error::NotASet`] if an atom is repeated.
    fn try_contains<I: IntoIterator<Item = E>>(&self, atoms: I) -> Result<bool> {
        Ok(self.contains(&elementary(atoms)?))
    }

    /// Whether some elementary set contains the atom.
    fn contains_atom(&self, atom: &E) -> bool {
        self.flat().contains(atom)
    }

    /// Every atom once.
    fn to_set(&self) -> BTreeSet<E> {
        self.flat().elements().cloned().collect()
    }

    /// Every atom, as many times as there are elementary sets containing it.
    fn to_multiset(&self) -> MultiHashSet<E> {
        self.flat().clone()
    }

    // -------------------- Queries -------------------- //

    /// The elementary sets containing the atom.
    fn containing_sets(&self, atom: &E) -> NestedHashSet<E> {
        if !self.contains_atom(atom) {
            return NestedHashSet::new();
        }

        self.elementary_sets()
            .filter(|set| set.contains(atom))
            .cloned()
            .collect()
    }

    /// The elementary sets which are supersets of `query`.
    ///
    /// An empty query gives back every elementary set.
    fn supersets(&self, query: &BTreeSet<E>) -> NestedHashSet<E> {
        if query.is_empty() {
            return self.elementary_sets().cloned().collect();
        }
        if !query.iter().all(|atom| self.contains_atom(atom)) {
            return NestedHashSet::new();
        }

        self.elementary_sets()
            .filter(|set| set.len() >= query.len() && query.is_subset(set))
            .cloned()
            .collect()
    }

    /// The elementary sets which are subsets of `query`.
    fn subsets(&self, query: &BTreeSet<E>) -> NestedHashSet<E> {
        // Only the empty elementary set can avoid every atom.
        if !query.iter().any(|atom| self.contains_atom(atom)) {
            let mut result = NestedHashSet::new();
            let empty = BTreeSet::new();
            if self.contains(&empty) {
                result.insert(empty);
            }
            return result;
        }

        self.elementary_sets()
            .filter(|set| set.len() <= query.len() && set.is_subset(query))
            .cloned()
            .collect()
    }

    /// The elementary sets which are supersets of `query`, for many large elementary sets.
    ///
    /// Query atoms are visited from the rarest to the most common, as counted by the flattened
    /// view, and every atom narrows down a bit mask of candidates. Rare atoms thus rule out most
    /// elementary sets after only a few containment checks.
    fn sorted_array_supersets(&self, query: &BTreeSet<E>) -> NestedHashSet<E> {
        if query.is_empty() {
            return self.elementary_sets().cloned().collect();
        }

        let mut atoms: SmallVec<(&E, usize)> = query
            .iter()
            .map(|atom| (atom, self.flat().quantity(atom)))
            .collect();
        if atoms.iter().any(|&(_, quantity)| quantity == 0) {
            return NestedHashSet::new();
        }
        atoms.sort_unstable_by_key(|&(_, quantity)| quantity);

        let sets: Vec<_> = self
            .elementary_sets()
            .filter(|set| set.len() >= query.len())
            .collect();
        let mut candidates = bitvec![1; sets.len()];

        for (atom, _) in atoms {
            let mut remaining = 0;
            for (index, mut bit) in candidates.iter_mut().enumerate() {
                if *bit {
                    if sets[index].contains(atom) {
                        remaining += 1;
                    } else {
                        *bit = false;
                    }
                }
            }

            if remaining == 0 {
                log::debug!("superset search ran out of candidates");
                return NestedHashSet::new();
            }
        }

        candidates
            .iter_ones()
            .map(|index| sets[index].clone())
            .collect()
    }
}

// -------------------- NestedHashSet -------------------- //

/// A set of [`BTreeSet`]s, backed by a hash set, together with a flattened [`MultiHashSet`] of all
/// of their atoms.
///
/// ## Invariants
///
/// The flattened view always equals the sum of all elementary sets. Besides `clear`, only the
/// private insertion and removal helpers touch both structures, and they update them together.
#[derive(Clone)]
pub struct NestedHashSet<E> {
    /// The elementary sets.
    sets: HashSet<BTreeSet<E>>,
    /// The flattened view.
    flat: MultiHashSet<E>,
    /// Memoized hash code.
    hash: HashMemo,
}

impl<E> Default for NestedHashSet<E> {
    fn default() -> Self {
        Self {
            sets: HashSet::new(),
            flat: MultiHashSet::new(),
            hash: HashMemo::new(),
        }
    }
}

impl<E> NestedHashSet<E> {
    /// The empty nested set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The empty nested set, with room for `capacity` elementary sets.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sets: HashSet::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Iterates over the elementary sets.
    pub fn iter(&self) -> std::collections::hash_set::Iter<'_, BTreeSet<E>> {
        self.sets.iter()
    }

    /// Removes every elementary set.
    pub fn clear(&mut self) {
        self.sets.clear();
        self.flat.clear();
        self.hash.invalidate();
    }
}

impl<E: Ord + Hash + Clone> NestedHashSet<E> {
    /// Adds an elementary set and its atoms.
    fn insert_inner(&mut self, set: BTreeSet<E>) -> bool {
        if self.sets.contains(&set) {
            return false;
        }

        self.flat.extend(set.iter().cloned());
        self.sets.insert(set);
        self.hash.invalidate();
        true
    }

    /// Removes an elementary set and its atoms.
    fn remove_inner(&mut self, set: &BTreeSet<E>) -> bool {
        let Some(set) = self.sets.take(set) else {
            return false;
        };

        for atom in &set {
            self.flat.remove(atom);
        }
        self.hash.invalidate();
        true
    }

    /// Keeps only the elementary sets satisfying the predicate.
    pub fn retain<P: FnMut(&BTreeSet<E>) -> bool>(&mut self, mut pred: P) {
        let doomed: Vec<_> = self.sets.iter().filter(|set| !pred(set)).cloned().collect();
        for set in &doomed {
            self.remove_inner(set);
        }
    }
}

impl<E> crate::Seal for NestedHashSet<E> {}

impl<E: Ord + Hash + Clone> NestedSet<E> for NestedHashSet<E> {
    fn elementary_sets<'a>(&'a self) -> impl Iterator<Item = &'a BTreeSet<E>>
    where
        E: 'a,
    {
        self.sets.iter()
    }

    fn flat(&self) -> &MultiHashSet<E> {
        &self.flat
    }

    fn len(&self) -> usize {
        self.sets.len()
    }

    fn insert(&mut self, set: BTreeSet<E>) -> bool {
        self.insert_inner(set)
    }

    fn remove(&mut self, set: &BTreeSet<E>) -> bool {
        self.remove_inner(set)
    }

    fn contains(&self, set: &BTreeSet<E>) -> bool {
        self.sets.contains(set)
    }
}

// -------------------- Basic traits -------------------- //

impl<'a, E> IntoIterator for &'a NestedHashSet<E> {
    type Item = &'a BTreeSet<E>;
    type IntoIter = std::collections::hash_set::Iter<'a, BTreeSet<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}

impl<E> IntoIterator for NestedHashSet<E> {
    type Item = BTreeSet<E>;
    type IntoIter = std::collections::hash_set::IntoIter<BTreeSet<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.into_iter()
    }
}

impl<E: Eq + Hash> PartialEq for NestedHashSet<E> {
    fn eq(&self, other: &Self) -> bool {
        self.sets == other.sets
    }
}

impl<E: Eq + Hash> Eq for NestedHashSet<E> {}

/// Hashes the elementary sets independently of their order. The result is memoized until the
/// next structural change.
impl<E: Hash> Hash for NestedHashSet<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let hash = self.hash.get_or_compute(|| {
            self.sets
                .iter()
                .map(fingerprint)
                .fold(0, u64::wrapping_add)
        });
        state.write_u64(hash);
    }
}

impl<E: Ord + Hash + Clone> FromIterator<BTreeSet<E>> for NestedHashSet<E> {
    fn from_iter<T: IntoIterator<Item = BTreeSet<E>>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<E: Ord + Hash + Clone> Extend<BTreeSet<E>> for NestedHashSet<E> {
    fn extend<T: IntoIterator<Item = BTreeSet<E>>>(&mut self, iter: T) {
        for set in iter {
            self.insert_inner(set);
        }
    }
}

impl<E: Debug> Debug for NestedHashSet<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(&self.sets).finish()
    }
}

/// Roster notation, e.g. `{{1, 2}, {2, 3}}`.
impl<E: Display> Display for NestedHashSet<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_roster(f, &self.sets, |f, set| {
            write_roster(f, set, |f, atom| write!(f, "{atom}"))
        })
    }
}
