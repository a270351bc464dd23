//! A hash map keyed by primitive integers, [`IntegerMap`].

use crate::prelude::*;

/// Buckets in a map built with [`IntegerMap::new`].
const DEFAULT_CAPACITY: usize = 20;

/// Load factor of a map built with [`IntegerMap::new`].
const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// A key-value pair, linked to the next pair in its bucket.
#[derive(Clone, Debug)]
struct Node<V> {
    /// The key.
    key: i32,
    /// The value.
    value: V,
    /// The rest of the bucket.
    next: Option<Box<Node<V>>>,
}

/// A bucket: a singly-linked chain of nodes.
type Bucket<V> = Option<Box<Node<V>>>;

/// Number of entries after which a table with `capacity` buckets grows.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn threshold(capacity: usize, load_factor: f32) -> usize {
    (capacity as f32 * load_factor) as usize
}

/// A hash map from `i32` keys to values, with separate chaining.
///
/// Keys are their own hash. Once the number of entries exceeds the load factor times the number of
/// buckets, the table grows to twice its size plus one and every entry is rehashed.
#[derive(Clone)]
pub struct IntegerMap<V> {
    /// The buckets.
    table: Vec<Bucket<V>>,
    /// Number of entries.
    len: usize,
    /// Number of entries at which the table grows.
    threshold: usize,
    /// The configured load factor.
    load_factor: f32,
}

impl<V> Default for IntegerMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntegerMap<V> {
    /// An empty map with the default capacity and load factor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// An empty map with room for `capacity` buckets and the default load factor.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_table(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// An empty map with room for `capacity` buckets which grows once the number of entries
    /// exceeds `load_factor` times the number of buckets.
    ///
    /// ## Errors
    ///
    /// [`Error::InvalidLoadFactor`] if the load factor isn't a positive number.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self> {
        if load_factor > 0.0 && load_factor.is_finite() {
            Ok(Self::with_table(capacity, load_factor))
        } else {
            Err(Error::InvalidLoadFactor(load_factor))
        }
    }

    /// Allocates the table. The capacity is bumped to at least one bucket.
    fn with_table(capacity: usize, load_factor: f32) -> Self {
        let capacity = capacity.max(1);
        Self {
            table: std::iter::repeat_with(|| None).take(capacity).collect(),
            len: 0,
            threshold: threshold(capacity, load_factor),
            load_factor,
        }
    }

    /// The bucket for a key.
    #[allow(clippy::cast_sign_loss)]
    fn index(&self, key: i32) -> usize {
        (key & i32::MAX) as usize % self.table.len()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// The value for a key.
    #[must_use]
    pub fn get(&self, key: i32) -> Option<&V> {
        let mut node = self.table[self.index(key)].as_deref();
        while let Some(entry) = node {
            if entry.key == key {
                return Some(&entry.value);
            }
            node = entry.next.as_deref();
        }
        None
    }

    /// A mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: i32) -> Option<&mut V> {
        let index = self.index(key);
        let mut node = self.table[index].as_deref_mut();
        while let Some(entry) = node {
            if entry.key == key {
                return Some(&mut entry.value);
            }
            node = entry.next.as_deref_mut();
        }
        None
    }

    /// Whether the key has a value.
    #[must_use]
    pub fn contains_key(&self, key: i32) -> bool {
        self.get(key).is_some()
    }

    /// Whether some key maps to the value. This scans the whole map.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|other| other == value)
    }

    /// Maps a key to a value, returning the previous value.
    pub fn put(&mut self, key: i32, value: V) -> Option<V> {
        if let Some(old) = self.get_mut(key) {
            return Some(mem::replace(old, value));
        }

        if self.len >= self.threshold {
            self.rehash();
        }
        let index = self.index(key);
        let next = self.table[index].take();
        self.table[index] = Some(Box::new(Node { key, value, next }));
        self.len += 1;
        None
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: i32) -> Option<V> {
        let index = self.index(key);
        let mut link = &mut self.table[index];
        while link.as_ref().is_some_and(|entry| entry.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let Node { value, next, .. } = *link.take()?;
        *link = next;
        self.len -= 1;
        Some(value)
    }

    /// Removes every entry. The number of buckets is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.table {
            Self::drop_bucket(bucket.take());
        }
        self.len = 0;
    }

    /// Grows the table to twice its size plus one, and moves every entry to its new bucket.
    fn rehash(&mut self) {
        let capacity = self.table.len() * 2 + 1;
        log::debug!(
            "rehashing integer map from {} to {capacity} buckets",
            self.table.len()
        );

        let old = mem::replace(
            &mut self.table,
            std::iter::repeat_with(|| None).take(capacity).collect(),
        );
        self.threshold = threshold(capacity, self.load_factor);

        for mut bucket in old {
            while let Some(mut node) = bucket {
                bucket = node.next.take();
                let index = self.index(node.key);
                node.next = self.table[index].take();
                self.table[index] = Some(node);
            }
        }
    }

    /// Drops a chain node by node.
    fn drop_bucket(mut bucket: Bucket<V>) {
        while let Some(mut node) = bucket {
            bucket = node.next.take();
        }
    }

    /// Iterates over the entries, in no particular order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.table.iter(),
            node: None,
            remaining: self.len,
        }
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<V> Drop for IntegerMap<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V: Debug> Debug for IntegerMap<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for IntegerMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V> FromIterator<(i32, V)> for IntegerMap<V> {
    fn from_iter<T: IntoIterator<Item = (i32, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V> Extend<(i32, V)> for IntegerMap<V> {
    fn extend<T: IntoIterator<Item = (i32, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Iterator over the entries of an [`IntegerMap`]. See [`IntegerMap::iter`].
#[derive(Clone)]
pub struct Iter<'a, V> {
    /// Buckets not visited yet.
    buckets: std::slice::Iter<'a, Bucket<V>>,
    /// The next node in the current bucket.
    node: Option<&'a Node<V>>,
    /// Entries left.
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i32, &'a V);

    fn next(&mut self) -> Option<(i32, &'a V)> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                self.remaining -= 1;
                return Some((node.key, &node.value));
            }
            self.node = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a IntegerMap<V> {
    type Item = (i32, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

/// Tests for [`IntegerMap`].
#[cfg(test)]
mod int_map {
    use super::*;

    #[test]
    fn put_get_remove() {
        let mut map = IntegerMap::new();
        assert_eq!(map.put(1, "one"), None);
        assert_eq!(map.put(-7, "minus seven"), None);
        assert_eq!(map.put(1, "uno"), Some("one"));
        assert_eq!(map.len(), 2);

        assert_eq!(map.get(1), Some(&"uno"));
        assert_eq!(map.get(-7), Some(&"minus seven"));
        assert_eq!(map.get(2), None);
        assert!(map.contains_key(-7));
        assert!(map.contains_value(&"uno"));
        assert!(!map.contains_value(&"one"));

        assert_eq!(map.remove(-7), Some("minus seven"));
        assert_eq!(map.remove(-7), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn colliding_keys() {
        // Every key lands in the same bucket of a single-bucket table until it grows.
        let mut map = IntegerMap::with_capacity_and_load_factor(1, 100.0).unwrap();
        for key in [3, 4, 5, 6] {
            map.put(key, key * 10);
        }
        assert_eq!(map.capacity(), 1);

        assert_eq!(map.remove(5), Some(50));
        assert_eq!(map.remove(3), Some(30));
        assert_eq!(map.get(4), Some(&40));
        assert_eq!(map.get(6), Some(&60));
        *map.get_mut(6).unwrap() += 1;
        assert_eq!(map.get(6), Some(&61));
    }

    #[test]
    fn grows() {
        let mut map = IntegerMap::with_capacity(2);
        for key in 0..100 {
            map.put(key, key);
        }
        assert_eq!(map.len(), 100);
        assert!(map.capacity() > 100);
        assert!((0..100).all(|key| map.get(key) == Some(&key)));

        let mut keys: Vec<_> = map.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn extreme_keys() {
        let map: IntegerMap<_> = [(i32::MIN, 'a'), (i32::MAX, 'b'), (0, 'c')]
            .into_iter()
            .collect();
        assert_eq!(map.get(i32::MIN), Some(&'a'));
        assert_eq!(map.get(i32::MAX), Some(&'b'));
        assert_eq!(map.iter().len(), 3);
    }

    #[test]
    fn load_factor() {
        assert_eq!(
            IntegerMap::<()>::with_capacity_and_load_factor(4, 0.0).err(),
            Some(Error::InvalidLoadFactor(0.0))
        );
        assert!(IntegerMap::<()>::with_capacity_and_load_factor(4, f32::NAN).is_err());
        assert!(IntegerMap::<()>::with_capacity_and_load_factor(0, 0.5).is_ok());
    }

    #[test]
    fn clear() {
        let mut map: IntegerMap<_> = (0..10).map(|key| (key, key)).collect();
        let capacity = map.capacity();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map.get(3), None);
        assert_eq!(map, IntegerMap::new());
    }
}
