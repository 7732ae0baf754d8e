//! Persistent ordered map.
//!
//! Entries are stored as `(K, V)` pairs in one [`Tree`]. Lookups probe the
//! tree with a key alone; edits order whole entries through [`ByKey`], which
//! looks only at the key half.

use super::SORTED_INVARIANT_MESSAGE;
use crate::tree::{IntoIter, Iter, Tree};
use crate::{Comparator, NaturalOrder};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Map;

/// Orders entries by key with the wrapped key comparator.
struct ByKey<'a, C: ?Sized>(&'a C);

impl<K, V, C: Comparator<K> + ?Sized> Comparator<(K, V)> for ByKey<'_, C> {
    #[inline]
    fn compare(&self, left: &(K, V), right: &(K, V)) -> Ordering {
        self.0.compare(&left.0, &right.0)
    }
}

type EntryRefs<'a, K, V> = fn(&'a (K, V)) -> (&'a K, &'a V);

const fn entry_refs<K, V>((key, value): &(K, V)) -> (&K, &V) {
    (key, value)
}

/// A persistent map with entries kept in key order.
///
/// Inserting an existing key replaces its value. Cloning is O(1) and every
/// update shares unchanged subtrees with the map it was derived from.
///
/// # Examples
///
/// ```rust
/// use weftree::collections::OrderedMap;
///
/// let map = OrderedMap::new()
///     .insert(3, "three")
///     .insert(1, "one")
///     .insert(2, "two");
///
/// assert_eq!(map.get(&2), Some(&"two"));
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
///
/// let updated = map.insert(2, "deux");
/// assert_eq!(updated.get(&2), Some(&"deux"));
/// assert_eq!(map.get(&2), Some(&"two")); // original unchanged
/// ```
pub struct OrderedMap<K, V, C = NaturalOrder> {
    tree: Tree<(K, V)>,
    comparator: C,
}

impl<K: Clone + Ord, V: Clone> OrderedMap<K, V> {
    /// Creates an empty map ordered by `K: Ord`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: Tree::new(),
            comparator: NaturalOrder,
        }
    }

    /// Builds a map from entries with strictly increasing keys in O(n).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the keys are not strictly increasing.
    #[must_use]
    pub fn from_sorted_vec(entries: Vec<(K, V)>) -> Self {
        Self::from_sorted_vec_with(entries, NaturalOrder)
    }
}

impl<K: Clone, V: Clone, C: Comparator<K> + Clone> OrderedMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: Tree::new(),
            comparator,
        }
    }

    /// Builds a map from entries whose keys strictly increase under `comparator`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the keys are out of order.
    #[must_use]
    pub fn from_sorted_vec_with(entries: Vec<(K, V)>, comparator: C) -> Self {
        debug_assert!(
            entries
                .windows(2)
                .all(|pair| comparator.compare(&pair[0].0, &pair[1].0) == Ordering::Less),
            "{SORTED_INVARIANT_MESSAGE}"
        );
        Self {
            tree: Tree::from_sorted_vec(entries),
            comparator,
        }
    }

    fn with_tree(&self, tree: Tree<(K, V)>) -> Self {
        Self {
            tree,
            comparator: self.comparator.clone(),
        }
    }

    fn probe<'a>(&'a self, key: &'a K) -> impl Fn(&(K, V)) -> Ordering + 'a {
        move |entry| self.comparator.compare(key, &entry.0)
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get_by(self.probe(key)).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.get_by(self.probe(key)).map(entry_refs)
    }

    /// Returns `true` if the map holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_by(self.probe(key))
    }

    /// Returns a map with `key` bound to `value`, replacing any previous value.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        self.with_tree(self.tree.insert((key, value), &ByKey(&self.comparator)))
    }

    /// Returns a map without the entry for `key`.
    ///
    /// Removing an absent key returns a map sharing the same tree.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        self.with_tree(self.tree.remove_by(self.probe(key)))
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().map(entry_refs)
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().map(entry_refs)
    }

    /// Splits into the entries before `key`, the value stored under it and
    /// the entries after it.
    #[must_use]
    pub fn split(&self, key: &K) -> (Self, Option<V>, Self) {
        let split = self.tree.split_by(self.probe(key));
        (
            self.with_tree(split.less),
            split.found.map(|(_, value)| value),
            self.with_tree(split.greater),
        )
    }

    /// Returns the union of both maps; for keys present in both, the entry
    /// from `self` wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::collections::OrderedMap;
    ///
    /// let left = OrderedMap::new().insert(1, "left").insert(2, "left");
    /// let right = OrderedMap::new().insert(2, "right").insert(3, "right");
    /// let union = left.union(&right);
    ///
    /// assert_eq!(union.get(&2), Some(&"left"));
    /// assert_eq!(union.get(&3), Some(&"right"));
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.with_tree(self.tree.union(&other.tree, &ByKey(&self.comparator)))
    }

    /// Returns the entries of `self` whose keys are also in `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.with_tree(
            self.tree
                .intersection(&other.tree, &ByKey(&self.comparator)),
        )
    }

    /// Returns the entries of `self` whose keys are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.with_tree(self.tree.difference(&other.tree, &ByKey(&self.comparator)))
    }

    /// Returns an iterator over the entries in key order.
    pub fn iter(&self) -> Map<Iter<'_, (K, V)>, EntryRefs<'_, K, V>> {
        self.tree.iter().map(entry_refs as EntryRefs<'_, K, V>)
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.tree.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in key order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.tree.iter().map(|(_, value)| value)
    }

    /// Returns the underlying tree of entries.
    #[must_use]
    pub const fn as_tree(&self) -> &Tree<(K, V)> {
        &self.tree
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: Clone, V: Clone, C: Clone> Clone for OrderedMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K: Clone, V: Clone, C: Comparator<K> + Clone + Default> Default for OrderedMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> FromIterator<(K, V)> for OrderedMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let comparator = C::default();
        Self {
            tree: Tree::from_iter_with(iter, &ByKey(&comparator)),
            comparator,
        }
    }
}

impl<'a, K: Clone, V: Clone, C: Comparator<K> + Clone> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Map<Iter<'a, (K, V)>, EntryRefs<'a, K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone, V: Clone, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.tree.iter().map(entry_refs))
            .finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in &self.tree {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
