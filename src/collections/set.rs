//! Persistent ordered set.

use super::SORTED_INVARIANT_MESSAGE;
use crate::tree::{IntoIter, Iter, Tree};
use crate::{Comparator, NaturalOrder};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

/// A persistent set of unique elements kept in comparator order.
///
/// Cloning is O(1) and every update shares unchanged subtrees with the set it
/// was derived from.
///
/// # Time Complexity
///
/// | Operation                               | Complexity        |
/// |-----------------------------------------|-------------------|
/// | `insert`, `remove`, `contains`          | O(log n)          |
/// | `first`, `last`, `pop_first`, `pop_last`| O(log n)          |
/// | `nth`, `rank`, `split`                  | O(log n)          |
/// | `union`, `intersection`, `difference`   | O(m log(n/m + 1)) |
/// | `len`, `is_empty`, `clone`              | O(1)              |
///
/// # Examples
///
/// ```rust
/// use weftree::collections::OrderedSet;
///
/// let set = OrderedSet::new().insert(3).insert(1).insert(2);
/// let without_two = set.remove(&2);
///
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(without_two.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
///
/// A custom ordering travels with the set:
///
/// ```rust
/// use weftree::ReverseOrder;
/// use weftree::NaturalOrder;
/// use weftree::collections::OrderedSet;
///
/// let set = OrderedSet::with_comparator(ReverseOrder(NaturalOrder))
///     .insert(1)
///     .insert(3)
///     .insert(2);
/// assert_eq!(set.first(), Some(&3));
/// ```
pub struct OrderedSet<E, C = NaturalOrder> {
    tree: Tree<E>,
    comparator: C,
}

impl<E: Clone + Ord> OrderedSet<E> {
    /// Creates an empty set ordered by `Ord`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: Tree::new(),
            comparator: NaturalOrder,
        }
    }

    /// Builds a set from strictly increasing elements in O(n).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the elements are not strictly increasing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::collections::OrderedSet;
    ///
    /// let set = OrderedSet::from_sorted_vec(vec![2, 4, 6, 8]);
    /// assert_eq!(set.len(), 4);
    /// ```
    #[must_use]
    pub fn from_sorted_vec(elements: Vec<E>) -> Self {
        Self::from_sorted_vec_with(elements, NaturalOrder)
    }
}

impl<E: Clone, C: Comparator<E> + Clone> OrderedSet<E, C> {
    /// Creates an empty set ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: Tree::new(),
            comparator,
        }
    }

    /// Builds a set from elements strictly increasing under `comparator`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the elements are out of order.
    #[must_use]
    pub fn from_sorted_vec_with(elements: Vec<E>, comparator: C) -> Self {
        debug_assert!(
            elements
                .windows(2)
                .all(|pair| comparator.compare(&pair[0], &pair[1]) == Ordering::Less),
            "{SORTED_INVARIANT_MESSAGE}"
        );
        Self {
            tree: Tree::from_sorted_vec(elements),
            comparator,
        }
    }

    fn with_tree(&self, tree: Tree<E>) -> Self {
        Self {
            tree,
            comparator: self.comparator.clone(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns `true` if the set holds an element equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &E) -> bool {
        self.tree.contains(value, &self.comparator)
    }

    /// Returns the stored element equal to `value`.
    #[must_use]
    pub fn get(&self, value: &E) -> Option<&E> {
        self.tree.get(value, &self.comparator)
    }

    /// Returns a set that also holds `value`, replacing an equal element.
    #[must_use]
    pub fn insert(&self, value: E) -> Self {
        self.with_tree(self.tree.insert(value, &self.comparator))
    }

    /// Returns a set without the element equal to `value`.
    #[must_use]
    pub fn remove(&self, value: &E) -> Self {
        self.with_tree(self.tree.remove(value, &self.comparator))
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.tree.first()
    }

    /// Returns the largest element.
    #[must_use]
    pub fn last(&self) -> Option<&E> {
        self.tree.last()
    }

    /// Removes the smallest element, returning it with the remaining set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::collections::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = (1..=3).collect();
    /// let (smallest, rest) = set.pop_first().unwrap();
    /// assert_eq!(smallest, 1);
    /// assert_eq!(rest.len(), 2);
    /// ```
    #[must_use]
    pub fn pop_first(&self) -> Option<(E, Self)> {
        let (rest, minimum) = self.tree.remove_min()?;
        Some((minimum, self.with_tree(rest)))
    }

    /// Removes the largest element, returning it with the remaining set.
    #[must_use]
    pub fn pop_last(&self) -> Option<(E, Self)> {
        let (rest, maximum) = self.tree.remove_max()?;
        Some((maximum, self.with_tree(rest)))
    }

    /// Splits into the elements before `pivot`, the element equal to it and
    /// the elements after it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::collections::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = [1, 2, 4, 5].into_iter().collect();
    /// let (less, found, greater) = set.split(&4);
    ///
    /// assert_eq!(less.len(), 2);
    /// assert_eq!(found, Some(4));
    /// assert_eq!(greater.first(), Some(&5));
    /// ```
    #[must_use]
    pub fn split(&self, pivot: &E) -> (Self, Option<E>, Self) {
        let split = self.tree.split(pivot, &self.comparator);
        (
            self.with_tree(split.less),
            split.found,
            self.with_tree(split.greater),
        )
    }

    /// Returns the elements within the bounds.
    #[must_use]
    pub fn range(&self, lower: Bound<&E>, upper: Bound<&E>) -> Self {
        self.with_tree(self.tree.range(lower, upper, &self.comparator))
    }

    /// Returns the union; equal elements are taken from `self`.
    ///
    /// `other` must be ordered by the same comparator.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.with_tree(self.tree.union(&other.tree, &self.comparator))
    }

    /// Returns the elements of `self` also in `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.with_tree(self.tree.intersection(&other.tree, &self.comparator))
    }

    /// Returns the elements of `self` not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.with_tree(self.tree.difference(&other.tree, &self.comparator))
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.tree.is_subset(&other.tree, &self.comparator)
    }

    /// Returns the element at position `index` in increasing order.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&E> {
        self.tree.nth(index)
    }

    /// Returns the number of elements less than `value`.
    #[must_use]
    pub fn rank(&self, value: &E) -> usize {
        self.tree.rank(value, &self.comparator)
    }

    /// Returns an iterator over the elements in increasing order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, E> {
        self.tree.iter()
    }

    /// Folds the elements from smallest to largest.
    pub fn fold_left<B, F>(&self, init: B, function: F) -> B
    where
        F: FnMut(B, &E) -> B,
    {
        self.tree.fold_left(init, function)
    }

    /// Returns the underlying tree.
    #[must_use]
    pub const fn as_tree(&self) -> &Tree<E> {
        &self.tree
    }

    /// Returns the comparator the set is ordered by.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<E: Clone, C: Clone> Clone for OrderedSet<E, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<E: Clone, C: Comparator<E> + Clone + Default> Default for OrderedSet<E, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<E: Clone, C: Comparator<E> + Clone + Default> FromIterator<E> for OrderedSet<E, C> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let comparator = C::default();
        Self {
            tree: Tree::from_iter_with(iter, &comparator),
            comparator,
        }
    }
}

impl<'a, E, C> IntoIterator for &'a OrderedSet<E, C> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

impl<E: Clone, C> IntoIterator for OrderedSet<E, C> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<E: PartialEq, C> PartialEq for OrderedSet<E, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<E: Eq, C> Eq for OrderedSet<E, C> {}

impl<E: fmt::Debug, C> fmt::Debug for OrderedSet<E, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.tree.iter()).finish()
    }
}

impl<E: fmt::Display, C> fmt::Display for OrderedSet<E, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in &self.tree {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
