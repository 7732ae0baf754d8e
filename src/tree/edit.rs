//! Point edits and lookups: insert, remove, minimum/maximum extraction,
//! membership and order statistics.
//!
//! Lookups come in two forms. The plain form takes an element and a
//! [`Comparator`]; the `_by` form takes a probe, a function telling how the
//! searched-for target compares to a given element. Probes let a map look up an
//! entry by key without building a whole entry.

use super::Tree;
use crate::Comparator;
use std::cmp::Ordering;

/// What `insert` does when the tree already holds an equal element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum OnEqual {
    Replace,
    Keep,
}

impl<E: Clone> Tree<E> {
    /// Inserts an element, returning a new tree.
    ///
    /// An equal element already in the tree is replaced by `value`, which
    /// matters when the comparator only looks at part of the element (a map
    /// entry compared by key, for example).
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::new().insert(2, &NaturalOrder).insert(1, &NaturalOrder);
    /// let same = tree.insert(2, &NaturalOrder);
    ///
    /// assert_eq!(tree.to_vec(), vec![1, 2]);
    /// assert_eq!(same.to_vec(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn insert<C>(&self, value: E, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        self.insert_with(value, comparator, OnEqual::Replace)
    }

    pub(crate) fn insert_with<C>(&self, value: E, comparator: &C, on_equal: OnEqual) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        match self {
            Self::Empty => Self::singleton(value),
            Self::Run(run) => {
                let (index, present) =
                    run.insert_position(|element| comparator.compare(&value, element));
                match (present, on_equal) {
                    (true, OnEqual::Keep) => self.clone(),
                    (true, OnEqual::Replace) => Self::from_buffer(run.replaced(index, value)),
                    (false, _) => Self::from_buffer(run.inserted(index, value)),
                }
            }
            Self::Node(node) => match comparator.compare(&value, node.value()) {
                Ordering::Less => {
                    let left = node.left().insert_with(value, comparator, on_equal);
                    if left.ptr_eq(node.left()) {
                        return self.clone();
                    }
                    Self::rebalance(left, node.value().clone(), node.right().clone())
                }
                Ordering::Greater => {
                    let right = node.right().insert_with(value, comparator, on_equal);
                    if right.ptr_eq(node.right()) {
                        return self.clone();
                    }
                    Self::rebalance(node.left().clone(), node.value().clone(), right)
                }
                Ordering::Equal => match on_equal {
                    OnEqual::Keep => self.clone(),
                    OnEqual::Replace => {
                        Self::node(node.left().clone(), value, node.right().clone())
                    }
                },
            },
        }
    }

    /// Removes the element equal to `value`, returning a new tree.
    ///
    /// Removing an absent element returns the same shared tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with(1..=3, &NaturalOrder);
    /// let removed = tree.remove(&2, &NaturalOrder);
    ///
    /// assert_eq!(tree.to_vec(), vec![1, 2, 3]); // original unchanged
    /// assert_eq!(removed.to_vec(), vec![1, 3]);
    /// ```
    #[must_use]
    pub fn remove<C>(&self, value: &E, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        self.remove_by(|element| comparator.compare(value, element))
    }

    /// Removes the element the probe reports as equal, returning a new tree.
    #[must_use]
    pub fn remove_by<P>(&self, probe: P) -> Self
    where
        P: Fn(&E) -> Ordering,
    {
        self.remove_with(&probe)
    }

    fn remove_with<P>(&self, probe: &P) -> Self
    where
        P: Fn(&E) -> Ordering,
    {
        match self {
            Self::Empty => Self::Empty,
            Self::Run(run) => run.locate(probe).map_or_else(
                |_| self.clone(),
                |index| Self::from_buffer(run.removed(index)),
            ),
            Self::Node(node) => match probe(node.value()) {
                Ordering::Less => {
                    let left = node.left().remove_with(probe);
                    if left.ptr_eq(node.left()) {
                        return self.clone();
                    }
                    Self::rebalance(left, node.value().clone(), node.right().clone())
                }
                Ordering::Greater => {
                    let right = node.right().remove_with(probe);
                    if right.ptr_eq(node.right()) {
                        return self.clone();
                    }
                    Self::rebalance(node.left().clone(), node.value().clone(), right)
                }
                Ordering::Equal => Self::concatenate(node.left().clone(), node.right().clone()),
            },
        }
    }

    /// Removes the smallest element.
    ///
    /// Returns the remaining tree and the removed element, or `None` for an
    /// empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with([3, 1, 2], &NaturalOrder);
    /// let (rest, minimum) = tree.remove_min().unwrap();
    ///
    /// assert_eq!(minimum, 1);
    /// assert_eq!(rest.to_vec(), vec![2, 3]);
    /// assert!(Tree::<i32>::new().remove_min().is_none());
    /// ```
    #[must_use]
    pub fn remove_min(&self) -> Option<(Self, E)> {
        match self {
            Self::Empty => None,
            Self::Run(run) => {
                let (first, rest) = run.as_slice().split_first()?;
                Some((Self::from_sorted_slice(rest), first.clone()))
            }
            Self::Node(node) => match node.left().remove_min() {
                Some((left, minimum)) => Some((
                    Self::rebalance(left, node.value().clone(), node.right().clone()),
                    minimum,
                )),
                None => Some((node.right().clone(), node.value().clone())),
            },
        }
    }

    /// Removes the largest element.
    ///
    /// Returns the remaining tree and the removed element, or `None` for an
    /// empty tree.
    #[must_use]
    pub fn remove_max(&self) -> Option<(Self, E)> {
        match self {
            Self::Empty => None,
            Self::Run(run) => {
                let (last, rest) = run.as_slice().split_last()?;
                Some((Self::from_sorted_slice(rest), last.clone()))
            }
            Self::Node(node) => match node.right().remove_max() {
                Some((right, maximum)) => Some((
                    Self::rebalance(node.left().clone(), node.value().clone(), right),
                    maximum,
                )),
                None => Some((node.left().clone(), node.value().clone())),
            },
        }
    }
}

impl<E> Tree<E> {
    /// Returns `true` if the tree holds an element equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains<C>(&self, value: &E, comparator: &C) -> bool
    where
        C: Comparator<E> + ?Sized,
    {
        self.get(value, comparator).is_some()
    }

    /// Returns `true` if the probe finds an equal element.
    #[must_use]
    pub fn contains_by<P>(&self, probe: P) -> bool
    where
        P: Fn(&E) -> Ordering,
    {
        self.get_by(probe).is_some()
    }

    /// Returns the stored element equal to `value`.
    #[must_use]
    pub fn get<C>(&self, value: &E, comparator: &C) -> Option<&E>
    where
        C: Comparator<E> + ?Sized,
    {
        self.get_by(|element| comparator.compare(value, element))
    }

    /// Returns the stored element the probe reports as equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::Tree;
    ///
    /// let entries = Tree::from_sorted_vec(vec![(1, "one"), (2, "two")]);
    /// let found = entries.get_by(|entry| 2.cmp(&entry.0));
    /// assert_eq!(found, Some(&(2, "two")));
    /// ```
    #[must_use]
    pub fn get_by<P>(&self, probe: P) -> Option<&E>
    where
        P: Fn(&E) -> Ordering,
    {
        let mut current = self;
        loop {
            match current {
                Self::Empty => return None,
                Self::Run(run) => {
                    return run.locate(&probe).ok().map(|index| &run.as_slice()[index]);
                }
                Self::Node(node) => match probe(node.value()) {
                    Ordering::Less => current = node.left(),
                    Ordering::Greater => current = node.right(),
                    Ordering::Equal => return Some(node.value()),
                },
            }
        }
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&E> {
        let mut current = self;
        loop {
            match current {
                Self::Empty => return None,
                Self::Run(run) => return run.as_slice().first(),
                Self::Node(node) if node.left().is_empty() => return Some(node.value()),
                Self::Node(node) => current = node.left(),
            }
        }
    }

    /// Returns the largest element.
    #[must_use]
    pub fn last(&self) -> Option<&E> {
        let mut current = self;
        loop {
            match current {
                Self::Empty => return None,
                Self::Run(run) => return run.as_slice().last(),
                Self::Node(node) if node.right().is_empty() => return Some(node.value()),
                Self::Node(node) => current = node.right(),
            }
        }
    }

    /// Returns the element at in-order position `index`.
    ///
    /// # Complexity
    ///
    /// O(log n), using the cached subtree sizes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with((0..100).map(|value| value * 10), &NaturalOrder);
    /// assert_eq!(tree.nth(42), Some(&420));
    /// assert_eq!(tree.nth(100), None);
    /// ```
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&E> {
        let mut current = self;
        let mut index = index;
        loop {
            match current {
                Self::Empty => return None,
                Self::Run(run) => return run.as_slice().get(index),
                Self::Node(node) => {
                    let left_size = node.left().len();
                    match index.cmp(&left_size) {
                        Ordering::Less => current = node.left(),
                        Ordering::Equal => return Some(node.value()),
                        Ordering::Greater => {
                            index -= left_size + 1;
                            current = node.right();
                        }
                    }
                }
            }
        }
    }

    /// Returns the number of elements strictly less than `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with([10, 20, 30], &NaturalOrder);
    /// assert_eq!(tree.rank(&20, &NaturalOrder), 1);
    /// assert_eq!(tree.rank(&25, &NaturalOrder), 2);
    /// ```
    #[must_use]
    pub fn rank<C>(&self, value: &E, comparator: &C) -> usize
    where
        C: Comparator<E> + ?Sized,
    {
        self.rank_by(|element| comparator.compare(value, element))
    }

    /// Returns the number of elements the probe reports as less than its target.
    #[must_use]
    pub fn rank_by<P>(&self, probe: P) -> usize
    where
        P: Fn(&E) -> Ordering,
    {
        let mut current = self;
        let mut preceding = 0;
        loop {
            match current {
                Self::Empty => return preceding,
                Self::Run(run) => {
                    let (index, _) = run.insert_position(&probe);
                    return preceding + index;
                }
                Self::Node(node) => match probe(node.value()) {
                    Ordering::Less => current = node.left(),
                    Ordering::Equal => return preceding + node.left().len(),
                    Ordering::Greater => {
                        preceding += node.left().len() + 1;
                        current = node.right();
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaturalOrder;
    use rstest::rstest;

    fn tree_of(elements: &[i32]) -> Tree<i32> {
        Tree::from_iter_with(elements.iter().copied(), &NaturalOrder)
    }

    #[rstest]
    fn test_insert_running_sequence_stays_valid() {
        let mut tree = Tree::new();
        let mut expected = Vec::new();
        for value in [5, 3, 8, 1, 4, 7, 9, 2, 6, 0] {
            tree = tree.insert(value, &NaturalOrder);
            expected.push(value);
            expected.sort_unstable();
            assert_eq!(tree.to_vec(), expected);
            assert_eq!(tree.validate(&NaturalOrder), Ok(()));
        }
    }

    #[rstest]
    fn test_insert_existing_replaces_element() {
        let by_key = |left: &(i32, &str), right: &(i32, &str)| left.0.cmp(&right.0);
        let tree = Tree::from_iter_with((0..20).map(|key| (key, "old")), &by_key);
        let updated = tree.insert((7, "new"), &by_key);
        assert_eq!(updated.get(&(7, ""), &by_key), Some(&(7, "new")));
        assert_eq!(tree.get(&(7, ""), &by_key), Some(&(7, "old")));
        assert_eq!(updated.len(), 20);
    }

    #[rstest]
    fn test_insert_keep_returns_same_tree() {
        let tree = tree_of(&(0..30).collect::<Vec<_>>());
        let kept = tree.insert_with(12, &NaturalOrder, OnEqual::Keep);
        assert!(kept.ptr_eq(&tree));
    }

    #[rstest]
    fn test_run_overflow_promotes_to_node() {
        let tree = tree_of(&[0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(matches!(tree, Tree::Run(_)));
        let grown = tree.insert(8, &NaturalOrder);
        assert!(matches!(grown, Tree::Node(_)));
        assert_eq!(grown.validate(&NaturalOrder), Ok(()));
    }

    #[rstest]
    fn test_remove_collapses_node_into_run() {
        let tree = tree_of(&(0..9).collect::<Vec<_>>());
        assert!(matches!(tree, Tree::Node(_)));
        let shrunk = tree.remove(&4, &NaturalOrder);
        assert!(matches!(shrunk, Tree::Run(_)));
        assert_eq!(shrunk.to_vec(), vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[rstest]
    fn test_remove_absent_shares_tree() {
        let tree = tree_of(&(0..64).map(|value| value * 2).collect::<Vec<_>>());
        assert!(tree.remove(&31, &NaturalOrder).ptr_eq(&tree));
    }

    #[rstest]
    fn test_remove_everything_reaches_empty() {
        let elements: Vec<i32> = (0..200).map(|value| (value * 37) % 200).collect();
        let mut tree = tree_of(&elements);
        for value in &elements {
            tree = tree.remove(value, &NaturalOrder);
            assert_eq!(tree.validate(&NaturalOrder), Ok(()));
        }
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_remove_min_and_max_drain_in_order() {
        let tree = tree_of(&(0..50).rev().collect::<Vec<_>>());

        let mut ascending = Vec::new();
        let mut current = tree.clone();
        while let Some((rest, minimum)) = current.remove_min() {
            ascending.push(minimum);
            current = rest;
        }
        assert_eq!(ascending, (0..50).collect::<Vec<_>>());

        let mut descending = Vec::new();
        let mut current = tree;
        while let Some((rest, maximum)) = current.remove_max() {
            assert_eq!(rest.validate(&NaturalOrder), Ok(()));
            descending.push(maximum);
            current = rest;
        }
        assert_eq!(descending, (0..50).rev().collect::<Vec<_>>());
    }

    #[rstest]
    fn test_remove_min_of_empty_is_none() {
        assert!(Tree::<i32>::new().remove_min().is_none());
        assert!(Tree::<i32>::new().remove_max().is_none());
    }

    #[rstest]
    fn test_first_and_last() {
        let tree = tree_of(&[40, 10, 30, 20, 90, 70, 50, 60, 80, 0]);
        assert_eq!(tree.first(), Some(&0));
        assert_eq!(tree.last(), Some(&90));
        assert_eq!(Tree::<i32>::new().first(), None);
    }

    #[rstest]
    fn test_nth_matches_sequence() {
        let tree = tree_of(&(0..100).rev().collect::<Vec<_>>());
        for index in 0..100 {
            assert_eq!(tree.nth(index), Some(&i32::try_from(index).unwrap()));
        }
        assert_eq!(tree.nth(100), None);
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(57, 29)]
    #[case(58, 29)]
    #[case(1000, 50)]
    fn test_rank(#[case] value: i32, #[case] expected: usize) {
        let tree = tree_of(&(0..50).map(|element| element * 2).collect::<Vec<_>>());
        assert_eq!(tree.rank(&value, &NaturalOrder), expected);
    }

    #[rstest]
    fn test_contains_by_probe() {
        let tree = tree_of(&[1, 2, 3]);
        assert!(tree.contains_by(|element| 2.cmp(element)));
        assert!(!tree.contains_by(|element| 4.cmp(element)));
    }
}
