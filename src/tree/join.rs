//! Split, join, concatenate and trim: the primitives every set algorithm is
//! built from.
//!
//! `join` glues two trees of arbitrary relative weight around a middle element
//! and `split` cuts one tree around a pivot. Both run in time proportional to
//! the depth of the trees involved.

use super::{MAX_RUN, Tree, WEIGHT_RATIO};
use crate::Comparator;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

// =============================================================================
// Split Result
// =============================================================================

/// The three parts of a tree cut around a pivot.
///
/// Every element of `less` precedes the pivot and every element of `greater`
/// follows it. `found` holds the stored element equal to the pivot, if any.
///
/// # Examples
///
/// ```rust
/// use weftree::{NaturalOrder, Tree};
///
/// let tree = Tree::from_iter_with([1, 2, 4, 5], &NaturalOrder);
///
/// let split = tree.split(&3, &NaturalOrder);
/// assert_eq!(split.less.to_vec(), vec![1, 2]);
/// assert!(!split.is_present());
/// assert_eq!(split.greater.to_vec(), vec![4, 5]);
///
/// let split = tree.split(&4, &NaturalOrder);
/// assert_eq!(split.found, Some(4));
/// assert_eq!(split.greater.to_vec(), vec![5]);
/// ```
pub struct Split<E> {
    /// Elements before the pivot.
    pub less: Tree<E>,
    /// The element equal to the pivot.
    pub found: Option<E>,
    /// Elements after the pivot.
    pub greater: Tree<E>,
}

impl<E> Split<E> {
    /// Returns `true` if the tree held an element equal to the pivot.
    #[inline]
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.found.is_some()
    }

    const fn empty() -> Self {
        Self {
            less: Tree::Empty,
            found: None,
            greater: Tree::Empty,
        }
    }
}

impl<E: Clone> Clone for Split<E> {
    fn clone(&self) -> Self {
        Self {
            less: self.less.clone(),
            found: self.found.clone(),
            greater: self.greater.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Split<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Split")
            .field("less", &self.less)
            .field("found", &self.found)
            .field("greater", &self.greater)
            .finish()
    }
}

// =============================================================================
// Join and Split
// =============================================================================

impl<E: Clone> Tree<E> {
    /// Joins `left`, `value` and `right` into one tree.
    ///
    /// Every element of `left` must precede `value` and every element of
    /// `right` must follow it. The two sides may differ arbitrarily in size.
    ///
    /// # Complexity
    ///
    /// O(|depth(left) - depth(right)| + 1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::Tree;
    ///
    /// let left = Tree::from_sorted_vec((0..1000).collect());
    /// let right = Tree::from_sorted_vec(vec![1001, 1002]);
    /// let joined = Tree::join(left, 1000, right);
    ///
    /// assert_eq!(joined.len(), 1003);
    /// assert_eq!(joined.last(), Some(&1002));
    /// ```
    #[must_use]
    pub fn join(left: Self, value: E, right: Self) -> Self {
        let left_size = left.len();
        let right_size = right.len();

        if left_size + right_size < MAX_RUN {
            return Self::flatten(&left, value, &right);
        }

        if left_size > WEIGHT_RATIO * right_size {
            match &left {
                Self::Node(node) => Self::rebalance(
                    node.left().clone(),
                    node.value().clone(),
                    Self::join(node.right().clone(), value, right),
                ),
                _ => Self::flatten(&left, value, &right),
            }
        } else if right_size > WEIGHT_RATIO * left_size {
            match &right {
                Self::Node(node) => Self::rebalance(
                    Self::join(left, value, node.left().clone()),
                    node.value().clone(),
                    node.right().clone(),
                ),
                _ => Self::flatten(&left, value, &right),
            }
        } else {
            Self::node(left, value, right)
        }
    }

    /// Joins two trees where every element of `left` precedes every element of
    /// `right`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn concatenate(left: Self, right: Self) -> Self {
        if left.is_empty() {
            return right;
        }
        match right.remove_min() {
            Some((rest, minimum)) => Self::join(left, minimum, rest),
            None => left,
        }
    }

    /// Cuts the tree around `pivot`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn split<C>(&self, pivot: &E, comparator: &C) -> Split<E>
    where
        C: Comparator<E> + ?Sized,
    {
        self.split_by(|element| comparator.compare(pivot, element))
    }

    /// Cuts the tree around the target of a probe.
    #[must_use]
    pub fn split_by<P>(&self, probe: P) -> Split<E>
    where
        P: Fn(&E) -> Ordering,
    {
        self.split_with(&probe)
    }

    fn split_with<P>(&self, probe: &P) -> Split<E>
    where
        P: Fn(&E) -> Ordering,
    {
        match self {
            Self::Empty => Split::empty(),
            Self::Run(run) => {
                let (less, found, greater) = run.split(probe);
                Split {
                    less: Self::from_buffer(less),
                    found,
                    greater: Self::from_buffer(greater),
                }
            }
            Self::Node(node) => match probe(node.value()) {
                Ordering::Less => {
                    let Split {
                        less,
                        found,
                        greater,
                    } = node.left().split_with(probe);
                    Split {
                        less,
                        found,
                        greater: Self::join(greater, node.value().clone(), node.right().clone()),
                    }
                }
                Ordering::Greater => {
                    let Split {
                        less,
                        found,
                        greater,
                    } = node.right().split_with(probe);
                    Split {
                        less: Self::join(node.left().clone(), node.value().clone(), less),
                        found,
                        greater,
                    }
                }
                Ordering::Equal => Split {
                    less: node.left().clone(),
                    found: Some(node.value().clone()),
                    greater: node.right().clone(),
                },
            },
        }
    }
}

// =============================================================================
// Trim and Range
// =============================================================================

/// `true` when `element` satisfies the lower bound.
pub(super) fn is_above<E, C>(element: &E, lower: Bound<&E>, comparator: &C) -> bool
where
    C: Comparator<E> + ?Sized,
{
    match lower {
        Bound::Included(bound) => comparator.compare(element, bound) != Ordering::Less,
        Bound::Excluded(bound) => comparator.compare(element, bound) == Ordering::Greater,
        Bound::Unbounded => true,
    }
}

/// `true` when `element` satisfies the upper bound.
pub(super) fn is_below<E, C>(element: &E, upper: Bound<&E>, comparator: &C) -> bool
where
    C: Comparator<E> + ?Sized,
{
    match upper {
        Bound::Included(bound) => comparator.compare(element, bound) != Ordering::Greater,
        Bound::Excluded(bound) => comparator.compare(element, bound) == Ordering::Less,
        Bound::Unbounded => true,
    }
}

impl<E: Clone> Tree<E> {
    /// Returns the largest subtree whose root lies within the bounds.
    ///
    /// The result is a cheap handle on an existing subtree: every element of
    /// the tree within the bounds is in it, but it may also hold elements
    /// outside them. Runs are the exception and are filtered exactly. Use
    /// [`Tree::range`] for an exact restriction.
    ///
    /// # Complexity
    ///
    /// O(log n), allocating only when a run has to be filtered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::Bound;
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_sorted_vec((0..100).collect());
    /// let trimmed = tree.trim(Bound::Excluded(&10), Bound::Excluded(&20), &NaturalOrder);
    ///
    /// assert!((11..20).all(|value| trimmed.contains(&value, &NaturalOrder)));
    /// ```
    #[must_use]
    pub fn trim<C>(&self, lower: Bound<&E>, upper: Bound<&E>, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        let mut current = self;
        loop {
            match current {
                Self::Empty => return Self::Empty,
                Self::Run(run) => {
                    let elements = run.as_slice();
                    let start =
                        elements.partition_point(|element| !is_above(element, lower, comparator));
                    let end =
                        elements.partition_point(|element| is_below(element, upper, comparator));
                    if start == 0 && end == elements.len() {
                        return current.clone();
                    }
                    return Self::from_sorted_slice(elements.get(start..end).unwrap_or_default());
                }
                Self::Node(node) => {
                    if !is_above(node.value(), lower, comparator) {
                        current = node.right();
                    } else if !is_below(node.value(), upper, comparator) {
                        current = node.left();
                    } else {
                        return current.clone();
                    }
                }
            }
        }
    }

    /// [`Tree::trim`] with only a lower bound.
    #[must_use]
    pub fn trim_lo<C>(&self, lower: Bound<&E>, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        self.trim(lower, Bound::Unbounded, comparator)
    }

    /// [`Tree::trim`] with only an upper bound.
    #[must_use]
    pub fn trim_hi<C>(&self, upper: Bound<&E>, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        self.trim(Bound::Unbounded, upper, comparator)
    }

    /// Returns the tree of exactly the elements within the bounds.
    ///
    /// Subtrees lying entirely inside the bounds are shared with `self`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::Bound;
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_sorted_vec((0..100).collect());
    /// let window = tree.range(Bound::Included(&10), Bound::Excluded(&15), &NaturalOrder);
    ///
    /// assert_eq!(window.to_vec(), vec![10, 11, 12, 13, 14]);
    /// ```
    #[must_use]
    pub fn range<C>(&self, lower: Bound<&E>, upper: Bound<&E>, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        self.keep_above(lower, comparator)
            .keep_below(upper, comparator)
    }

    fn keep_above<C>(&self, lower: Bound<&E>, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        if matches!(lower, Bound::Unbounded) {
            return self.clone();
        }
        match self {
            Self::Empty => Self::Empty,
            Self::Run(run) => {
                let elements = run.as_slice();
                match elements.partition_point(|element| !is_above(element, lower, comparator)) {
                    0 => self.clone(),
                    start => Self::from_sorted_slice(&elements[start..]),
                }
            }
            Self::Node(node) => {
                if is_above(node.value(), lower, comparator) {
                    let left = node.left().keep_above(lower, comparator);
                    if left.ptr_eq(node.left()) {
                        return self.clone();
                    }
                    Self::join(left, node.value().clone(), node.right().clone())
                } else {
                    node.right().keep_above(lower, comparator)
                }
            }
        }
    }

    fn keep_below<C>(&self, upper: Bound<&E>, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        if matches!(upper, Bound::Unbounded) {
            return self.clone();
        }
        match self {
            Self::Empty => Self::Empty,
            Self::Run(run) => {
                let elements = run.as_slice();
                match elements.partition_point(|element| is_below(element, upper, comparator)) {
                    end if end == elements.len() => self.clone(),
                    end => Self::from_sorted_slice(&elements[..end]),
                }
            }
            Self::Node(node) => {
                if is_below(node.value(), upper, comparator) {
                    let right = node.right().keep_below(upper, comparator);
                    if right.ptr_eq(node.right()) {
                        return self.clone();
                    }
                    Self::join(node.left().clone(), node.value().clone(), right)
                } else {
                    node.left().keep_below(upper, comparator)
                }
            }
        }
    }
}
