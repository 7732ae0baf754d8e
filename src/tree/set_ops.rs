//! Set algebra over whole trees.
//!
//! Union is a hedge union: it walks the left operand and narrows the right
//! operand to the open interval between the ancestors of each subtree. The
//! others split the smaller operand around the root of the larger one. All of
//! them share subtrees with their inputs wherever the result allows it, and
//! when both operands hold an equal element the result carries the one from
//! `self`.

use super::join::{is_above, is_below};
use super::run::{difference_slices, intersection_slices, union_slices};
use super::Tree;
use super::edit::OnEqual;
use crate::Comparator;
use log::trace;
use std::ops::Bound;

impl<E: Clone> Tree<E> {
    /// Returns the union of two trees.
    ///
    /// # Complexity
    ///
    /// O(m log(n/m + 1)) for trees of sizes m ≤ n.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let left = Tree::from_iter_with([1, 3, 5, 7], &NaturalOrder);
    /// let right = Tree::from_iter_with([1, 3, 5, 7, 9], &NaturalOrder);
    ///
    /// assert_eq!(left.union(&right, &NaturalOrder).to_vec(), vec![1, 3, 5, 7, 9]);
    /// ```
    #[must_use]
    pub fn union<C>(&self, other: &Self, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        if self.ptr_eq(other) {
            trace!("union of a tree with itself");
            return self.clone();
        }
        Self::hedge_union(
            self,
            other,
            Bound::Unbounded,
            Bound::Unbounded,
            comparator,
        )
    }

    /// Union of `left` with the elements of `right` inside the bounds.
    ///
    /// Every element of `left` lies inside the bounds; `right` may hold
    /// elements outside them, which are ignored.
    fn hedge_union<C>(
        left: &Self,
        right: &Self,
        lower: Bound<&E>,
        upper: Bound<&E>,
        comparator: &C,
    ) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        match (left, right) {
            (_, Self::Empty) => left.clone(),
            (Self::Empty, _) => right.range(lower, upper, comparator),
            _ if left.ptr_eq(right) => left.clone(),
            (Self::Run(left_run), Self::Run(right_run)) => {
                let elements = right_run.as_slice();
                let start =
                    elements.partition_point(|element| !is_above(element, lower, comparator));
                let end = elements.partition_point(|element| is_below(element, upper, comparator));
                Self::from_sorted_vec(union_slices(
                    left_run.as_slice(),
                    elements.get(start..end).unwrap_or_default(),
                    comparator,
                ))
            }
            (Self::Run(left_run), _) => left_run
                .as_slice()
                .iter()
                .fold(right.range(lower, upper, comparator), |tree, element| {
                    tree.insert_with(element.clone(), comparator, OnEqual::Replace)
                }),
            (_, Self::Run(right_run)) => right_run
                .as_slice()
                .iter()
                .filter(|&element| {
                    is_above(element, lower, comparator) && is_below(element, upper, comparator)
                })
                .fold(left.clone(), |tree, element| {
                    tree.insert_with(element.clone(), comparator, OnEqual::Keep)
                }),
            (Self::Node(node), _) => {
                let pivot = node.value();
                let less = Self::hedge_union(
                    node.left(),
                    &right.trim(lower, Bound::Excluded(pivot), comparator),
                    lower,
                    Bound::Excluded(pivot),
                    comparator,
                );
                let greater = Self::hedge_union(
                    node.right(),
                    &right.trim(Bound::Excluded(pivot), upper, comparator),
                    Bound::Excluded(pivot),
                    upper,
                    comparator,
                );
                if less.ptr_eq(node.left()) && greater.ptr_eq(node.right()) {
                    return left.clone();
                }
                Self::join(less, pivot.clone(), greater)
            }
        }
    }

    /// Returns the elements of `self` that also occur in `other`.
    ///
    /// # Complexity
    ///
    /// O(m log(n/m + 1)) for trees of sizes m ≤ n.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let left = Tree::from_iter_with(0..20, &NaturalOrder);
    /// let right = Tree::from_iter_with((0..20).step_by(5), &NaturalOrder);
    ///
    /// assert_eq!(left.intersection(&right, &NaturalOrder).to_vec(), vec![0, 5, 10, 15]);
    /// ```
    #[must_use]
    pub fn intersection<C>(&self, other: &Self, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            _ if self.ptr_eq(other) => {
                trace!("intersection of a tree with itself");
                self.clone()
            }
            (Self::Run(left_run), Self::Run(right_run)) => Self::from_sorted_vec(
                intersection_slices(left_run.as_slice(), right_run.as_slice(), comparator),
            ),
            (Self::Run(left_run), _) => Self::from_sorted_vec(
                left_run
                    .as_slice()
                    .iter()
                    .filter(|element| other.contains(element, comparator))
                    .cloned()
                    .collect(),
            ),
            (_, Self::Run(right_run)) => Self::from_sorted_vec(
                right_run
                    .as_slice()
                    .iter()
                    .filter_map(|element| self.get(element, comparator))
                    .cloned()
                    .collect(),
            ),
            (Self::Node(left_node), Self::Node(right_node)) => {
                if left_node.size() >= right_node.size() {
                    let split = other.split(left_node.value(), comparator);
                    let less = left_node.left().intersection(&split.less, comparator);
                    let greater = left_node.right().intersection(&split.greater, comparator);
                    if split.is_present() {
                        Self::join(less, left_node.value().clone(), greater)
                    } else {
                        Self::concatenate(less, greater)
                    }
                } else {
                    let split = self.split(right_node.value(), comparator);
                    let less = split.less.intersection(right_node.left(), comparator);
                    let greater = split.greater.intersection(right_node.right(), comparator);
                    match split.found {
                        Some(found) => Self::join(less, found, greater),
                        None => Self::concatenate(less, greater),
                    }
                }
            }
        }
    }

    /// Returns the elements of `self` that do not occur in `other`.
    ///
    /// # Complexity
    ///
    /// O(m log(n/m + 1)) for trees of sizes m ≤ n.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let left = Tree::from_iter_with(0..10, &NaturalOrder);
    /// let right = Tree::from_iter_with(3..20, &NaturalOrder);
    ///
    /// assert_eq!(left.difference(&right, &NaturalOrder).to_vec(), vec![0, 1, 2]);
    /// ```
    #[must_use]
    pub fn difference<C>(&self, other: &Self, comparator: &C) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        match (self, other) {
            (Self::Empty, _) => Self::Empty,
            (_, Self::Empty) => self.clone(),
            _ if self.ptr_eq(other) => {
                trace!("difference of a tree with itself");
                Self::Empty
            }
            (Self::Run(left_run), Self::Run(right_run)) => Self::from_sorted_vec(
                difference_slices(left_run.as_slice(), right_run.as_slice(), comparator),
            ),
            (Self::Run(left_run), _) => Self::from_sorted_vec(
                left_run
                    .as_slice()
                    .iter()
                    .filter(|element| !other.contains(element, comparator))
                    .cloned()
                    .collect(),
            ),
            (_, Self::Run(right_run)) => right_run
                .as_slice()
                .iter()
                .fold(self.clone(), |tree, element| tree.remove(element, comparator)),
            (Self::Node(left_node), Self::Node(right_node)) => {
                if left_node.size() >= right_node.size() {
                    let split = other.split(left_node.value(), comparator);
                    let less = left_node.left().difference(&split.less, comparator);
                    let greater = left_node.right().difference(&split.greater, comparator);
                    if split.is_present() {
                        Self::concatenate(less, greater)
                    } else if less.ptr_eq(left_node.left()) && greater.ptr_eq(left_node.right()) {
                        self.clone()
                    } else {
                        Self::join(less, left_node.value().clone(), greater)
                    }
                } else {
                    let split = self.split(right_node.value(), comparator);
                    let less = split.less.difference(right_node.left(), comparator);
                    let greater = split.greater.difference(right_node.right(), comparator);
                    if less.len() + greater.len() == self.len() {
                        return self.clone();
                    }
                    Self::concatenate(less, greater)
                }
            }
        }
    }

    /// Returns `true` if every element of `self` occurs in `other`.
    ///
    /// # Complexity
    ///
    /// O(m log(n/m + 1)) for trees of sizes m ≤ n; O(1) when `self` is larger.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let small = Tree::from_iter_with([1, 3, 5, 7], &NaturalOrder);
    /// let large = small.union(&Tree::from_iter_with([2, 4], &NaturalOrder), &NaturalOrder);
    ///
    /// assert!(small.is_subset(&large, &NaturalOrder));
    /// assert!(!large.is_subset(&small, &NaturalOrder));
    /// ```
    #[must_use]
    pub fn is_subset<C>(&self, other: &Self, comparator: &C) -> bool
    where
        C: Comparator<E> + ?Sized,
    {
        if self.len() > other.len() {
            trace!(
                "subset rejected by size: {} > {}",
                self.len(),
                other.len()
            );
            return false;
        }
        match self {
            Self::Empty => true,
            _ if self.ptr_eq(other) => true,
            Self::Run(run) => run
                .as_slice()
                .iter()
                .all(|element| other.contains(element, comparator)),
            Self::Node(node) => {
                let split = other.split(node.value(), comparator);
                split.is_present()
                    && node.left().is_subset(&split.less, comparator)
                    && node.right().is_subset(&split.greater, comparator)
            }
        }
    }
}
