//! Persistent weight-balanced tree with compact run leaves.
//!
//! This module provides [`Tree`], the engine underneath the ordered set and map
//! façades. A tree is one of three shapes:
//!
//! - `Empty`: no elements
//! - `Run`: up to [`MAX_RUN`] strictly increasing elements stored contiguously
//! - `Node`: a left subtree, a value, a right subtree and the cached element count
//!
//! # Invariants
//!
//! Every tree reachable through this API satisfies:
//!
//! 1. In-order traversal is strictly increasing under the comparator it was built with.
//! 2. A node's cached size equals the number of elements below it.
//! 3. Neither side of a node holds more than [`WEIGHT_RATIO`] times the elements of the other.
//! 4. Any subtree of at most [`MAX_RUN`] elements is a run, never a node.
//! 5. Nodes and runs are never modified once built; edits copy the path they touch.
//!
//! Invariants 3 and 4 together bound the depth by a constant times `log2(n + 1)`.
//!
//! # Structural Sharing
//!
//! Cloning a tree is O(1). An insert or remove allocates O(log n) new nodes and
//! shares everything else with the tree it started from:
//!
//! ```rust
//! use weftree::{NaturalOrder, Tree};
//!
//! let base = Tree::from_iter_with(0..100, &NaturalOrder);
//! let extended = base.insert(1000, &NaturalOrder);
//!
//! assert_eq!(base.len(), 100);     // original unchanged
//! assert_eq!(extended.len(), 101); // new version
//! ```
//!
//! # Time Complexity
//!
//! | Operation                                | Complexity           |
//! |------------------------------------------|----------------------|
//! | `insert`, `remove`, `contains`, `get`    | O(log n)             |
//! | `remove_min`, `remove_max`               | O(log n)             |
//! | `nth`, `rank`                            | O(log n)             |
//! | `split`, `join`, `concatenate`           | O(log n)             |
//! | `union`, `intersection`, `difference`    | O(m log(n/m + 1))    |
//! | `len`, `is_empty`, `clone`               | O(1)                 |

use smallvec::SmallVec;
use static_assertions::const_assert;
use std::fmt;

mod edit;
mod iter;
mod join;
mod node;
mod rebalance;
mod run;
mod set_ops;
mod validate;

pub use iter::{IntoIter, Iter};
pub use join::Split;
pub use node::Node;
pub use run::Run;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted pointer shared between tree versions.
///
/// `std::sync::Arc` with the `arc` feature, `std::rc::Rc` otherwise.
#[cfg(feature = "arc")]
pub type ReferenceCounter<T> = std::sync::Arc<T>;

/// Reference-counted pointer shared between tree versions.
///
/// `std::sync::Arc` with the `arc` feature, `std::rc::Rc` otherwise.
#[cfg(not(feature = "arc"))]
pub type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Balancing Constants
// =============================================================================

/// Largest number of elements stored in a single run.
pub const MAX_RUN: usize = 8;

/// Rebalancing exponent `k`: a node may be at most `2^k` times heavier on one side.
pub const WEIGHT_EXPONENT: u32 = 2;

/// Permitted size ratio between the two sides of a node.
pub const WEIGHT_RATIO: usize = 1 << WEIGHT_EXPONENT;

/// A rotation is single when the inner grandchild holds fewer than this many
/// times the elements of the outer grandchild, double otherwise.
pub(crate) const ROTATION_RATIO: usize = 2;

const_assert!(MAX_RUN >= 3);
const_assert!(ROTATION_RATIO < WEIGHT_RATIO);

/// Inline storage for the elements of one run.
pub(crate) type RunBuffer<E> = SmallVec<[E; MAX_RUN]>;

// =============================================================================
// Tree Definition
// =============================================================================

/// A persistent, weight-balanced ordered tree.
///
/// The tree does not remember its comparator: every operation that compares
/// elements takes one, and callers must pass the same ordering to every
/// operation on a given tree. The façades in [`crate::collections`] bundle the
/// two together.
///
/// Runs and nodes have no public constructors, so a tree can only be obtained
/// from the operations below and always satisfies the module invariants.
///
/// # Examples
///
/// ```rust
/// use weftree::{NaturalOrder, Tree};
///
/// let tree = Tree::new()
///     .insert(3, &NaturalOrder)
///     .insert(1, &NaturalOrder)
///     .insert(2, &NaturalOrder);
///
/// assert_eq!(tree.to_vec(), vec![1, 2, 3]);
/// assert!(tree.contains(&2, &NaturalOrder));
/// ```
pub enum Tree<E> {
    /// No elements.
    Empty,
    /// A compact sorted run of at most [`MAX_RUN`] elements.
    Run(ReferenceCounter<Run<E>>),
    /// A balanced internal node.
    Node(ReferenceCounter<Node<E>>),
}

impl<E> Tree<E> {
    /// Creates an empty tree.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::Empty
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Run(run) => run.len(),
            Self::Node(node) => node.size(),
        }
    }

    /// Returns `true` if the tree holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if both trees are the same shared value.
    ///
    /// Operations that leave a tree unchanged (removing an absent element, for
    /// instance) hand back the same root, which this detects in O(1).
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with(0..20, &NaturalOrder);
    /// assert!(tree.remove(&100, &NaturalOrder).ptr_eq(&tree));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Run(left), Self::Run(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Node(left), Self::Node(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Wraps a node without checking the balance or compaction invariants.
    pub(crate) fn node(left: Self, value: E, right: Self) -> Self {
        Self::Node(ReferenceCounter::new(Node::new(left, value, right)))
    }

    /// Builds a perfectly balanced tree from strictly increasing elements.
    ///
    /// # Preconditions
    ///
    /// `elements` must be strictly increasing under the comparator the tree
    /// will be used with. A bare tree holds no comparator, so the order is not
    /// checked here; the `from_sorted_vec` constructors of `OrderedSet` and
    /// `OrderedMap` check it in debug builds. An unsorted
    /// input gives a tree whose lookups are unspecified, which
    /// [`Tree::validate`] reports.
    ///
    /// The elements are moved into the tree without being cloned.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_sorted_vec((0..1000).collect());
    /// assert_eq!(tree.len(), 1000);
    /// assert!(tree.validate(&NaturalOrder).is_ok());
    /// ```
    #[must_use]
    pub fn from_sorted_vec(elements: Vec<E>) -> Self {
        let length = elements.len();
        Self::from_sorted_iter(&mut elements.into_iter(), length)
    }

    /// Builds a balanced tree from the next `length` elements of `elements`.
    fn from_sorted_iter<I>(elements: &mut I, length: usize) -> Self
    where
        I: Iterator<Item = E>,
    {
        if length <= MAX_RUN {
            let run: RunBuffer<E> = elements.by_ref().take(length).collect();
            return if run.is_empty() {
                Self::Empty
            } else {
                Self::Run(ReferenceCounter::new(Run::from_buffer(run)))
            };
        }
        let middle = length / 2;
        let left = Self::from_sorted_iter(elements, middle);
        let Some(value) = elements.next() else {
            return left;
        };
        let right = Self::from_sorted_iter(elements, length - middle - 1);
        Self::node(left, value, right)
    }
}

impl<E: Clone> Tree<E> {
    /// Creates a tree holding one element.
    #[inline]
    #[must_use]
    pub fn singleton(value: E) -> Self {
        let mut elements = RunBuffer::new();
        elements.push(value);
        Self::Run(ReferenceCounter::new(Run::from_buffer(elements)))
    }

    /// Builds a tree by inserting every element of `elements`.
    ///
    /// Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_iter_with<I, C>(elements: I, comparator: &C) -> Self
    where
        I: IntoIterator<Item = E>,
        C: crate::Comparator<E> + ?Sized,
    {
        elements
            .into_iter()
            .fold(Self::new(), |tree, element| tree.insert(element, comparator))
    }

    /// Splits a tree into `(left, value, right)`.
    ///
    /// A node exposes its own fields; a run is cut at its midpoint so that it
    /// can take part in rotations like a node.
    pub(crate) fn expose(&self) -> Option<(Self, E, Self)> {
        match self {
            Self::Empty => None,
            Self::Run(run) => {
                let elements = run.as_slice();
                let middle = elements.len() / 2;
                Some((
                    Self::from_sorted_slice(&elements[..middle]),
                    elements[middle].clone(),
                    Self::from_sorted_slice(&elements[middle + 1..]),
                ))
            }
            Self::Node(node) => Some((
                node.left().clone(),
                node.value().clone(),
                node.right().clone(),
            )),
        }
    }

    pub(crate) fn from_sorted_slice(elements: &[E]) -> Self {
        match elements.len() {
            0 => Self::Empty,
            length if length <= MAX_RUN => Self::Run(ReferenceCounter::new(Run::from_buffer(
                elements.iter().cloned().collect(),
            ))),
            length => {
                let middle = length / 2;
                Self::node(
                    Self::from_sorted_slice(&elements[..middle]),
                    elements[middle].clone(),
                    Self::from_sorted_slice(&elements[middle + 1..]),
                )
            }
        }
    }

    /// Turns a run buffer into a tree, splitting it when it overflowed.
    pub(crate) fn from_buffer(elements: RunBuffer<E>) -> Self {
        match elements.len() {
            0 => Self::Empty,
            length if length <= MAX_RUN => {
                Self::Run(ReferenceCounter::new(Run::from_buffer(elements)))
            }
            _ => Self::from_sorted_slice(&elements),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<E> Clone for Tree<E> {
    #[inline]
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Run(run) => Self::Run(ReferenceCounter::clone(run)),
            Self::Node(node) => Self::Node(ReferenceCounter::clone(node)),
        }
    }
}

impl<E> Default for Tree<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Trees are equal when their in-order sequences are equal, whatever their shape.
impl<E: PartialEq> PartialEq for Tree<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.len() == other.len() && self.iter().eq(other.iter()))
    }
}

impl<E: Eq> Eq for Tree<E> {}

impl<E: fmt::Debug> fmt::Debug for Tree<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaturalOrder;
    use rstest::rstest;

    #[rstest]
    fn test_new_is_empty() {
        let tree: Tree<i32> = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[rstest]
    fn test_singleton_is_run() {
        let tree = Tree::singleton(7);
        assert!(matches!(tree, Tree::Run(_)));
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(8)]
    #[case(9)]
    #[case(100)]
    #[case(1023)]
    fn test_from_sorted_vec_is_valid(#[case] length: i32) {
        let tree = Tree::from_sorted_vec((0..length).collect());
        assert_eq!(tree.len(), usize::try_from(length).unwrap());
        assert_eq!(tree.validate(&NaturalOrder), Ok(()));
        assert_eq!(tree.to_vec(), (0..length).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_from_sorted_vec_moves_elements() {
        let tree = Tree::from_sorted_vec((0..50).map(|value| format!("{value:02}")).collect());
        assert_eq!(tree.len(), 50);
        assert_eq!(tree.first().map(String::as_str), Some("00"));
        assert_eq!(tree.nth(25).map(String::as_str), Some("25"));
        assert_eq!(tree, Tree::from_sorted_slice(&tree.to_vec()));
    }

    #[rstest]
    fn test_small_sorted_vec_is_single_run() {
        let tree = Tree::from_sorted_vec(vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(matches!(tree, Tree::Run(_)));
    }

    #[rstest]
    fn test_overflowing_buffer_splits_at_midpoint() {
        let buffer: RunBuffer<i32> = (0..9).collect();
        let Tree::Node(node) = Tree::from_buffer(buffer) else {
            panic!("nine elements must form a node");
        };
        assert_eq!(*node.value(), 4);
        assert_eq!(node.left().len(), 4);
        assert_eq!(node.right().len(), 4);
    }

    #[rstest]
    fn test_expose_run_takes_middle() {
        let tree = Tree::from_sorted_vec(vec![1, 2, 3, 4, 5]);
        let (left, value, right) = tree.expose().unwrap();
        assert_eq!(left.to_vec(), vec![1, 2]);
        assert_eq!(value, 3);
        assert_eq!(right.to_vec(), vec![4, 5]);
    }

    #[rstest]
    fn test_expose_empty_is_none() {
        assert!(Tree::<i32>::new().expose().is_none());
    }

    #[rstest]
    fn test_clone_shares_root() {
        let tree = Tree::from_sorted_vec((0..50).collect());
        let copy = tree.clone();
        assert!(copy.ptr_eq(&tree));
    }

    #[rstest]
    fn test_equality_ignores_shape() {
        let bulk = Tree::from_sorted_vec((0..40).collect());
        let inserted = Tree::from_iter_with((0..40).rev(), &NaturalOrder);
        assert!(!bulk.ptr_eq(&inserted));
        assert_eq!(bulk, inserted);
    }

    #[rstest]
    fn test_debug_lists_elements_in_order() {
        let tree = Tree::from_iter_with([3, 1, 2], &NaturalOrder);
        assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
    }
}
