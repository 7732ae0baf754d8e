//! Structural checks for tests and diagnostics.

use super::{MAX_RUN, Tree, WEIGHT_RATIO};
use crate::{Comparator, InvariantViolation};
use log::debug;
use std::cmp::Ordering;

impl<E> Tree<E> {
    /// Returns the number of levels from the root to the deepest leaf.
    ///
    /// An empty tree has depth 0 and a run has depth 1. Balanced trees stay
    /// within a small constant times `log2(n + 1)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with(0..10_000, &NaturalOrder);
    /// assert!(tree.depth() <= 2 * 14);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Run(_) => 1,
            Self::Node(node) => 1 + node.left().depth().max(node.right().depth()),
        }
    }

    /// Checks every structural invariant of the tree.
    ///
    /// Verifies the order under `comparator`, cached sizes, the weight ratio,
    /// run compaction and run lengths. Trees built through this crate always
    /// pass unless the comparator is inconsistent; the check is meant for tests
    /// and debugging.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, ReverseOrder, InvariantViolation, Tree};
    ///
    /// let tree = Tree::from_iter_with([1, 2, 3], &NaturalOrder);
    /// assert_eq!(tree.validate(&NaturalOrder), Ok(()));
    /// assert_eq!(
    ///     tree.validate(&ReverseOrder(NaturalOrder)),
    ///     Err(InvariantViolation::Unsorted { position: 1 })
    /// );
    /// ```
    pub fn validate<C>(&self, comparator: &C) -> Result<(), InvariantViolation>
    where
        C: Comparator<E> + ?Sized,
    {
        self.check_shape()
            .and_then(|_| self.check_order(comparator))
            .inspect_err(|violation| debug!("tree of {} elements: {violation}", self.len()))
    }

    /// Checks sizes, balance and runs bottom-up; returns the counted size.
    fn check_shape(&self) -> Result<usize, InvariantViolation> {
        match self {
            Self::Empty => Ok(0),
            Self::Run(run) => match run.len() {
                0 => Err(InvariantViolation::EmptyRun),
                length if length > MAX_RUN => Err(InvariantViolation::RunOverflow {
                    length,
                    limit: MAX_RUN,
                }),
                length => Ok(length),
            },
            Self::Node(node) => {
                let left = node.left().check_shape()?;
                let right = node.right().check_shape()?;
                let actual = left + right + 1;

                if node.size() != actual {
                    return Err(InvariantViolation::SizeMismatch {
                        cached: node.size(),
                        actual,
                    });
                }
                if actual <= MAX_RUN {
                    return Err(InvariantViolation::Uncompacted { size: actual });
                }
                if left > WEIGHT_RATIO * right || right > WEIGHT_RATIO * left {
                    return Err(InvariantViolation::Unbalanced {
                        left,
                        right,
                        ratio: WEIGHT_RATIO,
                    });
                }
                Ok(actual)
            }
        }
    }

    fn check_order<C>(&self, comparator: &C) -> Result<(), InvariantViolation>
    where
        C: Comparator<E> + ?Sized,
    {
        let mut elements = self.iter();
        let Some(mut previous) = elements.next() else {
            return Ok(());
        };
        for (offset, element) in elements.enumerate() {
            if comparator.compare(previous, element) != Ordering::Less {
                return Err(InvariantViolation::Unsorted {
                    position: offset + 1,
                });
            }
            previous = element;
        }
        Ok(())
    }
}
