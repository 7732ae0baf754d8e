//! The rebalancer: the single place where nodes are assembled.
//!
//! Every structural edit rebuilds its ancestors through [`Tree::rebalance`],
//! which restores the weight invariant with rotations and collapses small
//! subtrees into runs. Rotations recombine four subtrees that are each valid on
//! their own; the inner recombinations are smaller than the input and the outer
//! one only ever rotates further toward the light side, so the recursion ends.

use super::{MAX_RUN, ROTATION_RATIO, RunBuffer, Tree, WEIGHT_RATIO};
use log::trace;

impl<E: Clone> Tree<E> {
    /// Builds a valid tree from `left`, `value` and `right`.
    ///
    /// Both sides must be valid trees with `left < value < right`. Any weight
    /// difference between them is repaired, though large differences should go
    /// through [`Tree::join`], which descends first and stays logarithmic.
    pub(crate) fn rebalance(left: Self, value: E, right: Self) -> Self {
        let left_size = left.len();
        let right_size = right.len();

        if left_size + right_size < MAX_RUN {
            Self::flatten(&left, value, &right)
        } else if left_size > WEIGHT_RATIO * right_size {
            Self::rotate_right(left, value, right)
        } else if right_size > WEIGHT_RATIO * left_size {
            Self::rotate_left(left, value, right)
        } else {
            Self::node(left, value, right)
        }
    }

    /// Moves weight from a heavy left side to the right.
    fn rotate_right(left: Self, value: E, right: Self) -> Self {
        let Some((outer, pivot, inner)) = left.expose() else {
            return Self::node(left, value, right);
        };

        if inner.len() < ROTATION_RATIO * outer.len() {
            trace!(
                "single right rotation: {} | {} | {}",
                outer.len(),
                inner.len(),
                right.len()
            );
            return Self::rebalance(outer, pivot, Self::rebalance(inner, value, right));
        }

        let Some((inner_left, inner_pivot, inner_right)) = inner.expose() else {
            return Self::rebalance(outer, pivot, Self::rebalance(inner, value, right));
        };
        trace!(
            "double right rotation: {} | {} | {} | {}",
            outer.len(),
            inner_left.len(),
            inner_right.len(),
            right.len()
        );
        Self::rebalance(
            Self::rebalance(outer, pivot, inner_left),
            inner_pivot,
            Self::rebalance(inner_right, value, right),
        )
    }

    /// Moves weight from a heavy right side to the left.
    fn rotate_left(left: Self, value: E, right: Self) -> Self {
        let Some((inner, pivot, outer)) = right.expose() else {
            return Self::node(left, value, right);
        };

        if inner.len() < ROTATION_RATIO * outer.len() {
            trace!(
                "single left rotation: {} | {} | {}",
                left.len(),
                inner.len(),
                outer.len()
            );
            return Self::rebalance(Self::rebalance(left, value, inner), pivot, outer);
        }

        let Some((inner_left, inner_pivot, inner_right)) = inner.expose() else {
            return Self::rebalance(Self::rebalance(left, value, inner), pivot, outer);
        };
        trace!(
            "double left rotation: {} | {} | {} | {}",
            left.len(),
            inner_left.len(),
            inner_right.len(),
            outer.len()
        );
        Self::rebalance(
            Self::rebalance(left, value, inner_left),
            inner_pivot,
            Self::rebalance(inner_right, pivot, outer),
        )
    }

    /// Collects `left`, `value` and `right` in order into one buffer.
    ///
    /// Produces a run when the total fits, a perfectly balanced tree otherwise.
    pub(crate) fn flatten(left: &Self, value: E, right: &Self) -> Self {
        let mut elements = RunBuffer::with_capacity(left.len() + right.len() + 1);
        elements.extend(left.iter().cloned());
        elements.push(value);
        elements.extend(right.iter().cloned());
        Self::from_buffer(elements)
    }
}
