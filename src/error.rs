//! Structural invariant violations reported by [`Tree::validate`].
//!
//! None of the tree operations fail at runtime: absence is reported through
//! `Option`, and an empty tree is an ordinary value. These errors only describe
//! a tree that breaks one of its structural invariants, which cannot happen
//! through the public API unless the comparator is inconsistent.
//!
//! [`Tree::validate`]: crate::tree::Tree::validate

use thiserror::Error;

/// A broken structural invariant found while validating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Two neighbours of the in-order sequence are not strictly increasing.
    #[error("element at in-order position {position} does not follow its predecessor")]
    Unsorted {
        /// In-order index of the offending element.
        position: usize,
    },

    /// A node's cached size disagrees with the number of elements below it.
    #[error("node caches size {cached} but holds {actual} elements")]
    SizeMismatch {
        /// The size stored in the node.
        cached: usize,
        /// The size obtained by counting.
        actual: usize,
    },

    /// One side of a node outweighs the other by more than the weight ratio.
    #[error("node with {left} elements on the left and {right} on the right exceeds ratio {ratio}")]
    Unbalanced {
        /// Elements in the left subtree.
        left: usize,
        /// Elements in the right subtree.
        right: usize,
        /// The permitted ratio.
        ratio: usize,
    },

    /// A subtree small enough to be a run is stored as a node.
    #[error("subtree of {size} elements is a node, expected a run")]
    Uncompacted {
        /// Elements in the subtree.
        size: usize,
    },

    /// A run holds more elements than a run may hold.
    #[error("run holds {length} elements, the limit is {limit}")]
    RunOverflow {
        /// Elements in the run.
        length: usize,
        /// The run limit.
        limit: usize,
    },

    /// A run with no elements is stored inside the tree.
    #[error("empty run stored in tree")]
    EmptyRun,
}
