//! Internal balanced node.

use super::Tree;

/// An internal vertex: everything in `left` precedes `value`, everything in
/// `right` follows it, and `size` counts the elements of the whole subtree.
///
/// Nodes are immutable and only built by the tree operations, so the cached
/// size is always exact and the two sides always satisfy the weight ratio.
pub struct Node<E> {
    left: Tree<E>,
    value: E,
    right: Tree<E>,
    size: usize,
}

impl<E> Node<E> {
    pub(crate) fn new(left: Tree<E>, value: E, right: Tree<E>) -> Self {
        let size = left.len() + right.len() + 1;
        Self {
            left,
            value,
            right,
            size,
        }
    }

    /// Subtree of elements preceding [`Node::value`].
    #[inline]
    #[must_use]
    pub const fn left(&self) -> &Tree<E> {
        &self.left
    }

    /// The element stored at this node.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> &E {
        &self.value
    }

    /// Subtree of elements following [`Node::value`].
    #[inline]
    #[must_use]
    pub const fn right(&self) -> &Tree<E> {
        &self.right
    }

    /// Number of elements in this subtree, this node included.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}
