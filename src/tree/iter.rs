//! In-order traversal and folds.
//!
//! Both iterators are lazy: they hold the path of nodes still to be visited
//! and the run currently being read, so creating one is O(log n) and a full
//! traversal is O(n). A tree can be iterated any number of times.

use super::{Node, ReferenceCounter, Run, Tree};
use std::iter::FusedIterator;

// =============================================================================
// Borrowing Iterator
// =============================================================================

/// In-order iterator over references to the elements of a [`Tree`].
///
/// Created by [`Tree::iter`].
pub struct Iter<'a, E> {
    stack: Vec<&'a Node<E>>,
    run: std::slice::Iter<'a, E>,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    fn new(tree: &'a Tree<E>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            run: std::slice::Iter::default(),
            remaining: tree.len(),
        };
        iter.descend(tree);
        iter
    }

    /// Pushes the left spine of `tree` and opens the run at its bottom.
    fn descend(&mut self, mut tree: &'a Tree<E>) {
        loop {
            match tree {
                Tree::Empty => return,
                Tree::Run(run) => {
                    self.run = run.as_slice().iter();
                    return;
                }
                Tree::Node(node) => {
                    self.stack.push(node);
                    tree = node.left();
                }
            }
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(element) = self.run.next() {
            self.remaining -= 1;
            return Some(element);
        }
        let node = self.stack.pop()?;
        self.descend(node.right());
        self.remaining -= 1;
        Some(node.value())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            run: self.run.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Owning Iterator
// =============================================================================

/// In-order iterator over the elements of a [`Tree`], by value.
///
/// Nodes shared with other trees stay alive while the iterator needs them;
/// elements are cloned out as they are reached.
///
/// Created by [`IntoIterator::into_iter`] on a `Tree`.
pub struct IntoIter<E> {
    stack: Vec<ReferenceCounter<Node<E>>>,
    run: Option<ReferenceCounter<Run<E>>>,
    index: usize,
    remaining: usize,
}

impl<E> IntoIter<E> {
    fn new(tree: Tree<E>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            run: None,
            index: 0,
            remaining: tree.len(),
        };
        iter.descend(tree);
        iter
    }

    fn descend(&mut self, mut tree: Tree<E>) {
        loop {
            match tree {
                Tree::Empty => return,
                Tree::Run(run) => {
                    self.run = Some(run);
                    self.index = 0;
                    return;
                }
                Tree::Node(node) => {
                    let left = node.left().clone();
                    self.stack.push(node);
                    tree = left;
                }
            }
        }
    }
}

impl<E: Clone> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(run) = &self.run
            && let Some(element) = run.as_slice().get(self.index)
        {
            let element = element.clone();
            self.index += 1;
            self.remaining -= 1;
            return Some(element);
        }
        self.run = None;

        let node = self.stack.pop()?;
        self.descend(node.right().clone());
        self.remaining -= 1;
        Some(node.value().clone())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E: Clone> ExactSizeIterator for IntoIter<E> {}

impl<E: Clone> FusedIterator for IntoIter<E> {}

// =============================================================================
// Traversal Methods
// =============================================================================

impl<E> Tree<E> {
    /// Returns an iterator over the elements in increasing order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with([3, 1, 2], &NaturalOrder);
    /// let collected: Vec<&i32> = tree.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(self)
    }

    /// Folds the elements from smallest to largest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with([1, 2, 3], &NaturalOrder);
    /// let digits = tree.fold_left(String::new(), |text, digit| text + &digit.to_string());
    /// assert_eq!(digits, "123");
    /// ```
    pub fn fold_left<B, F>(&self, init: B, function: F) -> B
    where
        F: FnMut(B, &E) -> B,
    {
        self.iter().fold(init, function)
    }

    /// Folds the elements from largest to smallest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with([1, 2, 3], &NaturalOrder);
    /// let digits = tree.fold_right(String::new(), |digit, text| text + &digit.to_string());
    /// assert_eq!(digits, "321");
    /// ```
    pub fn fold_right<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(&E, B) -> B,
    {
        self.fold_right_with(init, &mut function)
    }

    fn fold_right_with<B, F>(&self, accumulator: B, function: &mut F) -> B
    where
        F: FnMut(&E, B) -> B,
    {
        match self {
            Self::Empty => accumulator,
            Self::Run(run) => run
                .as_slice()
                .iter()
                .rev()
                .fold(accumulator, |accumulator, element| {
                    function(element, accumulator)
                }),
            Self::Node(node) => {
                let accumulator = node.right().fold_right_with(accumulator, function);
                let accumulator = function(node.value(), accumulator);
                node.left().fold_right_with(accumulator, function)
            }
        }
    }
}

impl<E: Clone> Tree<E> {
    /// Combines the elements from smallest to largest, starting from the
    /// smallest. Returns `None` for an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weftree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::from_iter_with(1..=4, &NaturalOrder);
    /// assert_eq!(tree.reduce(|product, value| product * value), Some(24));
    /// assert_eq!(Tree::<i32>::new().reduce(|sum, value| sum + value), None);
    /// ```
    pub fn reduce<F>(&self, function: F) -> Option<E>
    where
        F: FnMut(E, &E) -> E,
    {
        let mut elements = self.iter();
        let first = elements.next()?.clone();
        Some(elements.fold(first, function))
    }

    /// Copies the elements into a vector in increasing order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<E> {
        self.iter().cloned().collect()
    }
}

impl<'a, E> IntoIterator for &'a Tree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Clone> IntoIterator for Tree<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
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
    #[case(0)]
    #[case(1)]
    #[case(8)]
    #[case(9)]
    #[case(333)]
    fn test_iter_visits_in_order(#[case] length: i32) {
        let tree = tree_of(&(0..length).rev().collect::<Vec<_>>());
        let visited: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(visited, (0..length).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_iter_is_exact_size() {
        let tree = tree_of(&(0..100).collect::<Vec<_>>());
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 100);
        iter.nth(39);
        assert_eq!(iter.len(), 60);
        assert_eq!(iter.by_ref().count(), 60);
        assert_eq!(iter.next(), None);
    }

    #[rstest]
    fn test_iter_is_restartable() {
        let tree = tree_of(&[4, 2, 6]);
        let first: Vec<_> = tree.iter().collect();
        let second: Vec<_> = tree.iter().collect();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_into_iter_yields_owned_elements() {
        let tree = Tree::from_iter_with(
            (0..50).map(|value| format!("{value:02}")),
            &NaturalOrder,
        );
        let kept = tree.clone();
        let collected: Vec<String> = tree.into_iter().collect();
        assert_eq!(collected.len(), 50);
        assert_eq!(collected.first().map(String::as_str), Some("00"));
        assert_eq!(collected.last().map(String::as_str), Some("49"));
        assert_eq!(kept.len(), 50);
    }

    #[rstest]
    fn test_into_iter_size_hint() {
        let mut iter = tree_of(&(0..20).collect::<Vec<_>>()).into_iter();
        assert_eq!(iter.size_hint(), (20, Some(20)));
        iter.next();
        assert_eq!(iter.len(), 19);
    }

    #[rstest]
    fn test_for_loop_over_reference() {
        let tree = tree_of(&[3, 1, 2]);
        let mut sum = 0;
        for value in &tree {
            sum += value;
        }
        assert_eq!(sum, 6);
    }

    #[rstest]
    fn test_fold_directions() {
        let tree = tree_of(&(1..=20).collect::<Vec<_>>());
        let forward = tree.fold_left(Vec::new(), |mut seen, value| {
            seen.push(*value);
            seen
        });
        let backward = tree.fold_right(Vec::new(), |value, mut seen| {
            seen.push(*value);
            seen
        });
        assert_eq!(forward, (1..=20).collect::<Vec<_>>());
        assert_eq!(backward, (1..=20).rev().collect::<Vec<_>>());
    }

    #[rstest]
    fn test_reduce_takes_smallest_as_seed() {
        let tree = tree_of(&[10, 3, 7]);
        assert_eq!(tree.reduce(|first, _| first), Some(3));
        assert_eq!(tree.reduce(|_, value| *value), Some(10));
    }
}
