//! Compact run leaves.
//!
//! A run is a short, strictly increasing slice of elements that stands in for a
//! whole subtree once that subtree holds at most [`MAX_RUN`] elements. Searching
//! a run is a binary search; editing it copies at most `MAX_RUN + 1` elements.
//!
//! The set operations on two runs use index-based two-pointer merges, so both
//! inputs must be sorted under the same comparator.

use super::{MAX_RUN, RunBuffer};
use crate::Comparator;
use std::cmp::Ordering;

/// A sorted leaf holding between one and [`MAX_RUN`] elements.
pub struct Run<E> {
    elements: RunBuffer<E>,
}

impl<E> Run<E> {
    pub(crate) fn from_buffer(elements: RunBuffer<E>) -> Self {
        debug_assert!(
            !elements.is_empty() && elements.len() <= MAX_RUN,
            "run length {} outside 1..={MAX_RUN}",
            elements.len()
        );
        Self { elements }
    }

    /// Number of elements in the run.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`: empty runs are represented by `Tree::Empty`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The elements in increasing order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        &self.elements
    }

    /// Binary search with a probe that reports how the target compares to an element.
    ///
    /// `Ok(index)` when an equal element sits at `index`, `Err(index)` with the
    /// insertion point otherwise.
    pub(crate) fn locate<P>(&self, probe: P) -> Result<usize, usize>
    where
        P: Fn(&E) -> Ordering,
    {
        self.elements
            .binary_search_by(|element| probe(element).reverse())
    }

    /// Insertion point for the probed target and whether an equal element exists there.
    pub(crate) fn insert_position<P>(&self, probe: P) -> (usize, bool)
    where
        P: Fn(&E) -> Ordering,
    {
        match self.locate(probe) {
            Ok(index) => (index, true),
            Err(index) => (index, false),
        }
    }
}

impl<E: Clone> Run<E> {
    /// Copy of the run with `value` placed at `index`. May exceed [`MAX_RUN`].
    pub(crate) fn inserted(&self, index: usize, value: E) -> RunBuffer<E> {
        let mut elements = RunBuffer::with_capacity(self.elements.len() + 1);
        elements.extend(self.elements[..index].iter().cloned());
        elements.push(value);
        elements.extend(self.elements[index..].iter().cloned());
        elements
    }

    /// Copy of the run with the element at `index` swapped for `value`.
    pub(crate) fn replaced(&self, index: usize, value: E) -> RunBuffer<E> {
        let mut elements = self.elements.clone();
        elements[index] = value;
        elements
    }

    /// Copy of the run without the element at `index`.
    pub(crate) fn removed(&self, index: usize) -> RunBuffer<E> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != index)
            .map(|(_, element)| element.clone())
            .collect()
    }

    /// Partitions the run around the probed pivot.
    pub(crate) fn split<P>(&self, probe: P) -> (RunBuffer<E>, Option<E>, RunBuffer<E>)
    where
        P: Fn(&E) -> Ordering,
    {
        match self.locate(probe) {
            Ok(index) => (
                self.elements[..index].iter().cloned().collect(),
                Some(self.elements[index].clone()),
                self.elements[index + 1..].iter().cloned().collect(),
            ),
            Err(index) => (
                self.elements[..index].iter().cloned().collect(),
                None,
                self.elements[index..].iter().cloned().collect(),
            ),
        }
    }
}

// =============================================================================
// Sorted Slice Algebra
// =============================================================================

/// Merges two sorted slices, keeping the element from `left` when both hold an
/// equal one.
///
/// # Complexity
///
/// O(n + m); disjoint inputs are concatenated without per-element comparison.
pub(super) fn union_slices<E, C>(left: &[E], right: &[E], comparator: &C) -> Vec<E>
where
    E: Clone,
    C: Comparator<E> + ?Sized,
{
    let (Some(left_first), Some(left_last), Some(right_first), Some(right_last)) =
        (left.first(), left.last(), right.first(), right.last())
    else {
        return if left.is_empty() {
            right.to_vec()
        } else {
            left.to_vec()
        };
    };

    let mut result = Vec::with_capacity(left.len() + right.len());

    if comparator.compare(left_last, right_first) == Ordering::Less {
        result.extend_from_slice(left);
        result.extend_from_slice(right);
        return result;
    }
    if comparator.compare(right_last, left_first) == Ordering::Less {
        result.extend_from_slice(right);
        result.extend_from_slice(left);
        return result;
    }

    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match comparator.compare(&left[left_index], &right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index].clone());
                left_index += 1;
            }
            Ordering::Greater => {
                result.push(right[right_index].clone());
                right_index += 1;
            }
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result.extend_from_slice(&left[left_index..]);
    result.extend_from_slice(&right[right_index..]);
    result
}

/// Elements of `left` that also occur in `right`, taken from `left`.
pub(super) fn intersection_slices<E, C>(left: &[E], right: &[E], comparator: &C) -> Vec<E>
where
    E: Clone,
    C: Comparator<E> + ?Sized,
{
    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match comparator.compare(&left[left_index], &right[right_index]) {
            Ordering::Less => left_index += 1,
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result
}

/// Elements of `left` that do not occur in `right`.
pub(super) fn difference_slices<E, C>(left: &[E], right: &[E], comparator: &C) -> Vec<E>
where
    E: Clone,
    C: Comparator<E> + ?Sized,
{
    let mut result = Vec::with_capacity(left.len());
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match comparator.compare(&left[left_index], &right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index].clone());
                left_index += 1;
            }
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result.extend_from_slice(&left[left_index..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaturalOrder;
    use rstest::rstest;

    fn run_of(elements: &[i32]) -> Run<i32> {
        Run::from_buffer(elements.iter().copied().collect())
    }

    #[rstest]
    #[case(0, (0, false))]
    #[case(1, (0, true))]
    #[case(4, (2, false))]
    #[case(5, (2, true))]
    #[case(10, (4, false))]
    fn test_insert_position(#[case] target: i32, #[case] expected: (usize, bool)) {
        let run = run_of(&[1, 3, 5, 7]);
        assert_eq!(
            run.insert_position(|element| NaturalOrder.compare(&target, element)),
            expected
        );
    }

    #[rstest]
    fn test_inserted_may_overflow() {
        let run = run_of(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let elements = run.inserted(8, 9);
        assert_eq!(elements.len(), MAX_RUN + 1);
        assert_eq!(elements.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[rstest]
    fn test_removed_drops_one_element() {
        let run = run_of(&[1, 3, 5]);
        assert_eq!(run.removed(1).as_slice(), &[1, 5]);
        assert_eq!(run.as_slice(), &[1, 3, 5]);
    }

    #[rstest]
    fn test_replaced_keeps_length() {
        let run = run_of(&[1, 3, 5]);
        assert_eq!(run.replaced(2, 6).as_slice(), &[1, 3, 6]);
    }

    #[rstest]
    #[case(3, vec![1, 2], None, vec![4, 5])]
    #[case(4, vec![1, 2], Some(4), vec![5])]
    #[case(0, vec![], None, vec![1, 2, 4, 5])]
    #[case(9, vec![1, 2, 4, 5], None, vec![])]
    fn test_split(
        #[case] pivot: i32,
        #[case] less: Vec<i32>,
        #[case] found: Option<i32>,
        #[case] greater: Vec<i32>,
    ) {
        let run = run_of(&[1, 2, 4, 5]);
        let (actual_less, actual_found, actual_greater) =
            run.split(|element| NaturalOrder.compare(&pivot, element));
        assert_eq!(actual_less.as_slice(), less.as_slice());
        assert_eq!(actual_found, found);
        assert_eq!(actual_greater.as_slice(), greater.as_slice());
    }

    #[rstest]
    #[case(&[1, 3, 5], &[2, 4], vec![1, 2, 3, 4, 5])]
    #[case(&[1, 2], &[5, 6], vec![1, 2, 5, 6])]
    #[case(&[5, 6], &[1, 2], vec![1, 2, 5, 6])]
    #[case(&[], &[1], vec![1])]
    #[case(&[1, 2, 3], &[2, 3, 4], vec![1, 2, 3, 4])]
    fn test_union_slices(#[case] left: &[i32], #[case] right: &[i32], #[case] expected: Vec<i32>) {
        assert_eq!(union_slices(left, right, &NaturalOrder), expected);
    }

    #[rstest]
    fn test_union_slices_prefers_left_element() {
        let by_key = |left: &(i32, char), right: &(i32, char)| left.0.cmp(&right.0);
        let merged = union_slices(&[(1, 'a'), (2, 'a')], &[(2, 'b'), (3, 'b')], &by_key);
        assert_eq!(merged, vec![(1, 'a'), (2, 'a'), (3, 'b')]);
    }

    #[rstest]
    #[case(&[1, 2, 3, 4], &[2, 4, 6], vec![2, 4])]
    #[case(&[1, 2], &[3, 4], vec![])]
    fn test_intersection_slices(
        #[case] left: &[i32],
        #[case] right: &[i32],
        #[case] expected: Vec<i32>,
    ) {
        assert_eq!(intersection_slices(left, right, &NaturalOrder), expected);
    }

    #[rstest]
    #[case(&[1, 2, 3, 4], &[2, 4, 6], vec![1, 3])]
    #[case(&[1, 2], &[], vec![1, 2])]
    fn test_difference_slices(
        #[case] left: &[i32],
        #[case] right: &[i32],
        #[case] expected: Vec<i32>,
    ) {
        assert_eq!(difference_slices(left, right, &NaturalOrder), expected);
    }
}
