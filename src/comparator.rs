//! Three-way comparators.
//!
//! A [`Comparator`] is the total order a tree is built under. It is passed
//! explicitly to every operation that compares elements; nothing in this crate
//! reaches for a global ordering.
//!
//! # Contract
//!
//! Implementations must be a strict total order and must answer consistently for
//! the whole lifetime of every tree built with them. Violations are not detected:
//! the resulting trees are unspecified, though never memory-unsafe.
//!
//! # Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//! use weftree::comparator::{Comparator, NaturalOrder, ReverseOrder};
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(ReverseOrder(NaturalOrder).compare(&1, &2), Ordering::Greater);
//!
//! // Any `Fn(&E, &E) -> Ordering` is a comparator.
//! let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
//! assert_eq!(by_length.compare(&"ab", &"abc"), Ordering::Less);
//! ```

use std::cmp::Ordering;

/// A total order over `E`, returning how `left` relates to `right`.
pub trait Comparator<E: ?Sized> {
    /// Compares two elements.
    fn compare(&self, left: &E, right: &E) -> Ordering;
}

impl<E: ?Sized, F> Comparator<E> for F
where
    F: Fn(&E, &E) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &E, right: &E) -> Ordering {
        self(left, right)
    }
}

/// The ordering given by the element type's [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<E: Ord + ?Sized> Comparator<E> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &E, right: &E) -> Ordering {
        left.cmp(right)
    }
}

/// Inverts the wrapped comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder<C>(pub C);

impl<E: ?Sized, C: Comparator<E>> Comparator<E> for ReverseOrder<C> {
    #[inline]
    fn compare(&self, left: &E, right: &E) -> Ordering {
        self.0.compare(right, left)
    }
}
