//! # weftree
//!
//! Persistent ordered containers built on a weight-balanced binary search tree
//! whose small subtrees collapse into compact sorted runs.
//!
//! ## Overview
//!
//! Every operation that looks like a mutation (`insert`, `remove`, `split`,
//! `union`, `intersection`, `difference`, `concatenate`) returns a new tree and
//! leaves its inputs untouched. Subtrees that an edit does not reach are shared
//! between the old and the new version.
//!
//! - **Tree core** ([`tree::Tree`]): rebalancing, run leaves, insert/remove,
//!   split/join/concatenate/trim and the join-based set algebra.
//! - **Comparators** ([`comparator`]): every comparing operation takes an explicit
//!   total order, so several orderings can coexist over one element type.
//! - **Collections** ([`collections`]): `OrderedSet` and `OrderedMap` façades that
//!   carry their comparator with them.
//! - **Diagnostics** (`diagnostics` feature): Graphviz export of a tree's shape.
//!
//! ## Feature Flags
//!
//! - `collections` (default): set and map façades
//! - `diagnostics`: dot export
//! - `arc`: share subtrees through `Arc` instead of `Rc`, making trees `Send + Sync`
//! - `full`: `collections` and `diagnostics`
//!
//! ## Example
//!
//! ```rust
//! use weftree::prelude::*;
//!
//! let order = NaturalOrder;
//! let odd = Tree::from_iter_with([1, 3, 5, 7], &order);
//! let small = Tree::from_iter_with([1, 2, 3], &order);
//!
//! assert_eq!(odd.union(&small, &order).to_vec(), vec![1, 2, 3, 5, 7]);
//! assert_eq!(odd.intersection(&small, &order).to_vec(), vec![1, 3]);
//! assert_eq!(odd.len(), 4); // inputs are never modified
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use weftree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparator::{Comparator, NaturalOrder, ReverseOrder};
    pub use crate::error::InvariantViolation;
    pub use crate::tree::{Split, Tree};

    #[cfg(feature = "collections")]
    pub use crate::collections::*;
}

pub mod comparator;
pub mod error;
pub mod tree;

#[cfg(feature = "collections")]
pub mod collections;

#[cfg(feature = "diagnostics")]
pub mod diagnostics;

pub use comparator::{Comparator, NaturalOrder, ReverseOrder};
pub use error::InvariantViolation;
pub use tree::{Split, Tree};
