//! Ordered set and map façades over [`Tree`](crate::Tree).
//!
//! A bare [`Tree`](crate::Tree) takes its comparator on every call. The types
//! here store the comparator next to the tree, so the ordering a collection
//! was built with is the one every later operation uses.
//!
//! - [`OrderedSet`]: unique elements in comparator order
//! - [`OrderedMap`]: key-value entries in key order
//!
//! Both are persistent: every operation that changes contents returns a new
//! collection and leaves the receiver untouched.
//!
//! # Examples
//!
//! ```rust
//! use weftree::collections::{OrderedMap, OrderedSet};
//!
//! let primes: OrderedSet<i32> = [7, 2, 5, 3].into_iter().collect();
//! assert_eq!(primes.to_string(), "{2, 3, 5, 7}");
//!
//! let names = OrderedMap::new().insert(2, "two").insert(1, "one");
//! assert_eq!(names.to_string(), "{1: one, 2: two}");
//! ```

mod map;
mod set;

pub use map::OrderedMap;
pub use set::OrderedSet;

pub(crate) const SORTED_INVARIANT_MESSAGE: &str =
    "bulk-loaded elements must be strictly increasing under the collection's comparator";
