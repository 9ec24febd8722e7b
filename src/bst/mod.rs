//! Ordered Map Module
//!
//! A generic, unbalanced binary search tree with comparison counting.
//!
//! ## Responsibilities
//! - Key-ordered insert / find / erase / range traversal
//! - Reject duplicate keys (update through `find_mut` instead)
//! - Count every key comparison so callers can verify algorithmic cost
//!
//! ## Shape
//! The tree is never rebalanced. Strictly increasing insertions produce a
//! list-shaped tree and lookups pay for the full path:
//!
//! ```text
//!   10
//!     \
//!      20            find(30) = 2 + 2 + 1 = 5 comparisons
//!        \           find(99) = 2 + 2 + 2 = 6 comparisons
//!         30
//! ```
//!
//! All traversals are iterative, so degenerate trees of any depth are safe
//! to query and to drop.

mod iter;
mod map;
mod node;

pub use iter::Iter;
pub use map::OrderedMap;
