//! listdiff - Added, changed and removed items between two sequences
//!
//! This library compares an original sequence against an incoming one and
//! classifies every item. It is meant as a building block for sync and
//! reconciliation code, e.g. diffing a cached collection against a freshly
//! fetched one.
//!
//! Two matching modes are available:
//! - positional ([`compare`], [`compare_with`]): items match by value and are
//!   changed when their index moved
//! - key/value ([`compare_by_key`]): items match by identity and are changed
//!   when their content differs

pub mod compare;
pub mod result;

pub use compare::{
    compare, compare_by_key, compare_using, compare_with, CompareError, Comparison, Predicate,
    Strategy,
};
pub use result::{ComparisonResult, Delta, DeltaKind};
