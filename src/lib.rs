//! Ordered byte-encoded composite keys and a lazy k-way merge over sorted
//! streams of them.
//!
//! ```
//! use tuplemerge::{merge, Tuple};
//!
//! let key = |v: u8| Tuple::new(vec![vec![v]]);
//! let merged = merge(vec![vec![key(1), key(3)], vec![key(2), key(3)]])
//!     .collect::<tuplemerge::Result<Vec<_>>>()
//!     .unwrap();
//! assert_eq!(merged, vec![key(1), key(2), key(3)]);
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

pub mod execution;
pub mod storage;

pub use execution::{
    merge, merge_with, MergeConfig, MergeOperation, MergeStats, NextTuple, ScanOperation,
    TupleResult,
};
pub use storage::error::{Result, TupleError};
pub use storage::ordering::{compare_component, ComponentOrder};
pub use storage::tuple::Tuple;
