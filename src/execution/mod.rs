mod merge;
mod scan;

use crate::storage::error::Result;
use crate::storage::tuple::Tuple;
pub use merge::{merge, merge_with, MergeConfig, MergeOperation, MergeStats};
pub use scan::ScanOperation;

pub type TupleResult = Option<Result<Tuple>>;

/// Pull-based producer of tuples.
///
/// Returns `None` once exhausted. Sources feeding a merge must produce tuples
/// in strictly ascending order with no duplicates.
pub trait NextTuple {
    fn next_tuple(&mut self) -> TupleResult;
}
