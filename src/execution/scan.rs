use crate::execution::{NextTuple, TupleResult};
use crate::storage::error::Result;
use crate::storage::tuple::Tuple;

/// Adapts an iterator of tuples into a [`NextTuple`] source.
pub struct ScanOperation<'a> {
    inner: Box<dyn Iterator<Item = Result<Tuple>> + 'a>,
}

impl<'a> NextTuple for ScanOperation<'a> {
    fn next_tuple(&mut self) -> TupleResult {
        self.inner.next()
    }
}

impl<'a> ScanOperation<'a> {
    pub fn new<I>(tuples: I) -> Self
    where
        I: IntoIterator<Item = Tuple>,
        I::IntoIter: 'a,
    {
        ScanOperation {
            inner: Box::new(tuples.into_iter().map(Ok)),
        }
    }

    /// Scans a producer that can fail part way through.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<Tuple>>,
        I::IntoIter: 'a,
    {
        ScanOperation {
            inner: Box::new(results.into_iter()),
        }
    }
}
