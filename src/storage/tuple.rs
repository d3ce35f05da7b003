use crate::storage::error::{Result, TupleError};
use crate::storage::ordering::{compare_component, ComponentOrder};
use std::cmp::Ordering;
use std::iter::FromIterator;

/// A composite key made of opaque byte-encoded components.
///
/// The tuple owns its component buffers and never changes after construction.
/// Equality is component-wise byte equality. `Ord` is the lexicographic order
/// over components with bytes compared unsigned; see [`Tuple::compare`] for the
/// arity-checked comparison with a configurable byte interpretation.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Tuple {
    components: Vec<Vec<u8>>,
}

impl Tuple {
    pub fn new(components: Vec<Vec<u8>>) -> Self {
        Tuple { components }
    }

    pub fn empty() -> Self {
        Tuple {
            components: Vec::new(),
        }
    }

    /// Number of components that make up this tuple.
    pub fn count(&self) -> usize {
        self.components.len()
    }

    pub fn get(&self, index: usize) -> Result<&[u8]> {
        self.components
            .get(index)
            .map(|component| component.as_slice())
            .ok_or(TupleError::IndexOutOfRange {
                index,
                count: self.count(),
            })
    }

    pub fn components(&self) -> impl Iterator<Item = &[u8]> {
        self.components.iter().map(|component| component.as_slice())
    }

    pub fn into_components(self) -> Vec<Vec<u8>> {
        self.components
    }

    /// Compares two tuples of equal arity component by component, returning the
    /// first non-equal result.
    pub fn compare(left: &Tuple, right: &Tuple, order: ComponentOrder) -> Result<Ordering> {
        if left.count() != right.count() {
            return Err(TupleError::ArityMismatch {
                expected: left.count(),
                found: right.count(),
            });
        }
        Ok(left.cmp_with(right, order))
    }

    /// Unchecked variant of [`Tuple::compare`]. Tuples of different arity that
    /// agree on their common prefix order the shorter one first.
    pub fn cmp_with(&self, other: &Tuple, order: ComponentOrder) -> Ordering {
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(left, right)| compare_component(left, right, order))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or_else(|| self.count().cmp(&other.count()))
    }
}

impl From<Vec<Vec<u8>>> for Tuple {
    fn from(components: Vec<Vec<u8>>) -> Self {
        Tuple::new(components)
    }
}

impl FromIterator<Vec<u8>> for Tuple {
    fn from_iter<T: IntoIterator<Item = Vec<u8>>>(iter: T) -> Self {
        Tuple::new(iter.into_iter().collect())
    }
}
