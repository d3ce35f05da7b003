use crate::execution::{NextTuple, ScanOperation, TupleResult};
use crate::storage::error::{Result, TupleError};
use crate::storage::ordering::ComponentOrder;
use crate::storage::tuple::Tuple;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MergeConfig {
    pub component_order: ComponentOrder,
    /// Reject tuples whose arity differs from the first tuple pulled.
    pub check_arity: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            component_order: ComponentOrder::default(),
            check_arity: true,
        }
    }
}

impl MergeConfig {
    pub fn with_component_order(mut self, component_order: ComponentOrder) -> Self {
        self.component_order = component_order;
        self
    }

    pub fn with_arity_check(mut self, check_arity: bool) -> Self {
        self.check_arity = check_arity;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct MergeStats {
    pub sources: usize,
    pub emitted: usize,
    pub duplicates_skipped: usize,
}

/// Head of one source, waiting in the heap.
struct HeapEntry {
    tuple: Tuple,
    source: usize,
    // `Ord` has no access to the merge config.
    order: ComponentOrder,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest entry, so the comparison is reversed.
        other
            .tuple
            .cmp_with(&self.tuple, self.order)
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum MergeState {
    Unprimed,
    Running,
    Finished,
}

/// Lazy k-way merge of ascending, duplicate-free tuple sources.
///
/// Yields the union of its sources in ascending order, emitting tuples that
/// appear in several sources only once. Nothing is pulled until the first call
/// to [`NextTuple::next_tuple`]; after that every call extracts one heap entry
/// per tuple it inspects and refills from the source that produced it.
///
/// Source ordering and source-local uniqueness are not verified. A source
/// error or an arity mismatch is yielded once and ends the merge.
pub struct MergeOperation<'a> {
    sources: Vec<Option<Box<dyn NextTuple + 'a>>>,
    heap: BinaryHeap<HeapEntry>,
    last_emitted: Option<Tuple>,
    pending_error: Option<TupleError>,
    arity: Option<usize>,
    config: MergeConfig,
    stats: MergeStats,
    state: MergeState,
}

impl<'a> MergeOperation<'a> {
    pub fn new(sources: Vec<Box<dyn NextTuple + 'a>>) -> Self {
        Self::with_config(sources, MergeConfig::default())
    }

    pub fn with_config(sources: Vec<Box<dyn NextTuple + 'a>>, config: MergeConfig) -> Self {
        let stats = MergeStats {
            sources: sources.len(),
            ..MergeStats::default()
        };
        MergeOperation {
            heap: BinaryHeap::with_capacity(sources.len()),
            sources: sources.into_iter().map(Some).collect(),
            last_emitted: None,
            pending_error: None,
            arity: None,
            config,
            stats,
            state: MergeState::Unprimed,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    fn prime(&mut self) -> Result<()> {
        self.state = MergeState::Running;
        for index in 0..self.sources.len() {
            self.pull(index)?;
        }
        debug!(
            sources = self.stats.sources,
            active = self.heap.len(),
            arity = ?self.arity,
            "primed tuple merge"
        );
        Ok(())
    }

    /// Moves the next tuple of one source into the heap. Exhausted and failed
    /// sources are dropped.
    fn pull(&mut self, index: usize) -> Result<()> {
        let next = match self.sources.get_mut(index).and_then(Option::as_mut) {
            Some(source) => source.next_tuple(),
            None => return Ok(()),
        };
        match next {
            Some(Ok(tuple)) => {
                self.check_arity(&tuple)?;
                self.heap.push(HeapEntry {
                    tuple,
                    source: index,
                    order: self.config.component_order,
                });
                Ok(())
            }
            Some(Err(err)) => {
                self.sources[index] = None;
                Err(err)
            }
            None => {
                self.sources[index] = None;
                Ok(())
            }
        }
    }

    fn check_arity(&mut self, tuple: &Tuple) -> Result<()> {
        if !self.config.check_arity {
            return Ok(());
        }
        match self.arity {
            None => {
                self.arity = Some(tuple.count());
                Ok(())
            }
            Some(expected) if expected == tuple.count() => Ok(()),
            Some(expected) => Err(TupleError::ArityMismatch {
                expected,
                found: tuple.count(),
            }),
        }
    }

    fn finish(&mut self) {
        self.state = MergeState::Finished;
        self.heap.clear();
        self.sources.clear();
        self.last_emitted = None;
    }

    fn fail(&mut self, err: TupleError) -> TupleResult {
        warn!(error = %err, emitted = self.stats.emitted, "tuple merge aborted");
        self.finish();
        Some(Err(err))
    }
}

impl<'a> NextTuple for MergeOperation<'a> {
    fn next_tuple(&mut self) -> TupleResult {
        if let Some(err) = self.pending_error.take() {
            return self.fail(err);
        }
        match self.state {
            MergeState::Finished => return None,
            MergeState::Unprimed => {
                if let Err(err) = self.prime() {
                    return self.fail(err);
                }
            }
            MergeState::Running => (),
        }

        while let Some(HeapEntry { tuple, source, .. }) = self.heap.pop() {
            let refill = self.pull(source);

            if self.last_emitted.as_ref() == Some(&tuple) {
                self.stats.duplicates_skipped += 1;
                trace!(source, "skipped duplicate tuple");
                match refill {
                    Ok(()) => continue,
                    Err(err) => return self.fail(err),
                }
            }

            // The tuple is still owed to the consumer; report the error on the next pull.
            if let Err(err) = refill {
                self.pending_error = Some(err);
            }
            self.stats.emitted += 1;
            self.last_emitted = Some(tuple.clone());
            return Some(Ok(tuple));
        }

        debug!(
            sources = self.stats.sources,
            emitted = self.stats.emitted,
            duplicates_skipped = self.stats.duplicates_skipped,
            "drained tuple merge"
        );
        self.finish();
        None
    }
}

impl<'a> Iterator for MergeOperation<'a> {
    type Item = Result<Tuple>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tuple()
    }
}

impl<'a> FusedIterator for MergeOperation<'a> {}

/// Merges a collection of ascending, duplicate-free tuple sequences.
pub fn merge<'a, S, I>(sources: S) -> MergeOperation<'a>
where
    S: IntoIterator<Item = I>,
    I: IntoIterator<Item = Tuple>,
    I::IntoIter: 'a,
{
    merge_with(sources, MergeConfig::default())
}

pub fn merge_with<'a, S, I>(sources: S, config: MergeConfig) -> MergeOperation<'a>
where
    S: IntoIterator<Item = I>,
    I: IntoIterator<Item = Tuple>,
    I::IntoIter: 'a,
{
    let sources = sources
        .into_iter()
        .map(|source| Box::new(ScanOperation::new(source)) as Box<dyn NextTuple + 'a>)
        .collect();
    MergeOperation::with_config(sources, config)
}
