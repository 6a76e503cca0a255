use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::join::Join;

/// Factory for a replayable element sequence. Concatenations are cloned
/// freely during evaluation, so lazy segments are restartable producers
/// rather than one-shot iterators.
type SequenceFn<T> = Rc<dyn Fn() -> Box<dyn Iterator<Item = T>>>;

enum Segment<T> {
    /// A materialized run of elements, shared by reference.
    Run(Rc<[T]>),
    /// An arbitrary sequence, produced on demand.
    Sequence(SequenceFn<T>),
}

impl<T> Clone for Segment<T> {
    fn clone(&self) -> Self {
        match self {
            Segment::Run(run) => Segment::Run(Rc::clone(run)),
            Segment::Sequence(f) => Segment::Sequence(Rc::clone(f)),
        }
    }
}

/// A concatenation of element runs and arbitrary sequences.
///
/// Consecutive runs are accumulated into a single growing buffer instead of
/// one allocation per piece; the buffer is sealed into a shared run only
/// when an arbitrary sequence arrives or when two concatenations are
/// joined. Joining therefore keeps collapsing adjacent runs: a parse built
/// from thousands of single elements ends up holding one buffer, not
/// thousands.
pub struct Concat<T> {
    sealed: Vec<Segment<T>>,
    /// Trailing run still open for accumulation.
    open: Vec<T>,
}

impl<T: Clone> Concat<T> {
    /// An empty concatenation.
    pub fn new() -> Self {
        Self {
            sealed: Vec::new(),
            open: Vec::new(),
        }
    }

    /// A concatenation of one run.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut concat = Self::new();
        concat.extend_items(items);
        concat
    }

    /// Appends a single element to the open run.
    pub fn push_item(&mut self, item: T) {
        self.open.push(item);
    }

    /// Appends a run of elements, merging it into the open run.
    pub fn extend_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.open.extend(items);
    }

    /// Appends an arbitrary sequence. The open run is sealed first so that
    /// iteration order is preserved.
    pub fn push_sequence<F>(&mut self, sequence: F)
    where
        F: Fn() -> Box<dyn Iterator<Item = T>> + 'static,
    {
        self.seal_open();
        self.sealed.push(Segment::Sequence(Rc::new(sequence)));
    }

    /// Number of distinct runs held, counting the open one.
    pub fn run_count(&self) -> usize {
        let sealed_runs = self
            .sealed
            .iter()
            .filter(|segment| matches!(segment, Segment::Run(_)))
            .count();
        sealed_runs + usize::from(!self.open.is_empty())
    }

    /// Number of lazy sequence segments held.
    pub fn sequence_count(&self) -> usize {
        self.sealed
            .iter()
            .filter(|segment| matches!(segment, Segment::Sequence(_)))
            .count()
    }

    /// Iterates every element in concatenation order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.sealed
            .iter()
            .flat_map(|segment| -> Box<dyn Iterator<Item = T> + '_> {
                match segment {
                    Segment::Run(run) => Box::new(run.iter().cloned()),
                    Segment::Sequence(f) => Box::new(f()),
                }
            })
            .chain(self.open.iter().cloned())
    }

    /// Collects every element into a fresh vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    fn seal_open(&mut self) {
        if !self.open.is_empty() {
            let run = mem::take(&mut self.open);
            self.sealed.push(Segment::Run(run.into()));
        }
    }
}

impl<T: Clone> Default for Concat<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Concat<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            sealed: self.sealed.clone(),
            open: self.open.clone(),
        }
    }
}

impl<T: Clone + 'static> Join for Concat<T> {
    fn empty() -> Self {
        Self::new()
    }

    fn join(mut self, other: Self) -> Self {
        if other.sealed.is_empty() {
            // Both tails are plain runs; keep accumulating in place.
            self.open.extend(other.open);
        } else {
            self.seal_open();
            self.sealed.extend(other.sealed);
            self.open = other.open;
        }
        self
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Concat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + PartialEq> PartialEq for Concat<T> {
    fn eq(&self, other: &Self) -> bool {
        self.to_vec() == other.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_runs_share_one_buffer() {
        let mut concat = Concat::new();
        concat.extend_items([1, 2]);
        concat.extend_items([3, 4]);
        assert_eq!(concat.run_count(), 1);
        assert_eq!(concat.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sequence_seals_the_open_run() {
        let mut concat = Concat::new();
        concat.extend_items([1, 2]);
        concat.push_sequence(|| Box::new([3, 4].into_iter()));
        concat.extend_items([5]);
        assert_eq!(concat.run_count(), 2);
        assert_eq!(concat.sequence_count(), 1);
        assert_eq!(concat.to_vec(), vec![1, 2, 3, 4, 5]);
    }
}
