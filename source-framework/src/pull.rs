use std::sync::Arc;

use crate::element::Tagged;
use crate::position::Position;
use crate::source::{Read, Source, SourceError};

/// A fully-available, restartable source backed by a shared buffer.
///
/// Cloning is cheap (the buffer is reference-counted) and every clone reads
/// the same elements, so any number of evaluations can walk the same input
/// from any position. A pull source never reports [`Read::Pending`] and
/// never faults.
#[derive(Debug, Clone)]
pub struct PullSource<E> {
    buffer: Arc<[E]>,
}

impl<E> PullSource<E> {
    /// Collects the given elements into a shared buffer.
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        Self {
            buffer: elements.into_iter().collect(),
        }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl From<&str> for PullSource<char> {
    fn from(text: &str) -> Self {
        Self::new(text.chars())
    }
}

impl<E: Clone> Source<E> for PullSource<E> {
    fn read(&self, at: Position) -> Result<Read<E>, SourceError> {
        match self.buffer.get(at.index) {
            Some(element) => {
                let is_last = at.index + 1 == self.buffer.len();
                Ok(Read::Element(Tagged::new(element.clone(), is_last)))
            }
            None => Ok(Read::End),
        }
    }
}
