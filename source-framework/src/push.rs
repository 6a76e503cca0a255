use std::cell::RefCell;
use std::rc::Rc;

use crate::element::Tagged;
use crate::position::Position;
use crate::source::{Read, Source, SourceError};

/// Lifecycle of a push-driven sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FeedState {
    /// More elements may still arrive.
    Open,
    /// The producer declared the sequence complete.
    Closed,
    /// The producer reported a fault; reads past the delivered prefix fail.
    Faulted(SourceError),
}

#[derive(Debug)]
struct Shared<E> {
    delivered: Vec<E>,
    state: FeedState,
}

/// An incrementally-fed source with a replay buffer.
///
/// The producer side pushes elements one at a time and eventually either
/// closes or fails the source; the consumer side reads by position exactly
/// like a pull source. Elements already delivered stay readable forever, so
/// suspended parse branches can re-read the prefix after new elements
/// arrive. Reads past the delivered prefix report [`Read::Pending`] while
/// the source is open, [`Read::End`] once closed, and the fault once failed.
///
/// Clones share the same buffer and state; a clone is how the producer and
/// the evaluation hold the same source at once.
#[derive(Debug, Clone)]
pub struct PushSource<E> {
    shared: Rc<RefCell<Shared<E>>>,
}

impl<E> PushSource<E> {
    /// Creates an open source with no elements delivered yet.
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                delivered: Vec::new(),
                state: FeedState::Open,
            })),
        }
    }

    /// Appends one element to the delivered prefix.
    ///
    /// Pushing after close or fail is ignored: the sequence was already
    /// sealed and its last-element tagging must not change.
    pub fn push(&self, element: E) {
        let mut shared = self.shared.borrow_mut();
        if shared.state == FeedState::Open {
            shared.delivered.push(element);
        }
    }

    /// Declares the sequence complete. The most recently delivered element
    /// becomes the last element; closing an empty source yields an empty
    /// sequence.
    pub fn close(&self) {
        let mut shared = self.shared.borrow_mut();
        if shared.state == FeedState::Open {
            shared.state = FeedState::Closed;
        }
    }

    /// Puts the source into a faulted state with the given reason.
    pub fn fail(&self, reason: impl Into<String>) {
        let mut shared = self.shared.borrow_mut();
        if shared.state == FeedState::Open {
            shared.state = FeedState::Faulted(SourceError::Fault(reason.into()));
        }
    }

    /// Number of elements delivered so far.
    pub fn delivered_len(&self) -> usize {
        self.shared.borrow().delivered.len()
    }

    /// Whether the producer has closed the sequence.
    pub fn is_closed(&self) -> bool {
        self.shared.borrow().state == FeedState::Closed
    }
}

impl<E> Default for PushSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Source<E> for PushSource<E> {
    fn read(&self, at: Position) -> Result<Read<E>, SourceError> {
        let shared = self.shared.borrow();
        if let Some(element) = shared.delivered.get(at.index) {
            // The last-element marker is observable only once the sequence
            // is sealed; while open, a newer element may still arrive.
            let is_last = shared.state == FeedState::Closed
                && at.index + 1 == shared.delivered.len();
            return Ok(Read::Element(Tagged::new(element.clone(), is_last)));
        }
        match &shared.state {
            FeedState::Open => Ok(Read::Pending),
            FeedState::Closed => Ok(Read::End),
            FeedState::Faulted(fault) => Err(fault.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_read() {
        let source = PushSource::new();
        assert_eq!(source.read(Position::start()), Ok(Read::Pending));
        source.push('x');
        assert_eq!(
            source.read(Position::start()),
            Ok(Read::Element(Tagged::new('x', false)))
        );
    }

    #[test]
    fn test_close_seals_last_element() {
        let source = PushSource::new();
        source.push(1);
        source.push(2);
        source.close();
        assert_eq!(
            source.read(Position::at(1)),
            Ok(Read::Element(Tagged::new(2, true)))
        );
        assert_eq!(source.read(Position::at(2)), Ok(Read::End));
        // Sealed: further pushes must not arrive.
        source.push(3);
        assert_eq!(source.delivered_len(), 2);
    }
}
