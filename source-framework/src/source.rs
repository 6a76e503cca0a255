use crate::element::Tagged;
use crate::position::Position;
use thiserror::Error;

/// Outcome of reading one element from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read<E> {
    /// The element at the requested position, tagged when it is the last one.
    Element(Tagged<E>),
    /// The position is past the end of a terminated sequence.
    End,
    /// A push source has not yet received the element at this position.
    Pending,
}

/// Fault raised by the source itself, as opposed to a failed match.
///
/// Faults propagate unchanged through an evaluation; the evaluator releases
/// every open branch before the caller observes the fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The push source was failed by its producer.
    #[error("source fault: {0}")]
    Fault(String),
}

/// Capability to produce the element at an arbitrary position.
///
/// Reading never consumes: every parse branch re-reads the shared buffer at
/// its own position, so "iterate from position P" is well defined for any
/// source that implements this. The two provided implementations are
/// [`PullSource`](crate::PullSource) (restartable, never pending) and
/// [`PushSource`](crate::PushSource) (replay-buffered, pending until fed).
pub trait Source<E> {
    /// Reads the element at `at`, tagging the final element of the sequence.
    fn read(&self, at: Position) -> Result<Read<E>, SourceError>;
}
