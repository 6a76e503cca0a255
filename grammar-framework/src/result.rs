use source_framework::Position;

/// One complete parse of a grammar against a source.
///
/// A grammar that admits several parses produces several of these, one per
/// parse, each carrying the position where the remainder of the input
/// begins. A grammar that matches nothing produces none at all; there is no
/// error value for "did not match".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<V> {
    /// The combined value of the matched region.
    pub value: V,
    /// First position not consumed by this parse.
    pub next: Position,
}

impl<V> ParseResult<V> {
    pub fn new(value: V, next: Position) -> Self {
        Self { value, next }
    }
}

/// Outcome of driving an evaluation one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalStep<V> {
    /// The evaluation produced its next parse.
    Match(ParseResult<V>),
    /// The evaluation needs an element a push source has not received yet.
    /// Polling again after feeding the source resumes exactly where the
    /// evaluation left off.
    Pending,
    /// Every parse has been produced; polling again keeps returning this.
    Done,
}
