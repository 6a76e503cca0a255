/// Ordinal position of the next unconsumed element in a source.
///
/// Positions are immutable values: advancing produces a new position rather
/// than mutating in place, so sibling parse branches can hold independent
/// cursors into the same shared buffer without interfering with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Number of elements consumed before this position.
    pub index: usize,
}

impl Position {
    /// Creates a position at the start of the input.
    pub fn start() -> Self {
        Self { index: 0 }
    }

    /// Creates a position with the given element index.
    pub fn at(index: usize) -> Self {
        Self { index }
    }

    /// Returns the position one element further along.
    pub fn advance(self) -> Self {
        Self {
            index: self.index + 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}
