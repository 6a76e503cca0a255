/// An element paired with a marker telling whether it is the final element
/// of its sequence.
///
/// For a pull source exactly the last buffered element carries the marker.
/// For a push source the marker appears only once the source has been
/// closed; a source that is never closed never emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tagged<E> {
    /// The element itself.
    pub value: E,
    /// Whether this is the final element of the sequence.
    pub is_last: bool,
}

impl<E> Tagged<E> {
    /// Creates a tagged element.
    pub fn new(value: E, is_last: bool) -> Self {
        Self { value, is_last }
    }

    /// Consumes the tag and returns the bare element.
    pub fn into_value(self) -> E {
        self.value
    }
}
