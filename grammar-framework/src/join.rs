/// Combining of partial match values into larger ones.
///
/// Sequencing combinators fold the values of their parts with `join`, and
/// zero-width matches (empty grammars, satisfied lookaheads, absent
/// optionals) produce `empty`. `join` must be associative with `empty` as
/// its identity, otherwise the value of an ambiguous parse would depend on
/// the shape of the grammar tree rather than on the matched input.
pub trait Join: Clone {
    /// The value of a zero-width match.
    fn empty() -> Self;

    /// Appends `other` after `self`.
    fn join(self, other: Self) -> Self;
}

impl Join for () {
    fn empty() -> Self {}

    fn join(self, _other: Self) -> Self {}
}

impl Join for String {
    fn empty() -> Self {
        String::new()
    }

    fn join(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl<T: Clone> Join for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn join(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_join_identity() {
        let joined = String::empty().join("ab".to_string()).join(String::empty());
        assert_eq!(joined, "ab");
    }

    #[test]
    fn test_vec_join_is_associative() {
        let a = vec![1];
        let b = vec![2, 3];
        let c = vec![4];
        let left = a.clone().join(b.clone()).join(c.clone());
        let right = a.join(b.join(c));
        assert_eq!(left, right);
    }
}
