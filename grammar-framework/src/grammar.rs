use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::evaluator::{evaluate, Matches};
use crate::join::Join;
use source_framework::{Position, Source, Tagged};

/// Error raised while building a grammar.
///
/// Construction is the only place a grammar can be rejected; once built,
/// evaluation either produces parses or produces none, but never fails on
/// account of the grammar itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("repeat bounds are inverted: min {min} > max {max}")]
    InvalidRepeatBounds { min: usize, max: usize },
}

type ElementFn<E, V> = Box<dyn Fn(&Tagged<E>) -> Option<V>>;
type MapFn<V> = Box<dyn Fn(V) -> V>;

pub(crate) enum Node<E, V> {
    /// Matches nothing and consumes nothing; the zero-width success.
    Empty,
    /// Matches a single element accepted by the predicate.
    Element(ElementFn<E, V>),
    /// Matches each part in order, joining their values.
    Sequence(Vec<Grammar<E, V>>),
    /// Tries each branch in order, yielding every parse of every branch.
    Choice(Vec<Grammar<E, V>>),
    /// Matches the inner grammar between `min` and `max` times,
    /// shortest first. `prune_at_end` suppresses further repetitions once
    /// the end of the input has been reached.
    Repeat {
        inner: Grammar<E, V>,
        min: usize,
        max: Option<usize>,
        prune_at_end: bool,
    },
    /// Checks the inner grammar without consuming input.
    Lookahead { inner: Grammar<E, V>, negative: bool },
    /// Transforms the inner grammar's value.
    Map { inner: Grammar<E, V>, f: MapFn<V> },
}

/// A composable description of what to match, detached from any input.
///
/// Grammars are immutable trees behind reference-counted handles: cloning
/// is cheap and combinators share their sub-grammars freely. `E` is the
/// element type of the input, `V` the value type of a parse; `V` carries a
/// [`Join`] implementation so sequencing knows how to merge partial values.
///
/// ```
/// use grammar_framework::{Grammar, PullSource, Position};
///
/// let digit: Grammar<char, String> = Grammar::satisfy(|c: &char| c.is_ascii_digit());
/// let digits = digit.repeat(1, None).unwrap();
/// let source = PullSource::from("12");
/// let values: Vec<String> = digits
///     .matches(&source, Position::start())
///     .map(|parse| parse.value)
///     .collect();
/// assert_eq!(values, ["1", "12"]);
/// ```
pub struct Grammar<E, V> {
    node: Rc<Node<E, V>>,
}

impl<E, V> Clone for Grammar<E, V> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<E, V> Grammar<E, V> {
    fn from_node(node: Node<E, V>) -> Self {
        Self {
            node: Rc::new(node),
        }
    }

    pub(crate) fn node(&self) -> &Node<E, V> {
        &self.node
    }

    /// The grammar that matches the empty sequence at any position.
    pub fn empty() -> Self {
        Self::from_node(Node::Empty)
    }

    /// Matches one element for which `f` produces a value.
    pub fn element<F>(f: F) -> Self
    where
        F: Fn(&E) -> Option<V> + 'static,
        E: 'static,
        V: 'static,
    {
        Self::element_tagged(move |tagged: &Tagged<E>| f(&tagged.value))
    }

    /// Matches one element for which `f` produces a value, with the
    /// last-element tag visible to the predicate. This is how a grammar
    /// anchors itself to the end of the input without consuming past it.
    pub fn element_tagged<F>(f: F) -> Self
    where
        F: Fn(&Tagged<E>) -> Option<V> + 'static,
        E: 'static,
        V: 'static,
    {
        Self::from_node(Node::Element(Box::new(f)))
    }

    /// Matches `self` followed by `other`.
    pub fn and(self, other: Self) -> Self {
        Self::from_node(Node::Sequence(vec![self, other]))
    }

    /// Matches every part in order. Prefer this over folded [`and`](Self::and)
    /// calls when the chain is long; it keeps the grammar tree flat.
    pub fn sequence(parts: Vec<Self>) -> Self {
        let mut parts = parts;
        match parts.len() {
            0 => Self::empty(),
            1 => parts.remove(0),
            _ => Self::from_node(Node::Sequence(parts)),
        }
    }

    /// Matches either `self` or `other`, yielding the parses of `self`
    /// first. Both may succeed on the same input; all parses are kept.
    pub fn or(self, other: Self) -> Self {
        Self::from_node(Node::Choice(vec![self, other]))
    }

    /// Matches any of the branches, earlier branches first. An empty branch
    /// list never matches anything.
    pub fn choice(branches: Vec<Self>) -> Self {
        let mut branches = branches;
        match branches.len() {
            1 => branches.remove(0),
            _ => Self::from_node(Node::Choice(branches)),
        }
    }

    /// Matches `self` where possible and the empty sequence otherwise; when
    /// both are possible, the present parses come first and the single
    /// zero-width absent parse last.
    pub fn optional(self) -> Self {
        self.or(Self::empty())
    }

    /// Matches `self` between `min` and `max` times (`None` for unbounded),
    /// shortest match first. Fails at build time if the bounds are inverted.
    pub fn repeat(self, min: usize, max: Option<usize>) -> Result<Self, GrammarError> {
        if let Some(max) = max {
            if max < min {
                return Err(GrammarError::InvalidRepeatBounds { min, max });
            }
        }
        Ok(Self::from_node(Node::Repeat {
            inner: self,
            min,
            max,
            prune_at_end: false,
        }))
    }

    /// Matches `self` any number of times, like `repeat(0, None)`, but stops
    /// proposing further repetitions once the end of the input is reached.
    /// The two differ only when `self` admits zero-width parses at the end:
    /// `repeat` yields those extra repetitions, `many` prunes them.
    pub fn many(self) -> Self {
        Self::from_node(Node::Repeat {
            inner: self,
            min: 0,
            max: None,
            prune_at_end: true,
        })
    }

    /// Succeeds exactly once, without consuming input, if `self` matches
    /// here. The yielded value is that of the first parse of `self`.
    pub fn lookahead(self) -> Self {
        Self::from_node(Node::Lookahead {
            inner: self,
            negative: false,
        })
    }

    /// Succeeds exactly once, without consuming input and with an empty
    /// value, if `self` does not match here.
    pub fn not(self) -> Self {
        Self::from_node(Node::Lookahead {
            inner: self,
            negative: true,
        })
    }

    /// Transforms the value of every parse of `self`.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(V) -> V + 'static,
        V: 'static,
    {
        Self::from_node(Node::Map {
            inner: self,
            f: Box::new(f),
        })
    }
}

impl<E, V> Grammar<E, V>
where
    E: Clone + 'static,
    V: From<E> + 'static,
{
    /// Matches one element satisfying the predicate, converting the element
    /// into the value type.
    pub fn satisfy<F>(pred: F) -> Self
    where
        F: Fn(&E) -> bool + 'static,
    {
        Self::element(move |e| pred(e).then(|| V::from(e.clone())))
    }
}

impl<E, V> Grammar<E, V>
where
    E: Clone + PartialEq + 'static,
    V: From<E> + 'static,
{
    /// Matches the given elements in order, exactly.
    pub fn literal<I>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let parts = items
            .into_iter()
            .map(|expected| {
                Self::element(move |e: &E| (*e == expected).then(|| V::from(expected.clone())))
            })
            .collect();
        Self::sequence(parts)
    }
}

impl<E, V> Grammar<E, V>
where
    E: Clone,
    V: Join,
{
    /// Evaluates this grammar against `source` starting at `at`, yielding
    /// every parse lazily. Suited to pull sources; on a push source the
    /// iterator stops at the first pending read (see
    /// [`evaluate`](crate::evaluate) for resumable polling).
    pub fn matches<'s, S>(&self, source: &'s S, at: Position) -> Matches<'s, E, V, S>
    where
        S: Source<E>,
    {
        Matches::new(evaluate(self, source, at))
    }
}

impl<E, V> fmt::Debug for Grammar<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Empty => f.write_str("Empty"),
            Node::Element(_) => f.write_str("Element"),
            Node::Sequence(parts) => f.debug_tuple("Sequence").field(&parts.len()).finish(),
            Node::Choice(branches) => f.debug_tuple("Choice").field(&branches.len()).finish(),
            Node::Repeat { min, max, .. } => {
                f.debug_struct("Repeat").field("min", min).field("max", max).finish()
            }
            Node::Lookahead { negative, .. } => {
                f.debug_struct("Lookahead").field("negative", negative).finish()
            }
            Node::Map { .. } => f.write_str("Map"),
        }
    }
}
