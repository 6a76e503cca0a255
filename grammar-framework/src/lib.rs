//! Grammar Framework
//!
//! Combinator grammars over sequential input, evaluated lazily into every
//! parse the grammar admits. Ambiguity is preserved: evaluation yields a
//! sequence of results ordered leftmost-first, with quantifiers producing
//! their shortest match first. The evaluator keeps its continuations in an
//! explicit frame stack on the heap, so deeply nested grammars and long
//! inputs never exhaust the host call stack.

pub mod concat;
pub mod evaluator;
pub mod grammar;
pub mod join;
pub mod result;

pub use concat::Concat;
pub use evaluator::{evaluate, Evaluation, Matches};
pub use grammar::{Grammar, GrammarError};
pub use join::Join;
pub use result::{EvalStep, ParseResult};

// Source types appear throughout the public API; re-export them so grammar
// users need only one dependency.
pub use source_framework::{Position, PullSource, PushSource, Read, Source, SourceError, Tagged};
