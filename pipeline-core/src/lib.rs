//! Pipeline Core
//!
//! Lockstep driver that connects an element producer to a grammar
//! evaluation over a push source. The evaluation is polled until it needs
//! an element the source has not seen; exactly one element is then fed and
//! the evaluation resumed. Nothing is buffered ahead of demand, so the
//! producer may be unbounded.

use tracing::{debug, warn};

use grammar_framework::{evaluate, EvalStep, Grammar, Join, ParseResult, Position};
use source_framework::{PushSource, SourceError};

/// Drives a grammar over an incrementally produced element sequence.
pub struct Pipeline<I, V>
where
    I: Iterator,
{
    grammar: Grammar<I::Item, V>,
    producer: std::iter::Peekable<I>,
}

impl<I, V> Pipeline<I, V>
where
    I: Iterator,
    I::Item: Clone,
    V: Join,
{
    /// Couples a grammar with its element producer.
    pub fn new<P>(grammar: Grammar<I::Item, V>, producer: P) -> Self
    where
        P: IntoIterator<IntoIter = I>,
    {
        Self {
            grammar,
            producer: producer.into_iter().peekable(),
        }
    }

    /// Runs the pipeline to completion, collecting every parse the grammar
    /// admits over the full element sequence.
    ///
    /// Elements are pulled from the producer one at a time, only when the
    /// evaluation demands one. When the producer ends the source is closed,
    /// which also reveals the last-element tag to the grammar.
    pub fn run(mut self) -> Result<Vec<ParseResult<V>>, SourceError> {
        let source = PushSource::new();
        let mut evaluation = evaluate(&self.grammar, &source, Position::start());
        let mut parses = Vec::new();
        loop {
            match evaluation.poll()? {
                EvalStep::Match(parse) => {
                    debug!(next = parse.next.index, "pipeline collected a parse");
                    parses.push(parse);
                }
                EvalStep::Pending => {
                    if source.is_closed() {
                        // A closed source can never satisfy a pending read.
                        warn!("evaluation still pending after close; stopping");
                        break;
                    }
                    match self.producer.next() {
                        Some(element) => {
                            source.push(element);
                            // Close as soon as the producer is known to be
                            // spent, so the element just pushed carries the
                            // last-element tag on its very first read.
                            if self.producer.peek().is_none() {
                                debug!(
                                    delivered = source.delivered_len(),
                                    "producer ended; closing source"
                                );
                                source.close();
                            }
                        }
                        None => {
                            debug!("producer was empty; closing source");
                            source.close();
                        }
                    }
                }
                EvalStep::Done => break,
            }
        }
        Ok(parses)
    }
}
