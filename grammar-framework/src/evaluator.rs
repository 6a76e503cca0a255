//! Iterative grammar evaluation over an explicit frame stack.
//!
//! Every open sub-grammar is a frame in a heap-allocated `Vec`; the host
//! call stack stays at constant depth no matter how deeply the grammar
//! nests or how long the input runs. Each step of the machine hands one
//! small operation to the next frame: explore a sub-grammar, resume a frame
//! for its next parse, deliver a parse upward, or report exhaustion upward.
//! Backtracking is therefore just popping frames, and suspending on a
//! pending read is just parking the current operation.

use tracing::warn;

use crate::grammar::{Grammar, Node};
use crate::join::Join;
use crate::result::{EvalStep, ParseResult};
use source_framework::{Position, Read, Source, SourceError};

/// Where a frame reports its parses: the machine's caller or another frame.
#[derive(Debug, Clone, Copy)]
enum Target {
    Caller,
    Frame(usize),
}

/// One machine operation, handed from step to step.
enum Op<E, V> {
    /// Open a frame for `grammar` at `at`, reporting to `parent`.
    Explore {
        grammar: Grammar<E, V>,
        at: Position,
        parent: Target,
    },
    /// Ask a frame for its next parse (or its exhaustion).
    Resume { frame: usize },
    /// A frame produced a parse; route it to its consumer.
    Deliver { to: Target, value: V, next: Position },
    /// A frame ran out of parses and has been popped; tell its consumer.
    Exhaust { to: Target },
}

/// Frame and grammar shapes share one discriminant so dispatch never holds
/// a borrow across a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Leaf,
    Sequence,
    Choice,
    Repeat,
    Lookahead,
    Map,
}

impl<E, V> Node<E, V> {
    fn shape(&self) -> Shape {
        match self {
            Node::Empty | Node::Element(_) => Shape::Leaf,
            Node::Sequence(_) => Shape::Sequence,
            Node::Choice(_) => Shape::Choice,
            Node::Repeat { .. } => Shape::Repeat,
            Node::Lookahead { .. } => Shape::Lookahead,
            Node::Map { .. } => Shape::Map,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepeatState {
    /// Nothing produced yet.
    Start,
    /// The zero-width minimum was delivered; no repetition opened yet.
    DeliveredEmpty,
    /// A repetition frame is being driven.
    Running,
    /// A parse ending at `next` was delivered; on resume either open the
    /// next repetition or backtrack into the previous one.
    Delivered { next: Position, can_descend: bool },
}

enum FrameKind<E, V> {
    /// `Empty` or `Element`: delivers at most one parse.
    Leaf {
        grammar: Grammar<E, V>,
        at: Position,
        delivered: bool,
    },
    Sequence {
        grammar: Grammar<E, V>,
        at: Position,
        started: bool,
        /// Values delivered by the parts currently open.
        acc: Vec<V>,
        /// Frame indices of the open parts, leftmost first.
        children: Vec<usize>,
    },
    Choice {
        grammar: Grammar<E, V>,
        at: Position,
        branch: usize,
        child: Option<usize>,
    },
    Repeat {
        grammar: Grammar<E, V>,
        at: Position,
        state: RepeatState,
        acc: Vec<V>,
        children: Vec<usize>,
        /// Start position of each open repetition; a repetition ending at
        /// its own start is zero-width and must not spawn a successor.
        starts: Vec<Position>,
    },
    Lookahead {
        grammar: Grammar<E, V>,
        at: Position,
        negative: bool,
        fired: bool,
        child: Option<usize>,
    },
    Map {
        grammar: Grammar<E, V>,
        at: Position,
        child: Option<usize>,
    },
}

impl<E, V> FrameKind<E, V> {
    fn shape(&self) -> Shape {
        match self {
            FrameKind::Leaf { .. } => Shape::Leaf,
            FrameKind::Sequence { .. } => Shape::Sequence,
            FrameKind::Choice { .. } => Shape::Choice,
            FrameKind::Repeat { .. } => Shape::Repeat,
            FrameKind::Lookahead { .. } => Shape::Lookahead,
            FrameKind::Map { .. } => Shape::Map,
        }
    }
}

struct Frame<E, V> {
    parent: Target,
    kind: FrameKind<E, V>,
}

/// What a single machine step decided.
enum Flow<E, V> {
    Continue(Op<E, V>),
    Yield { value: V, next: Position },
    Suspend(Op<E, V>),
    Finished,
}

enum RepeatDecision<E, V> {
    Descend(Grammar<E, V>),
    Deliver {
        joined: V,
        blocked: bool,
        probe_end: bool,
    },
}

/// A suspended-and-resumable evaluation of one grammar against one source.
///
/// Drive it with [`poll`](Self::poll); between polls the frame stack holds
/// everything needed to continue, so a push source can be fed and the
/// evaluation resumed at the exact read that suspended it. Dropping the
/// evaluation releases every open frame.
pub struct Evaluation<'s, E, V, S> {
    source: &'s S,
    frames: Vec<Frame<E, V>>,
    op: Option<Op<E, V>>,
    root: usize,
    finished: bool,
    peak: usize,
}

/// Begins evaluating `grammar` against `source` at `at`.
///
/// Nothing is read until the first [`poll`](Evaluation::poll).
pub fn evaluate<'s, E, V, S>(
    grammar: &Grammar<E, V>,
    source: &'s S,
    at: Position,
) -> Evaluation<'s, E, V, S>
where
    E: Clone,
    V: Join,
    S: Source<E>,
{
    Evaluation {
        source,
        frames: Vec::new(),
        op: Some(Op::Explore {
            grammar: grammar.clone(),
            at,
            parent: Target::Caller,
        }),
        root: 0,
        finished: false,
        peak: 0,
    }
}

impl<'s, E, V, S> Evaluation<'s, E, V, S>
where
    E: Clone,
    V: Join,
    S: Source<E>,
{
    /// Runs the machine until it produces the next parse, suspends on a
    /// pending read, or exhausts every alternative.
    ///
    /// A source fault clears the frame stack before propagating; polling
    /// again afterwards reports [`EvalStep::Done`].
    pub fn poll(&mut self) -> Result<EvalStep<V>, SourceError> {
        if self.finished {
            return Ok(EvalStep::Done);
        }
        let Some(mut op) = self.op.take() else {
            self.finished = true;
            return Ok(EvalStep::Done);
        };
        loop {
            match self.step(op) {
                Ok(Flow::Continue(next)) => op = next,
                Ok(Flow::Yield { value, next }) => {
                    // The root frame is asked for its next parse on the
                    // following poll.
                    self.op = Some(Op::Resume { frame: self.root });
                    return Ok(EvalStep::Match(ParseResult::new(value, next)));
                }
                Ok(Flow::Suspend(parked)) => {
                    self.op = Some(parked);
                    return Ok(EvalStep::Pending);
                }
                Ok(Flow::Finished) => {
                    self.finished = true;
                    return Ok(EvalStep::Done);
                }
                Err(fault) => {
                    self.frames.clear();
                    self.finished = true;
                    return Err(fault);
                }
            }
        }
    }

    /// Number of frames currently open.
    pub fn open_frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Largest number of frames that were ever open at once.
    pub fn peak_frame_count(&self) -> usize {
        self.peak
    }

    /// Whether every parse has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn step(&mut self, op: Op<E, V>) -> Result<Flow<E, V>, SourceError> {
        match op {
            Op::Explore { grammar, at, parent } => Ok(self.explore(grammar, at, parent)),
            Op::Resume { frame } => self.resume(frame),
            Op::Deliver { to, value, next } => Ok(self.deliver(to, value, next)),
            Op::Exhaust { to } => Ok(self.exhaust(to)),
        }
    }

    fn explore(&mut self, grammar: Grammar<E, V>, at: Position, parent: Target) -> Flow<E, V> {
        let kind = match grammar.node().shape() {
            Shape::Leaf => FrameKind::Leaf {
                grammar,
                at,
                delivered: false,
            },
            Shape::Sequence => FrameKind::Sequence {
                grammar,
                at,
                started: false,
                acc: Vec::new(),
                children: Vec::new(),
            },
            Shape::Choice => FrameKind::Choice {
                grammar,
                at,
                branch: 0,
                child: None,
            },
            Shape::Repeat => FrameKind::Repeat {
                grammar,
                at,
                state: RepeatState::Start,
                acc: Vec::new(),
                children: Vec::new(),
                starts: Vec::new(),
            },
            Shape::Lookahead => {
                let negative = matches!(grammar.node(), Node::Lookahead { negative: true, .. });
                FrameKind::Lookahead {
                    grammar,
                    at,
                    negative,
                    fired: false,
                    child: None,
                }
            }
            Shape::Map => FrameKind::Map {
                grammar,
                at,
                child: None,
            },
        };
        let idx = self.frames.len();
        self.frames.push(Frame { parent, kind });
        self.peak = self.peak.max(self.frames.len());
        match parent {
            Target::Caller => self.root = idx,
            Target::Frame(p) => self.note_child(p, idx),
        }
        Flow::Continue(Op::Resume { frame: idx })
    }

    fn note_child(&mut self, parent: usize, child: usize) {
        match &mut self.frames[parent].kind {
            FrameKind::Sequence { children, .. } | FrameKind::Repeat { children, .. } => {
                children.push(child)
            }
            FrameKind::Choice { child: slot, .. }
            | FrameKind::Lookahead { child: slot, .. }
            | FrameKind::Map { child: slot, .. } => *slot = Some(child),
            FrameKind::Leaf { .. } => unreachable!("leaf frames spawn no children"),
        }
    }

    fn resume(&mut self, idx: usize) -> Result<Flow<E, V>, SourceError> {
        let parent = self.frames[idx].parent;
        match self.frames[idx].kind.shape() {
            Shape::Leaf => self.resume_leaf(idx, parent),
            Shape::Sequence => Ok(self.resume_sequence(idx)),
            Shape::Choice => Ok(self.resume_choice(idx, parent)),
            Shape::Repeat => Ok(self.resume_repeat(idx, parent)),
            Shape::Lookahead => Ok(self.resume_lookahead(idx, parent)),
            Shape::Map => Ok(self.resume_map(idx, parent)),
        }
    }

    fn resume_leaf(&mut self, idx: usize, parent: Target) -> Result<Flow<E, V>, SourceError> {
        let (grammar, at, delivered) = {
            let FrameKind::Leaf {
                grammar,
                at,
                delivered,
            } = &self.frames[idx].kind
            else {
                unreachable!()
            };
            (grammar.clone(), *at, *delivered)
        };
        if delivered {
            self.frames.pop();
            return Ok(Flow::Continue(Op::Exhaust { to: parent }));
        }
        match grammar.node() {
            Node::Empty => {
                self.mark_leaf_delivered(idx);
                Ok(Flow::Continue(Op::Deliver {
                    to: parent,
                    value: V::empty(),
                    next: at,
                }))
            }
            Node::Element(accept) => match self.source.read(at)? {
                Read::Element(tagged) => match accept(&tagged) {
                    Some(value) => {
                        self.mark_leaf_delivered(idx);
                        Ok(Flow::Continue(Op::Deliver {
                            to: parent,
                            value,
                            next: at.advance(),
                        }))
                    }
                    None => {
                        self.frames.pop();
                        Ok(Flow::Continue(Op::Exhaust { to: parent }))
                    }
                },
                Read::End => {
                    self.frames.pop();
                    Ok(Flow::Continue(Op::Exhaust { to: parent }))
                }
                Read::Pending => Ok(Flow::Suspend(Op::Resume { frame: idx })),
            },
            _ => unreachable!("leaf frame holds a composite grammar"),
        }
    }

    fn mark_leaf_delivered(&mut self, idx: usize) {
        if let FrameKind::Leaf { delivered, .. } = &mut self.frames[idx].kind {
            *delivered = true;
        }
    }

    fn resume_sequence(&mut self, idx: usize) -> Flow<E, V> {
        let FrameKind::Sequence {
            grammar,
            at,
            started,
            acc,
            children,
        } = &mut self.frames[idx].kind
        else {
            unreachable!()
        };
        if !*started {
            *started = true;
            let first = match grammar.node() {
                Node::Sequence(parts) => parts[0].clone(),
                _ => unreachable!(),
            };
            return Flow::Continue(Op::Explore {
                grammar: first,
                at: *at,
                parent: Target::Frame(idx),
            });
        }
        // Resumed after delivering: retract the last part's value and ask
        // that part for its next parse.
        acc.pop();
        let Some(&last) = children.last() else {
            unreachable!("sequence resumed with no open part")
        };
        Flow::Continue(Op::Resume { frame: last })
    }

    fn resume_choice(&mut self, idx: usize, parent: Target) -> Flow<E, V> {
        let op = {
            let FrameKind::Choice {
                grammar,
                at,
                branch,
                child,
            } = &mut self.frames[idx].kind
            else {
                unreachable!()
            };
            if let Some(c) = *child {
                Some(Op::Resume { frame: c })
            } else {
                let branches = match grammar.node() {
                    Node::Choice(branches) => branches,
                    _ => unreachable!(),
                };
                branches.get(*branch).map(|b| Op::Explore {
                    grammar: b.clone(),
                    at: *at,
                    parent: Target::Frame(idx),
                })
            }
        };
        match op {
            Some(op) => Flow::Continue(op),
            None => {
                self.frames.pop();
                Flow::Continue(Op::Exhaust { to: parent })
            }
        }
    }

    fn resume_repeat(&mut self, idx: usize, parent: Target) -> Flow<E, V> {
        let op = {
            let FrameKind::Repeat {
                grammar,
                at,
                state,
                acc,
                children,
                starts,
            } = &mut self.frames[idx].kind
            else {
                unreachable!()
            };
            let (inner, min, max) = match grammar.node() {
                Node::Repeat {
                    inner, min, max, ..
                } => (inner.clone(), *min, *max),
                _ => unreachable!(),
            };
            match *state {
                RepeatState::Start => {
                    if min == 0 {
                        // Shortest first: the zero-repetition parse leads.
                        *state = RepeatState::DeliveredEmpty;
                        Some(Op::Deliver {
                            to: parent,
                            value: V::empty(),
                            next: *at,
                        })
                    } else {
                        *state = RepeatState::Running;
                        starts.push(*at);
                        Some(Op::Explore {
                            grammar: inner,
                            at: *at,
                            parent: Target::Frame(idx),
                        })
                    }
                }
                RepeatState::DeliveredEmpty => {
                    if max == Some(0) {
                        None
                    } else {
                        *state = RepeatState::Running;
                        starts.push(*at);
                        Some(Op::Explore {
                            grammar: inner,
                            at: *at,
                            parent: Target::Frame(idx),
                        })
                    }
                }
                RepeatState::Delivered { next, can_descend } => {
                    *state = RepeatState::Running;
                    if can_descend {
                        starts.push(next);
                        Some(Op::Explore {
                            grammar: inner,
                            at: next,
                            parent: Target::Frame(idx),
                        })
                    } else {
                        acc.pop();
                        let Some(&last) = children.last() else {
                            unreachable!("repetition resumed with no open repetition")
                        };
                        Some(Op::Resume { frame: last })
                    }
                }
                RepeatState::Running => {
                    unreachable!("repetition resumed while a repetition is active")
                }
            }
        };
        match op {
            Some(op) => Flow::Continue(op),
            None => {
                self.frames.pop();
                Flow::Continue(Op::Exhaust { to: parent })
            }
        }
    }

    fn resume_lookahead(&mut self, idx: usize, parent: Target) -> Flow<E, V> {
        let op = {
            let FrameKind::Lookahead {
                grammar,
                at,
                fired,
                child,
                ..
            } = &mut self.frames[idx].kind
            else {
                unreachable!()
            };
            if *fired {
                // Lookaheads yield exactly one parse.
                None
            } else if let Some(c) = *child {
                Some(Op::Resume { frame: c })
            } else {
                let inner = match grammar.node() {
                    Node::Lookahead { inner, .. } => inner.clone(),
                    _ => unreachable!(),
                };
                Some(Op::Explore {
                    grammar: inner,
                    at: *at,
                    parent: Target::Frame(idx),
                })
            }
        };
        match op {
            Some(op) => Flow::Continue(op),
            None => {
                self.frames.pop();
                Flow::Continue(Op::Exhaust { to: parent })
            }
        }
    }

    fn resume_map(&mut self, idx: usize, parent: Target) -> Flow<E, V> {
        let op = {
            let FrameKind::Map {
                grammar, at, child, ..
            } = &self.frames[idx].kind
            else {
                unreachable!()
            };
            if let Some(c) = *child {
                Some(Op::Resume { frame: c })
            } else {
                let inner = match grammar.node() {
                    Node::Map { inner, .. } => inner.clone(),
                    _ => unreachable!(),
                };
                Some(Op::Explore {
                    grammar: inner,
                    at: *at,
                    parent: Target::Frame(idx),
                })
            }
        };
        match op {
            Some(op) => Flow::Continue(op),
            None => {
                self.frames.pop();
                Flow::Continue(Op::Exhaust { to: parent })
            }
        }
    }

    fn deliver(&mut self, to: Target, value: V, next: Position) -> Flow<E, V> {
        let idx = match to {
            Target::Caller => return Flow::Yield { value, next },
            Target::Frame(idx) => idx,
        };
        let parent = self.frames[idx].parent;
        match self.frames[idx].kind.shape() {
            Shape::Choice => Flow::Continue(Op::Deliver {
                to: parent,
                value,
                next,
            }),
            Shape::Map => {
                let mapped = {
                    let FrameKind::Map { grammar, .. } = &self.frames[idx].kind else {
                        unreachable!()
                    };
                    match grammar.node() {
                        Node::Map { f, .. } => f(value),
                        _ => unreachable!(),
                    }
                };
                Flow::Continue(Op::Deliver {
                    to: parent,
                    value: mapped,
                    next,
                })
            }
            Shape::Lookahead => self.deliver_lookahead(idx, parent, value),
            Shape::Sequence => self.deliver_sequence(idx, parent, value, next),
            Shape::Repeat => self.deliver_repeat(idx, parent, value, next),
            Shape::Leaf => unreachable!("leaf frames consume no deliveries"),
        }
    }

    fn deliver_lookahead(&mut self, idx: usize, parent: Target, value: V) -> Flow<E, V> {
        let (negative, at) = {
            let FrameKind::Lookahead { at, negative, .. } = &self.frames[idx].kind else {
                unreachable!()
            };
            (*negative, *at)
        };
        if negative {
            // The inner grammar matched, so the negative lookahead fails.
            // Drop the whole subtree, this frame included.
            self.frames.truncate(idx);
            Flow::Continue(Op::Exhaust { to: parent })
        } else {
            // The first inner parse decides; cancel the remaining
            // alternatives and report a single zero-width success.
            self.frames.truncate(idx + 1);
            let FrameKind::Lookahead { fired, child, .. } = &mut self.frames[idx].kind else {
                unreachable!()
            };
            *fired = true;
            *child = None;
            Flow::Continue(Op::Deliver {
                to: parent,
                value,
                next: at,
            })
        }
    }

    fn deliver_sequence(&mut self, idx: usize, parent: Target, value: V, next: Position) -> Flow<E, V> {
        let FrameKind::Sequence { grammar, acc, .. } = &mut self.frames[idx].kind else {
            unreachable!()
        };
        acc.push(value);
        let parts = match grammar.node() {
            Node::Sequence(parts) => parts,
            _ => unreachable!(),
        };
        if acc.len() < parts.len() {
            let part = parts[acc.len()].clone();
            Flow::Continue(Op::Explore {
                grammar: part,
                at: next,
                parent: Target::Frame(idx),
            })
        } else {
            let joined = acc.iter().cloned().fold(V::empty(), V::join);
            Flow::Continue(Op::Deliver {
                to: parent,
                value: joined,
                next,
            })
        }
    }

    fn deliver_repeat(&mut self, idx: usize, parent: Target, value: V, next: Position) -> Flow<E, V> {
        let decision = {
            let FrameKind::Repeat {
                grammar,
                acc,
                starts,
                state,
                ..
            } = &mut self.frames[idx].kind
            else {
                unreachable!()
            };
            let (inner, min, max, prune) = match grammar.node() {
                Node::Repeat {
                    inner,
                    min,
                    max,
                    prune_at_end,
                } => (inner, *min, *max, *prune_at_end),
                _ => unreachable!(),
            };
            acc.push(value);
            let count = acc.len();
            let Some(&rep_start) = starts.last() else {
                unreachable!("repetition delivered with no recorded start")
            };
            let zero_width = next == rep_start;
            if count < min {
                *state = RepeatState::Running;
                starts.push(next);
                RepeatDecision::Descend(inner.clone())
            } else {
                let reached_max = max.map_or(false, |m| count >= m);
                let joined = acc.iter().cloned().fold(V::empty(), V::join);
                // A repetition that consumed nothing must not spawn a
                // successor: it would reproduce the same zero-width parse
                // forever.
                let blocked = reached_max || zero_width;
                RepeatDecision::Deliver {
                    joined,
                    blocked,
                    probe_end: prune && !blocked,
                }
            }
        };
        match decision {
            RepeatDecision::Descend(inner) => Flow::Continue(Op::Explore {
                grammar: inner,
                at: next,
                parent: Target::Frame(idx),
            }),
            RepeatDecision::Deliver {
                joined,
                blocked,
                probe_end,
            } => {
                // The probe must not fail a parse that is already complete;
                // a fault surfaces on the next real read instead.
                let at_end = probe_end && matches!(self.source.read(next), Ok(Read::End));
                let can_descend = !blocked && !at_end;
                let FrameKind::Repeat { state, .. } = &mut self.frames[idx].kind else {
                    unreachable!()
                };
                *state = RepeatState::Delivered { next, can_descend };
                Flow::Continue(Op::Deliver {
                    to: parent,
                    value: joined,
                    next,
                })
            }
        }
    }

    fn exhaust(&mut self, to: Target) -> Flow<E, V> {
        let idx = match to {
            Target::Caller => return Flow::Finished,
            Target::Frame(idx) => idx,
        };
        let parent = self.frames[idx].parent;
        match self.frames[idx].kind.shape() {
            Shape::Choice => {
                let FrameKind::Choice { branch, child, .. } = &mut self.frames[idx].kind else {
                    unreachable!()
                };
                *child = None;
                *branch += 1;
                Flow::Continue(Op::Resume { frame: idx })
            }
            Shape::Map => {
                self.frames.pop();
                Flow::Continue(Op::Exhaust { to: parent })
            }
            Shape::Lookahead => {
                let op = {
                    let FrameKind::Lookahead {
                        at,
                        negative,
                        fired,
                        child,
                        ..
                    } = &mut self.frames[idx].kind
                    else {
                        unreachable!()
                    };
                    *child = None;
                    if *negative && !*fired {
                        // The inner grammar matched nowhere, so the
                        // negative lookahead succeeds once, zero-width.
                        *fired = true;
                        Some(Op::Deliver {
                            to: parent,
                            value: V::empty(),
                            next: *at,
                        })
                    } else {
                        None
                    }
                };
                match op {
                    Some(op) => Flow::Continue(op),
                    None => {
                        self.frames.pop();
                        Flow::Continue(Op::Exhaust { to: parent })
                    }
                }
            }
            Shape::Sequence => {
                let op = {
                    let FrameKind::Sequence { acc, children, .. } = &mut self.frames[idx].kind
                    else {
                        unreachable!()
                    };
                    children.pop();
                    match children.last() {
                        Some(&last) => {
                            acc.pop();
                            Some(Op::Resume { frame: last })
                        }
                        None => None,
                    }
                };
                match op {
                    Some(op) => Flow::Continue(op),
                    None => {
                        self.frames.pop();
                        Flow::Continue(Op::Exhaust { to: parent })
                    }
                }
            }
            Shape::Repeat => {
                let op = {
                    let FrameKind::Repeat {
                        acc,
                        children,
                        starts,
                        state,
                        ..
                    } = &mut self.frames[idx].kind
                    else {
                        unreachable!()
                    };
                    children.pop();
                    starts.pop();
                    *state = RepeatState::Running;
                    match children.last() {
                        Some(&last) => {
                            acc.pop();
                            Some(Op::Resume { frame: last })
                        }
                        None => None,
                    }
                };
                match op {
                    Some(op) => Flow::Continue(op),
                    None => {
                        self.frames.pop();
                        Flow::Continue(Op::Exhaust { to: parent })
                    }
                }
            }
            Shape::Leaf => unreachable!("leaf frames spawn no children"),
        }
    }
}

/// Iterator over every parse of a grammar against a complete source.
///
/// Stops at the first pending read (a push source that has not been fed)
/// and on source faults; [`fault`](Self::fault) reports the latter after
/// the iterator ends.
pub struct Matches<'s, E, V, S> {
    evaluation: Evaluation<'s, E, V, S>,
    fault: Option<SourceError>,
}

impl<'s, E, V, S> Matches<'s, E, V, S> {
    pub(crate) fn new(evaluation: Evaluation<'s, E, V, S>) -> Self {
        Self {
            evaluation,
            fault: None,
        }
    }

    /// The fault that ended iteration, if any.
    pub fn fault(&self) -> Option<&SourceError> {
        self.fault.as_ref()
    }
}

impl<'s, E, V, S> Iterator for Matches<'s, E, V, S>
where
    E: Clone,
    V: Join,
    S: Source<E>,
{
    type Item = ParseResult<V>;

    fn next(&mut self) -> Option<ParseResult<V>> {
        if self.fault.is_some() {
            return None;
        }
        match self.evaluation.poll() {
            Ok(EvalStep::Match(result)) => Some(result),
            Ok(EvalStep::Done) => None,
            Ok(EvalStep::Pending) => {
                warn!("match iteration stopped on a pending read; poll the evaluation instead");
                None
            }
            Err(fault) => {
                warn!(%fault, "source fault ended match iteration");
                self.fault = Some(fault);
                None
            }
        }
    }
}
