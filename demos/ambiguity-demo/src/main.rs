//! Walkthrough of ambiguity-preserving evaluation: every parse a grammar
//! admits is produced, shortest first for quantifiers and leftmost branch
//! first for choices, over both a complete buffer and a push-fed stream.

use grammar_framework::{Grammar, Position, PullSource};
use pipeline_core::Pipeline;
use tracing::info;

fn digit_prefixes() {
    let digit: Grammar<char, String> = Grammar::satisfy(|c: &char| c.is_ascii_digit());
    let digits = match digit.repeat(1, None) {
        Ok(grammar) => grammar,
        Err(err) => {
            info!(%err, "grammar rejected");
            return;
        }
    };
    let source = PullSource::from("1234");
    info!("every digit run starting at the beginning of \"1234\":");
    for parse in digits.matches(&source, Position::start()) {
        info!(value = %parse.value, next = parse.next.index, "parse");
    }
}

fn overlapping_literals() {
    let grammar: Grammar<char, String> =
        Grammar::literal("ab".chars()).or(Grammar::literal("a".chars()));
    let source = PullSource::from("ab");
    info!("both literals match \"ab\"; the longer branch is listed first:");
    for parse in grammar.matches(&source, Position::start()) {
        info!(value = %parse.value, next = parse.next.index, "parse");
    }
}

fn streamed_words() {
    let letter: Grammar<char, String> = Grammar::satisfy(|c: &char| c.is_ascii_alphabetic());
    let word = letter.repeat(1, None).unwrap_or_else(|_| Grammar::empty());
    info!("feeding \"hi\" one element at a time through a pipeline:");
    match Pipeline::new(word, "hi".chars()).run() {
        Ok(parses) => {
            for parse in parses {
                info!(value = %parse.value, next = parse.next.index, "parse");
            }
        }
        Err(fault) => info!(%fault, "pipeline failed"),
    }
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    digit_prefixes();
    overlapping_literals();
    streamed_words();
}
