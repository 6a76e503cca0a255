use grammar_framework::{Grammar, GrammarError, Position, PullSource};

fn letter() -> Grammar<char, String> {
    Grammar::satisfy(|c: &char| c.is_ascii_alphabetic())
}

fn digit() -> Grammar<char, String> {
    Grammar::satisfy(|c: &char| c.is_ascii_digit())
}

fn parses(grammar: &Grammar<char, String>, input: &str) -> Vec<(String, usize)> {
    let source = PullSource::from(input);
    grammar
        .matches(&source, Position::start())
        .map(|parse| (parse.value, parse.next.index))
        .collect()
}

#[test]
fn test_bounds_select_the_allowed_repetition_counts() {
    let grammar = letter().repeat(2, Some(4)).unwrap();
    assert_eq!(
        parses(&grammar, "aaaaa"),
        vec![("aa".into(), 2), ("aaa".into(), 3), ("aaaa".into(), 4)]
    );
}

#[test]
fn test_minimum_below_available_input_means_no_parse() {
    let grammar = letter().repeat(3, None).unwrap();
    assert_eq!(parses(&grammar, "ab"), vec![]);
}

#[test]
fn test_zero_to_zero_yields_only_the_empty_parse() {
    let grammar = letter().repeat(0, Some(0)).unwrap();
    assert_eq!(parses(&grammar, "abc"), vec![("".into(), 0)]);
}

#[test]
fn test_zero_minimum_leads_with_the_empty_parse() {
    let grammar = letter().repeat(0, None).unwrap();
    assert_eq!(
        parses(&grammar, "ab"),
        vec![("".into(), 0), ("a".into(), 1), ("ab".into(), 2)]
    );
}

#[test]
fn test_inverted_bounds_are_rejected_at_build_time() {
    let result = letter().repeat(3, Some(1));
    assert_eq!(
        result.err(),
        Some(GrammarError::InvalidRepeatBounds { min: 3, max: 1 })
    );
}

#[test]
fn test_exact_count_via_equal_bounds() {
    let grammar = letter().repeat(2, Some(2)).unwrap();
    assert_eq!(parses(&grammar, "abc"), vec![("ab".into(), 2)]);
}

#[test]
fn test_zero_width_inner_parse_does_not_repeat_forever() {
    // The inner grammar always admits a zero-width parse; the quantifier
    // must still terminate, refusing to stack empty repetitions.
    let grammar = digit().optional().repeat(0, None).unwrap();
    assert_eq!(
        parses(&grammar, "1"),
        vec![("".into(), 0), ("1".into(), 1), ("1".into(), 1), ("".into(), 0)]
    );
}

#[test]
fn test_empty_grammar_repeated_with_a_minimum_terminates() {
    let grammar: Grammar<char, String> = Grammar::empty().repeat(3, None).unwrap();
    assert_eq!(parses(&grammar, "x"), vec![("".into(), 0)]);
}

#[test]
fn test_many_matches_like_an_unbounded_repeat_on_plain_input() {
    let repeat = letter().repeat(0, None).unwrap();
    let many = letter().many();
    assert_eq!(parses(&repeat, "ab"), parses(&many, "ab"));
    assert_eq!(parses(&repeat, ""), parses(&many, ""));
}

#[test]
fn test_many_prunes_zero_width_repetitions_at_the_end() {
    // With an inner grammar that can match nothing, `repeat` proposes one
    // more (empty) repetition at the end of the input; `many` does not.
    let repeat = digit().optional().repeat(0, None).unwrap();
    let many = digit().optional().many();
    assert_eq!(
        parses(&repeat, "1"),
        vec![("".into(), 0), ("1".into(), 1), ("1".into(), 1), ("".into(), 0)]
    );
    assert_eq!(
        parses(&many, "1"),
        vec![("".into(), 0), ("1".into(), 1), ("".into(), 0)]
    );
}

#[test]
fn test_nested_quantifiers_enumerate_every_split() {
    // Two-letter groups inside an outer quantifier over "abcd".
    let pair = letter().repeat(2, Some(2)).unwrap();
    let grammar = pair.repeat(0, None).unwrap();
    assert_eq!(
        parses(&grammar, "abcd"),
        vec![("".into(), 0), ("ab".into(), 2), ("abcd".into(), 4)]
    );
}
