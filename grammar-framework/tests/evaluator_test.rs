use grammar_framework::{Grammar, ParseResult, Position, PullSource};

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
fn test_quantifier_yields_every_prefix_shortest_first() {
    let digits = digit().repeat(1, None).unwrap();
    assert_eq!(
        parses(&digits, "1234"),
        vec![
            ("1".into(), 1),
            ("12".into(), 2),
            ("123".into(), 3),
            ("1234".into(), 4),
        ]
    );
}

#[test]
fn test_overlapping_branches_yield_leftmost_first() {
    let grammar = Grammar::literal("ab".chars()).or(Grammar::literal("a".chars()));
    assert_eq!(parses(&grammar, "ab"), vec![("ab".into(), 2), ("a".into(), 1)]);
}

#[test]
fn test_no_match_is_an_empty_result_sequence() {
    let grammar: Grammar<char, String> = Grammar::literal("b".chars());
    assert_eq!(parses(&grammar, "a"), vec![]);
    assert_eq!(parses(&grammar, ""), vec![]);
}

#[test]
fn test_empty_grammar_matches_everywhere_without_consuming() {
    let grammar: Grammar<char, String> = Grammar::empty();
    assert_eq!(parses(&grammar, "xyz"), vec![("".into(), 0)]);

    let source = PullSource::from("xyz");
    let mid: Vec<ParseResult<String>> = grammar.matches(&source, Position::at(2)).collect();
    assert_eq!(mid, vec![ParseResult::new("".into(), Position::at(2))]);
}

#[test]
fn test_optional_lists_the_present_parse_before_the_absent_one() {
    let grammar = Grammar::literal("a".chars()).optional();
    assert_eq!(parses(&grammar, "a"), vec![("a".into(), 1), ("".into(), 0)]);
    // Where the inner grammar cannot match, only the absent parse remains.
    assert_eq!(parses(&grammar, "b"), vec![("".into(), 0)]);
}

#[test]
fn test_sequencing_joins_part_values_in_order() {
    let grammar = Grammar::literal("a".chars()).and(Grammar::literal("b".chars()));
    assert_eq!(parses(&grammar, "ab"), vec![("ab".into(), 2)]);
    // One failing part fails the whole sequence.
    assert_eq!(parses(&grammar, "ax"), vec![]);
}

#[test]
fn test_sequencing_backtracks_through_an_ambiguous_part() {
    // The first part can take one or two digits; the second takes one more.
    let grammar = digit().repeat(1, Some(2)).unwrap().and(digit());
    assert_eq!(parses(&grammar, "123"), vec![("12".into(), 2), ("123".into(), 3)]);
}

#[test]
fn test_map_transforms_every_parse() {
    let grammar = digit()
        .repeat(1, None)
        .unwrap()
        .map(|value| format!("<{value}>"));
    assert_eq!(parses(&grammar, "12"), vec![("<1>".into(), 1), ("<12>".into(), 2)]);
}

#[test]
fn test_choice_over_many_branches_keeps_branch_order() {
    let grammar = Grammar::choice(vec![
        Grammar::literal("a".chars()),
        Grammar::literal("ab".chars()),
        Grammar::literal("abc".chars()),
    ]);
    assert_eq!(
        parses(&grammar, "abc"),
        vec![("a".into(), 1), ("ab".into(), 2), ("abc".into(), 3)]
    );
}

#[test]
fn test_choice_with_no_branches_never_matches() {
    let grammar: Grammar<char, String> = Grammar::choice(vec![]);
    assert_eq!(parses(&grammar, "a"), vec![]);
}

#[test]
fn test_evaluation_is_deterministic() {
    let grammar = digit().repeat(1, None).unwrap().and(digit().optional());
    assert_eq!(parses(&grammar, "1234"), parses(&grammar, "1234"));
}

#[test]
fn test_positions_never_move_backwards() {
    let start = 1;
    let grammar = digit().repeat(0, None).unwrap();
    let source = PullSource::from("0123");
    for parse in grammar.matches(&source, Position::at(start)) {
        assert!(parse.next.index >= start);
    }
}

#[test]
fn test_evaluation_starts_mid_input() {
    let grammar = digit().repeat(1, None).unwrap();
    let source = PullSource::from("9876");
    let results: Vec<(String, usize)> = grammar
        .matches(&source, Position::at(2))
        .map(|parse| (parse.value, parse.next.index))
        .collect();
    assert_eq!(results, vec![("7".into(), 3), ("76".into(), 4)]);
}
