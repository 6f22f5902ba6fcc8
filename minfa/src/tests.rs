use crate::dfa::{Dfa, DfaBuildError, DfaParseError};
use crate::nfa::{FromEdge, Nfa, NfaParseError, ToEdge};
use crate::parser;
use crate::regex::Regex;
use crate::rfa::{EliminationError, Rfa};
use ::regex::Regex as LibRegex;
use proptest::prelude::*;
use std::collections::HashSet;

const SCENARIO_REGEXES: [&str; 5] = [
    "(a|b)*(b|c)+",
    "(#|a|ab|abc)",
    "(aaaa|ab)",
    "((a|ab)(c|cd)+(e|ef)*)",
    "b*a",
];

const SCENARIO_WORDS: [&str; 15] = [
    "",
    "b",
    "c",
    "a",
    "ab",
    "abc",
    "abbab",
    "aaaa",
    "bbbbbbbbb",
    "abaca",
    "ababababbcbcbcbc",
    "accde",
    "abccd",
    "abccdeefefe",
    "accdeff",
];

const BINARY_WORDS: [&str; 19] = [
    "10", "00", "01", "11", "0", "1", "", "101", "1101", "000001", "000101101", "1001", "0111",
    "0011", "01001001", "010010", "01010", "110010", "011",
];

fn load_nfa(input: &str) -> Nfa {
    parser::automaton(input).unwrap().try_into().unwrap()
}

fn load_dfa(input: &str) -> Dfa {
    parser::automaton(input).unwrap().try_into().unwrap()
}

/// Checks the word lists against the NFA, the DFA and the minimized DFA for
/// the regex, so that every pipeline stage agrees on the language.
fn check_language(regex: &str, accepted: &[&str], rejected: &[&str]) {
    let nfa = parser::regex(regex).unwrap().to_nfa();
    let dfa = Dfa::try_from(nfa.clone()).unwrap();
    let mut minimized = dfa.clone();
    minimized.minimize();
    assert!(minimized.size() <= dfa.size());
    for word in accepted {
        assert!(nfa.allows(word), "NFA of {regex} should accept {word:?}");
        assert!(dfa.allows(word), "DFA of {regex} should accept {word:?}");
        assert!(
            minimized.allows(word),
            "minimal DFA of {regex} should accept {word:?}"
        );
    }
    for word in rejected {
        assert!(!nfa.allows(word), "NFA of {regex} should reject {word:?}");
        assert!(!dfa.allows(word), "DFA of {regex} should reject {word:?}");
        assert!(
            !minimized.allows(word),
            "minimal DFA of {regex} should reject {word:?}"
        );
    }
}

#[test]
fn starred_alternation_then_plus() {
    check_language(
        "(a|b)*(b|c)+",
        &["b", "c", "ab", "abc", "abbab", "bbbbbbbbb", "ababababbcbcbcbc"],
        &["", "a", "aaaa", "abaca"],
    );
}

#[test]
fn epsilon_alternative() {
    check_language(
        "(#|a|ab|abc)",
        &["", "a", "ab", "abc"],
        &["b", "c", "abbab", "aaaa", "bbbbbbbbb", "abaca"],
    );
}

#[test]
fn two_fixed_words() {
    check_language("(aaaa|ab)", &["ab", "aaaa"], &["", "a", "abc", "aaa", "abbab"]);
}

#[test]
fn nested_factors() {
    check_language(
        "((a|ab)(c|cd)+(e|ef)*)",
        &["abc", "accde", "abccd", "abccdeefefe"],
        &["", "ab", "accdeff", "aaaa", "abaca"],
    );
}

#[test]
fn loop_before_final_letter() {
    check_language("b*a", &["a", "bbbbbbba"], &["", "b", "bbbbb", "bbab"]);
}

#[test]
fn malformed_regexes_are_rejected() {
    let bad = [
        "",
        "|a",
        "a|",
        "((ab)|bc))",
        "((|a)|b)",
        "((((()))))",
        "(ab|cd)|((ab)**)|(|a)",
        "(*a)",
    ];
    for regex in bad {
        assert!(
            parser::regex(regex).is_err(),
            "{regex:?} should not parse"
        );
    }
}

#[test]
fn operators_associate_left() {
    use Regex::*;
    let expected = Alt(
        Box::new(Alt(Box::new(Char(b'a')), Box::new(Char(b'b')))),
        Box::new(Char(b'c')),
    );
    assert_eq!(parser::regex("a|b|c").unwrap(), expected);

    let expected = Concat(
        Box::new(Concat(Box::new(Char(b'a')), Box::new(Char(b'b')))),
        Box::new(Char(b'c')),
    );
    assert_eq!(parser::regex("abc").unwrap(), expected);

    // Postfix binds stronger than concatenation: a*b is (a*)b
    let expected = Concat(
        Box::new(Star(Box::new(Char(b'a')))),
        Box::new(Char(b'b')),
    );
    assert_eq!(parser::regex("a*b").unwrap(), expected);
}

#[test]
fn hash_is_the_empty_word() {
    let nfa = parser::regex("#").unwrap().to_nfa();
    assert!(nfa.allows(""));
    assert!(!nfa.allows("a"));

    // ε is neutral for concatenation
    let plain = parser::regex("ab").unwrap().to_nfa();
    let padded = parser::regex("a#b").unwrap().to_nfa();
    for word in ["", "a", "ab", "aab", "b"] {
        assert_eq!(plain.allows(word), padded.allows(word));
    }
}

#[test]
fn vertices_can_be_grown_in_place() {
    let mut nfa = load_nfa("2 2\n0 0 a\n0 1 b\n1");
    assert!(!nfa.allows("bab"));
    assert!(!nfa.allows("baaa"));

    // New accepting vertex reachable on 'b', with an 'a' loop and a way back
    nfa.add_vertex(
        &[FromEdge::new("b", 0), FromEdge::new("a", 2)],
        &[ToEdge::new("a", 2), ToEdge::new("b", 1)],
        true,
    );
    assert!(nfa.allows("bab"));
    assert!(nfa.allows("baaab"));
    assert!(nfa.allows("baaa"));

    assert!(!nfa.allows("ababab"));
    // The ("ab", 3) entry asks for a self-loop on the new vertex and is
    // dropped; the ("ab", from 3) entry creates one
    nfa.add_vertex(
        &[FromEdge::new("ab", 0), FromEdge::new("ab", 3)],
        &[ToEdge::new("", 1), ToEdge::new("ab", 3)],
        false,
    );
    assert!(nfa.allows("ababab"));
    assert!(!nfa.allows("bbb"));
    assert!(!nfa.allows("abba"));

    assert_eq!(nfa.size(), 4);
    assert!(nfa.has_long_edges());
    nfa.expand_edges();
    assert!(!nfa.has_long_edges());
    assert_eq!(nfa.size(), 6);
    for (word, expected) in [
        ("bab", true),
        ("baaab", true),
        ("baaa", true),
        ("ababab", true),
        ("bbb", false),
        ("abba", false),
    ] {
        assert_eq!(nfa.allows(word), expected, "after expansion, {word:?}");
    }

    assert!(nfa.has_empty_edges());
    nfa.remove_empty_edges();
    assert!(!nfa.has_empty_edges());
    for (word, expected) in [
        ("bab", true),
        ("baaab", true),
        ("baaa", true),
        ("ababab", true),
        ("bbb", false),
        ("abba", false),
    ] {
        assert_eq!(nfa.allows(word), expected, "after ε-removal, {word:?}");
    }
}

#[test]
fn expansion_adds_one_vertex_per_extra_byte() {
    let mut nfa = Nfa::new();
    nfa.add_vertex(&[FromEdge::new("abcde", 0)], &[], true);
    assert_eq!(nfa.size(), 2);
    assert!(nfa.has_long_edges());
    nfa.expand_edges();
    assert_eq!(nfa.size(), 6);
    assert!(!nfa.has_long_edges());

    nfa.add_vertex(&[FromEdge::new("abcde", 3)], &[], false);
    assert!(nfa.has_long_edges());
    nfa.expand_edges();
    assert_eq!(nfa.size(), 11);

    nfa.add_vertex(
        &[FromEdge::new("", 5), FromEdge::new("a", 7)],
        &[ToEdge::new("ac", 9)],
        false,
    );
    nfa.expand_edges();
    assert_eq!(nfa.size(), 13);
}

#[test]
fn epsilon_removal_keeps_the_empty_word() {
    let mut nfa = Nfa::new();
    nfa.add_vertex(&[FromEdge::new("", 0)], &[], true);
    assert!(nfa.allows(""));
    assert_eq!(nfa.edges(), 1);
    nfa.remove_empty_edges();
    assert!(nfa.allows(""));
    assert_eq!(nfa.edges(), 0);

    let mut nfa = load_nfa(include_str!("../tests/test_files/epsilon.nfa"));
    assert_eq!(nfa.edges(), 4);
    assert!(nfa.allows("") && nfa.allows("abababab"));
    nfa.remove_empty_edges();
    assert_eq!(nfa.edges(), 3);
    assert!(nfa.allows("") && nfa.allows("abababab"));
}

#[test]
fn acceptance_over_mixed_automata() {
    let words = ["aaaab", "ab", "baaabb", "baaaa", "", "bba", "abab"];
    let cases: [(&str, [bool; 7]); 5] = [
        (
            "2 2\n0 0 a\n0 1 b\n1",
            [true, true, false, false, false, false, false],
        ),
        (
            include_str!("../tests/test_files/multibyte.nfa"),
            [false, true, true, false, false, false, false],
        ),
        (
            "3 6\n0 0 a\n0 1 b\n1 0 b\n1 2 a\n2 1 a\n2 2 b\n0",
            [false, false, false, false, true, true, false],
        ),
        (
            include_str!("../tests/test_files/epsilon.nfa"),
            [false, true, false, false, true, false, true],
        ),
        (
            "5 9\n0 1 a\n0 3 a\n1 2 b\n2 3 b\n3 4 b\n4 2 a\n4 0 #\n0 1 b\n2 4 a\n4",
            [false, true, false, false, false, true, true],
        ),
    ];
    for (input, expected) in cases {
        let nfa = load_nfa(input);
        for (word, &expected) in words.iter().zip(expected.iter()) {
            assert_eq!(nfa.allows(word), expected, "{word:?} on\n{input}");
        }
    }
}

#[test]
fn subset_construction_preserves_language() {
    let nfa = load_nfa(include_str!("../tests/test_files/nfa1.nfa"));
    let dfa = Dfa::try_from(nfa.clone()).unwrap();
    for word in BINARY_WORDS {
        assert_eq!(nfa.allows(word), dfa.allows(word), "{word:?}");
    }

    assert!(!dfa.is_full());
    let mut full = dfa.clone();
    full.make_full();
    assert!(full.is_full());
    assert_eq!(full.edges(), 2 * full.size());
    for word in BINARY_WORDS {
        assert_eq!(dfa.allows(word), full.allows(word), "totalized, {word:?}");
    }

    let mut minimized = full.clone();
    minimized.minimize();
    assert!(minimized.size() <= full.size());
    for word in BINARY_WORDS {
        assert_eq!(nfa.allows(word), minimized.allows(word), "minimized, {word:?}");
    }

    let mut complement = minimized.clone();
    complement.complement();
    for word in BINARY_WORDS {
        assert_ne!(
            nfa.allows(word),
            complement.allows(word),
            "complement, {word:?}"
        );
    }
}

#[test]
fn minimization_reaches_the_canonical_automaton() {
    let mut wide = load_dfa(include_str!("../tests/test_files/unminimized.dfa"));
    let narrow = load_dfa(include_str!("../tests/test_files/minimal.dfa"));
    for word in BINARY_WORDS {
        assert_eq!(wide.allows(word), narrow.allows(word), "{word:?}");
    }
    wide.minimize();
    assert_eq!(wide.size(), narrow.size());
    assert_eq!(wide.edges(), narrow.edges());
    for word in BINARY_WORDS {
        assert_eq!(wide.allows(word), narrow.allows(word), "minimized, {word:?}");
    }

    let mut partial = load_dfa(include_str!("../tests/test_files/partial.dfa"));
    let mut small = load_dfa(include_str!("../tests/test_files/small.dfa"));
    for word in BINARY_WORDS {
        assert_eq!(partial.allows(word), small.allows(word), "{word:?}");
    }
    partial.minimize();
    small.make_full();
    assert_eq!(partial.size(), small.size());
    assert_eq!(partial.edges(), small.edges());
    for word in BINARY_WORDS {
        assert_eq!(partial.allows(word), small.allows(word), "minimized, {word:?}");
    }
}

#[test]
fn state_elimination_round_trips() {
    for regex in SCENARIO_REGEXES {
        let nfa = parser::regex(regex).unwrap().to_nfa();
        let recovered = Rfa::from(nfa.clone()).into_regex();
        let recovered_nfa = parser::regex(&recovered).unwrap().to_nfa();
        for word in SCENARIO_WORDS {
            assert_eq!(
                nfa.allows(word),
                recovered_nfa.allows(word),
                "round-trip of {regex} disagrees on {word:?}"
            );
        }
    }
}

#[test]
fn complement_regex_disagrees_everywhere() {
    for regex in SCENARIO_REGEXES {
        let nfa = parser::regex(regex).unwrap().to_nfa();
        let mut dfa = Dfa::try_from(nfa.clone()).unwrap();
        dfa.minimize();
        dfa.complement();
        let complement_regex = Rfa::from(dfa.to_nfa()).into_regex();
        let complement_nfa = parser::regex(&complement_regex).unwrap().to_nfa();

        let alphabet: HashSet<char> =
            regex.chars().filter(|c| !"()|*+#".contains(*c)).collect();
        for word in SCENARIO_WORDS
            .iter()
            .filter(|word| word.chars().all(|c| alphabet.contains(&c)))
        {
            assert_ne!(
                nfa.allows(word),
                complement_nfa.allows(word),
                "complement of {regex} agrees on {word:?}"
            );
        }
    }
}

#[test]
fn subset_construction_refuses_wide_automata() {
    let mut nfa = Nfa::new();
    for _ in 0..64 {
        nfa.add_vertex(&[], &[], false);
    }
    assert_eq!(
        Dfa::try_from(nfa),
        Err(DfaBuildError::TooManyStates(65))
    );
}

#[test]
fn start_and_terminal_vertices_are_protected() {
    let mut rfa = Rfa::from(parser::regex("ab").unwrap().to_nfa());
    assert_eq!(rfa.remove_vertex(0), Err(EliminationError::ProtectedVertex(0)));
    assert_eq!(rfa.remove_vertex(3), Err(EliminationError::ProtectedVertex(3)));
    assert_eq!(rfa.remove_vertex(1), Ok(()));
}

#[test]
fn dumps_reload_to_the_same_automaton() {
    let nfa = parser::regex("(a|b)*c").unwrap().to_nfa();
    let dumped = nfa.dump();
    let reloaded = load_nfa(&dumped);
    assert_eq!(reloaded.dump(), dumped);
    for word in ["c", "abc", "", "ab", "bac"] {
        assert_eq!(nfa.allows(word), reloaded.allows(word), "{word:?}");
    }

    let dfa = Dfa::try_from(nfa).unwrap();
    let reloaded = load_dfa(&dfa.dump());
    assert_eq!(reloaded, dfa);
}

#[test]
fn invalid_descriptions_are_rejected() {
    assert!(parser::automaton("x").is_err());
    assert!(parser::automaton("2 2\n0 1 a").is_err()); // fewer edges than announced

    let edge_out_of_range = parser::automaton("2 1\n0 5 a\n1").unwrap();
    assert_eq!(
        Nfa::try_from(edge_out_of_range),
        Err(NfaParseError::EdgeOutOfRange(0, 5))
    );

    let terminal_out_of_range = parser::automaton("1 0\n3").unwrap();
    assert_eq!(
        Nfa::try_from(terminal_out_of_range),
        Err(NfaParseError::TerminalOutOfRange(3))
    );

    let nondeterministic =
        parser::automaton(include_str!("../tests/test_files/nondeterministic.dfa")).unwrap();
    assert_eq!(
        Dfa::try_from(nondeterministic),
        Err(DfaParseError::NotDeterministic(0, 'a'))
    );

    let long_label = parser::automaton("2 1\n0 1 ab\n1").unwrap();
    assert_eq!(
        Dfa::try_from(long_label),
        Err(DfaParseError::LabelNotSingleByte("ab".to_string()))
    );

    // A repeated identical edge is not a determinism conflict
    let duplicate = parser::automaton("2 2\n0 1 a\n0 1 a\n1").unwrap();
    assert!(Dfa::try_from(duplicate).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The whole pipeline agrees with the `regex` crate on random small
    /// expressions. Expressions whose NFA normalizes to 64 or more vertices
    /// are skipped; everything else must match on every stage.
    #[test]
    fn pipeline_matches_reference_engine(
        regex_str in small_regex(),
        tests in prop::collection::vec("[a-d]*", 24)
    ) {
        let nfa = parser::regex(&regex_str).unwrap().to_nfa();
        if let Ok(dfa) = Dfa::try_from(nfa.clone()) {
            let mut minimized = dfa.clone();
            minimized.minimize();
            prop_assert!(minimized.size() <= dfa.size());

            let reference = LibRegex::new(&format!("^({regex_str})$")).unwrap();
            for word in &tests {
                let expected = reference.is_match(word);
                prop_assert_eq!(nfa.allows(word), expected, "NFA on {:?}", word);
                prop_assert_eq!(dfa.allows(word), expected, "DFA on {:?}", word);
                prop_assert_eq!(minimized.allows(word), expected, "minimal DFA on {:?}", word);
            }
        }
    }

    /// Normalizing rewrites never change the accepted language.
    #[test]
    fn normalization_is_invisible_to_acceptance(
        regex_str in small_regex(),
        tests in prop::collection::vec("[a-d]*", 24)
    ) {
        let nfa = parser::regex(&regex_str).unwrap().to_nfa();
        let mut expanded = nfa.clone();
        expanded.expand_edges();
        let mut stripped = expanded.clone();
        stripped.remove_empty_edges();
        for word in &tests {
            let expected = nfa.allows(word);
            prop_assert_eq!(expanded.allows(word), expected, "expanded on {:?}", word);
            prop_assert_eq!(stripped.allows(word), expected, "ε-free on {:?}", word);
        }
    }

    /// Complementing flips acceptance for every word over the expression's
    /// own alphabet.
    #[test]
    fn complement_flips_every_word(
        regex_str in small_regex(),
        tests in prop::collection::vec("[a-d]*", 24)
    ) {
        let nfa = parser::regex(&regex_str).unwrap().to_nfa();
        if let Ok(mut dfa) = Dfa::try_from(nfa) {
            dfa.minimize();
            let mut complement = dfa.clone();
            complement.complement();
            let alphabet: HashSet<char> =
                regex_str.chars().filter(|c| c.is_ascii_alphabetic()).collect();
            for word in tests.iter().filter(|word| word.chars().all(|c| alphabet.contains(&c))) {
                prop_assert_ne!(dfa.allows(word), complement.allows(word), "{:?}", word);
            }
        }
    }

    /// State elimination recovers an expression for the same language.
    #[test]
    fn eliminated_regex_preserves_language(
        regex_str in small_regex(),
        tests in prop::collection::vec("[a-d]*", 24)
    ) {
        let nfa = parser::regex(&regex_str).unwrap().to_nfa();
        if let Ok(mut dfa) = Dfa::try_from(nfa) {
            dfa.minimize();
            let recovered = Rfa::from(dfa.to_nfa()).into_regex();
            let recovered_nfa = parser::regex(&recovered).unwrap().to_nfa();
            for word in &tests {
                prop_assert_eq!(dfa.allows(word), recovered_nfa.allows(word), "{:?}", word);
            }
        }
    }
}

fn small_regex() -> impl Strategy<Value = String> {
    "[a-d]".prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            3 => (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}{b}")),
            3 => (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}|{b})")),
            1 => inner.clone().prop_map(|r| format!("({r})*")),
            1 => inner.clone().prop_map(|r| format!("({r})+")),
        ]
    })
}
