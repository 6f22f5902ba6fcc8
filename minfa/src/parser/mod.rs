//! # minfa parser
//! This module contains the parser entry points for the two textual surfaces
//! of the crate: regular expressions and automaton descriptions.
//!
//! ## Regular expressions
//! The regex alphabet is any ASCII byte except the reserved set
//! `( ) | * + `; the byte `#` is an ordinary operand denoting ε (the empty
//! word). Operators by binding strength, strongest first:
//!
//! - `*` and `+`: postfix repetition (zero-or-more / one-or-more),
//! - concatenation: implicit, left-associative (`abc` groups as `(ab)c`),
//! - `|`: alternation, left-associative, loosest.
//!
//! Parentheses group. There is no escaping. Examples: `(a|b)*(b|c)+`,
//! `(#|a|ab|abc)`, `b*a`.
//!
//! Parsing is all-or-nothing: unbalanced parentheses, a missing operand, a
//! stray operator or an empty (sub)expression all make [regex] fail with a
//! parse error.
//!
//! ## Automaton descriptions
//! The automaton format is whitespace-separated:
//!
//! ```text
//! n m
//! u₁ v₁ s₁
//! ...
//! u_m v_m s_m
//! t₁ t₂ … t_k
//! ```
//!
//! `n` is the vertex count and `m` the edge count, followed by `m` triples of
//! source, target and label, and finally the indices of the terminal
//! vertices. Vertex 0 is the start vertex. A label of `#` denotes ε in NFA
//! files. The same surface serves NFAs and DFAs; what differs is validation:
//! [ParsedAutomaton] converts with [TryInto] into an
//! [Nfa](crate::nfa::Nfa) (any labels) or a [Dfa](crate::dfa::Dfa)
//! (single-byte labels, at most one transition per vertex and symbol).

mod fa;
mod regex;

use crate::regex::Regex;
use nom::{combinator::all_consuming, error::Error, Finish};

/// An automaton description parsed from the textual format, not yet
/// validated. Convert with [TryInto] into an [Nfa](crate::nfa::Nfa) or a
/// [Dfa](crate::dfa::Dfa).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAutomaton<'a> {
    pub vertices: usize,
    pub edges: Vec<ParsedEdge<'a>>,
    pub terminals: Vec<usize>,
}

/// One edge line of an automaton description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedEdge<'a> {
    pub from: usize,
    pub to: usize,
    pub label: &'a str,
}

/// Parses an automaton description. The whole input must be consumed,
/// otherwise this function errors. The result still needs validation; use
/// [TryInto] to obtain an [Nfa](crate::nfa::Nfa) or [Dfa](crate::dfa::Dfa).
pub fn automaton(input: &str) -> Result<ParsedAutomaton, Error<&str>> {
    all_consuming(fa::full_automaton)(input)
        .finish()
        .map(|(_, automaton)| automaton)
}

/// Parses a regular expression according to the syntax above. The whole
/// input must be consumed, otherwise this function errors. Every
/// successfully parsed regex is a valid expression tree.
pub fn regex(input: &str) -> Result<Regex, Error<&str>> {
    all_consuming(regex::full_regex)(input)
        .finish()
        .map(|(_, regex)| regex)
}
