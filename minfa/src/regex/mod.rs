//! # Regular expressions
//! This module holds the expression tree produced by
//! [crate::parser::regex] and its lowering to an NFA. The supported
//! operations are the mathematical core of regular expressions: single
//! bytes, alternation, concatenation and Kleene star/plus. The byte `#`
//! stands for ε, the empty word; there are no character classes, anchors or
//! captures.
//!
//! ```
//! use minfa::parser;
//!
//! let nfa = parser::regex("(ab)+c").unwrap().to_nfa();
//! assert!(nfa.allows("abc"));
//! assert!(nfa.allows("ababc"));
//! assert!(!nfa.allows("c"));
//!
//! // `#` is ε: it accepts the empty word and is neutral in concatenation
//! let nfa = parser::regex("a#b").unwrap().to_nfa();
//! assert!(nfa.allows("ab"));
//! ```

use crate::nfa::{FromEdge, Nfa};

/// A regular expression tree. `Char(b'#')` denotes ε. Alternation and
/// concatenation are binary and built left-associatively by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Regex {
    Char(u8),
    Alt(Box<Regex>, Box<Regex>),
    Concat(Box<Regex>, Box<Regex>),
    Star(Box<Regex>),
    Plus(Box<Regex>),
}

impl Regex {
    /// Lowers this expression tree to an NFA accepting the same language.
    /// Every variant maps onto one NFA combinator: a character becomes a
    /// two-vertex automaton with a single edge, alternation becomes
    /// [Nfa::parallel], concatenation [Nfa::consecutive], and repetition
    /// [Nfa::kleene_star] / [Nfa::kleene_plus].
    pub fn to_nfa(self) -> Nfa {
        match self {
            Regex::Char(c) => {
                let mut nfa = Nfa::new();
                let by = if c == b'#' {
                    String::new()
                } else {
                    (c as char).to_string()
                };
                nfa.add_vertex(&[FromEdge::new(by, 0)], &[], true);
                nfa
            }
            Regex::Alt(left, right) => left.to_nfa().parallel(right.to_nfa()),
            Regex::Concat(left, right) => left.to_nfa().consecutive(right.to_nfa()),
            Regex::Star(operand) => operand.to_nfa().kleene_star(),
            Regex::Plus(operand) => operand.to_nfa().kleene_plus(),
        }
    }
}
