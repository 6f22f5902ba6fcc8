//!# minfa
//!
//! `minfa` is a Rust library for regular languages over a byte alphabet: it
//! parses regular expressions, lowers them to NFAs, determinizes and
//! minimizes DFAs, complements them, and recovers a regular expression from
//! an automaton by state elimination.
//!
//! ## Usage
//!
//! ```rust
//! use minfa::dfa::Dfa;
//! use minfa::rfa::Rfa;
//!
//! // Any number of a's and b's, then at least one b or c
//! let regex = minfa::parser::regex("(a|b)*(b|c)+").unwrap();
//!
//! // Thompson construction, then subset construction, then minimization
//! let nfa = regex.to_nfa();
//! let mut dfa = Dfa::try_from(nfa).unwrap();
//! dfa.minimize();
//! assert!(dfa.allows("abc"));
//! assert!(dfa.allows("bbbbbbbbb"));
//! assert!(!dfa.allows("abaca"));
//!
//! // The complement swaps accepted and rejected words over the alphabet
//! let mut complement = dfa.clone();
//! complement.complement();
//! assert!(!complement.allows("abc"));
//! assert!(complement.allows("a"));
//!
//! // State elimination recovers a regular expression for the complement
//! let recovered = Rfa::from(complement.to_nfa()).into_regex();
//! let nfa = minfa::parser::regex(&recovered).unwrap().to_nfa();
//! assert!(!nfa.allows("abc"));
//! assert!(nfa.allows("a"));
//! ```
//!
//! ## Pipeline
//!
//! The pieces chain as `regex → AST → NFA → DFA → minimal DFA → complement →
//! RFA → regex`:
//!
//! * [parser::regex] parses the surface syntax (alternation `|`, implicit
//!   concatenation, postfix `*`/`+`, grouping parens, `#` for ε) into a
//!   [regex::Regex] tree
//! * [regex::Regex::to_nfa] lowers the tree through the NFA combinators
//!   ([nfa::Nfa::parallel], [nfa::Nfa::consecutive], [nfa::Nfa::kleene_star],
//!   [nfa::Nfa::kleene_plus])
//! * [nfa::Nfa::to_dfa] normalizes edges ([nfa::Nfa::expand_edges],
//!   [nfa::Nfa::remove_empty_edges]) and runs the subset construction; the
//!   bitmask subset encoding caps input automata at 63 vertices
//! * [dfa::Dfa::minimize], [dfa::Dfa::make_full] and [dfa::Dfa::complement]
//!   operate on the DFA
//! * [rfa::Rfa::into_regex] runs state elimination on any automaton, giving
//!   back a regular expression for its language
//!
//! Automata can also be loaded from and written to a whitespace-separated
//! textual format, see [parser::automaton], [nfa::Nfa::dump] and
//! [dfa::Dfa::dump].

pub mod dfa;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod rfa;

#[cfg(test)]
mod tests;
