//! # Regex-labelled finite automaton
//! The RFA is the working form for turning an automaton back into a regular
//! expression: an [Nfa] whose edge labels are read as regex fragments
//! instead of literal byte strings. [Rfa::into_regex] reduces the graph to a
//! single expression by state elimination: internal vertices are removed one
//! by one, composing `predecessor · (self-loops)* · successor` labels around
//! each removal, until only the start vertex and a single terminal sink
//! remain.
//!
//! ```
//! use minfa::parser;
//! use minfa::rfa::Rfa;
//!
//! let nfa = parser::regex("b*a").unwrap().to_nfa();
//! let recovered = Rfa::from(nfa.clone()).into_regex();
//!
//! // The recovered expression is rarely the prettiest one, but it accepts
//! // exactly the same language
//! let nfa2 = parser::regex(&recovered).unwrap().to_nfa();
//! for word in ["a", "bba", "", "ab", "bb"] {
//!     assert_eq!(nfa.allows(word), nfa2.allows(word));
//! }
//! ```

use crate::nfa::{FromEdge, Nfa, ToEdge};
use thiserror::Error;

/// A finite automaton whose edge labels are regular expressions. Wraps an
/// [Nfa]; single-byte and ε labels are already valid regex fragments, and
/// elimination only ever composes labels into larger expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rfa {
    nfa: Nfa,
}

/// Error when eliminating a vertex that must survive.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EliminationError {
    #[error("vertex {0} is the start vertex or a terminal vertex and cannot be eliminated")]
    ProtectedVertex(usize),
}

impl From<Nfa> for Rfa {
    fn from(nfa: Nfa) -> Self {
        Rfa { nfa }
    }
}

impl Rfa {
    /// Eliminates one vertex, rerouting every predecessor to every successor
    /// with the composed label. The start vertex and terminal vertices are
    /// protected: removing them would change the language.
    pub fn remove_vertex(&mut self, v: usize) -> Result<(), EliminationError> {
        if v == 0 || self.nfa.terminal[v] {
            return Err(EliminationError::ProtectedVertex(v));
        }
        self.eliminate(v);
        Ok(())
    }

    fn eliminate(&mut self, v: usize) {
        // Fold the self-loops into `((l₁)|(l₂)|…)*`; ε-loops contribute
        // nothing and plain ε-only loops leave the star out entirely.
        let self_loops: Vec<ToEdge> = self.nfa.graph[v]
            .iter()
            .filter(|e| e.to == v)
            .cloned()
            .collect();
        let loop_parts: Vec<String> = self_loops
            .iter()
            .filter(|e| !e.by.is_empty())
            .map(|e| format!("({})", e.by))
            .collect();
        let star = if loop_parts.is_empty() {
            String::new()
        } else {
            format!("({})*", loop_parts.join("|"))
        };
        for e in &self_loops {
            self.nfa.remove_edge(v, e);
        }

        let incoming = self.nfa.rev_graph[v].clone();
        let outgoing = self.nfa.graph[v].clone();
        for e in &incoming {
            self.nfa.remove_edge(e.from, &ToEdge::new(e.by.clone(), v));
        }
        for e in &outgoing {
            self.nfa.remove_edge(v, e);
        }
        for pred in &incoming {
            for succ in &outgoing {
                let by = format!("{}{}{}", pred.by, star, succ.by);
                self.nfa.add_edge(pred.from, ToEdge::new(by, succ.to));
            }
        }
    }

    /// Reduces the automaton to a single regular expression accepting the
    /// same language. All terminal vertices are funneled into one sink
    /// first; then every internal vertex is eliminated, leaving only edges
    /// between the start vertex and the sink. Start self-loops `L₀` and
    /// direct edges `R` assemble into `(L₀)*(R)`, `R` alone when there are
    /// no self-loops, and the literal `#` when the language is just the
    /// empty word.
    pub fn into_regex(mut self) -> String {
        self.nfa.make_single_terminal();

        // The terminal consolidation keeps a sole last terminal vertex as
        // is. The elimination below only reads edges leaving the start
        // vertex at the end, so the sink must not have outgoing edges;
        // funnel it into a fresh one if it does.
        let sink = self.nfa.size() - 1;
        if !self.nfa.graph[sink].is_empty() {
            self.nfa.add_vertex(&[FromEdge::new("", sink)], &[], true);
            self.nfa.terminal[sink] = false;
        }

        for v in 1..self.nfa.size() - 1 {
            self.eliminate(v);
        }

        let mut direct: Vec<String> = Vec::new();
        let mut loops: Vec<String> = Vec::new();
        for e in &self.nfa.graph[0] {
            if e.to == 0 {
                if !e.by.is_empty() {
                    loops.push(format!("({})", e.by));
                }
            } else if e.by.is_empty() {
                direct.push("(#)".to_string());
            } else {
                direct.push(format!("({})", e.by));
            }
        }

        // No path from start to sink means the language has no word besides
        // possibly ε; ∅ itself has no literal in this dialect, so both
        // remaining cases collapse to `#`.
        if direct.is_empty() {
            return "#".to_string();
        }
        let direct = direct.join("|");
        if loops.is_empty() {
            direct
        } else {
            format!("({})*({})", loops.join("|"), direct)
        }
    }
}
