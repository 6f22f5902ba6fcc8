use crate::nfa::{Nfa, ToEdge};
use crate::parser::ParsedAutomaton;
use thiserror::Error;

/// Error when validating a parsed automaton description as an NFA.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NfaParseError {
    #[error("an automaton needs at least one vertex")]
    NoVertices,
    #[error("edge {0} -> {1} points outside the automaton")]
    EdgeOutOfRange(usize, usize),
    #[error("terminal vertex {0} does not exist")]
    TerminalOutOfRange(usize),
}

impl TryFrom<ParsedAutomaton<'_>> for Nfa {
    type Error = NfaParseError;

    /// Validates vertex indices and resolves the `#` sigil to the empty
    /// ε-label. Vertex 0 is the start vertex.
    fn try_from(value: ParsedAutomaton<'_>) -> Result<Self, Self::Error> {
        use NfaParseError::*;
        let ParsedAutomaton {
            vertices,
            edges,
            terminals,
        } = value;

        if vertices == 0 {
            return Err(NoVertices);
        }

        let mut nfa = Nfa {
            graph: vec![Vec::new(); vertices],
            rev_graph: vec![Vec::new(); vertices],
            terminal: vec![false; vertices],
        };

        for edge in edges {
            if edge.from >= vertices || edge.to >= vertices {
                return Err(EdgeOutOfRange(edge.from, edge.to));
            }
            let by = if edge.label == "#" { "" } else { edge.label };
            nfa.add_edge(edge.from, ToEdge::new(by, edge.to));
        }

        for terminal in terminals {
            if terminal >= vertices {
                return Err(TerminalOutOfRange(terminal));
            }
            nfa.terminal[terminal] = true;
        }

        Ok(nfa)
    }
}
