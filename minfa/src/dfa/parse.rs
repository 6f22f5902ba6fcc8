use crate::dfa::Dfa;
use crate::parser::ParsedAutomaton;
use std::collections::BTreeMap;
use thiserror::Error;

/// Error when validating a parsed automaton description as a DFA.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DfaParseError {
    #[error("an automaton needs at least one vertex")]
    NoVertices,
    #[error("edge {0} -> {1} points outside the automaton")]
    EdgeOutOfRange(usize, usize),
    #[error("terminal vertex {0} does not exist")]
    TerminalOutOfRange(usize),
    #[error("label '{0}' is not a single byte")]
    LabelNotSingleByte(String),
    #[error("vertex {0} has two transitions on '{1}' with different targets")]
    NotDeterministic(usize, char),
}

impl TryFrom<ParsedAutomaton<'_>> for Dfa {
    type Error = DfaParseError;

    /// Validates that every label is a single byte and that no vertex has
    /// two differing transitions on the same symbol. Unlike in NFA files,
    /// `#` is an ordinary symbol here; a DFA cannot have ε-moves. Repeating
    /// an identical edge is tolerated.
    fn try_from(value: ParsedAutomaton<'_>) -> Result<Self, Self::Error> {
        use DfaParseError::*;
        let ParsedAutomaton {
            vertices,
            edges,
            terminals,
        } = value;

        if vertices == 0 {
            return Err(NoVertices);
        }

        let mut graph: Vec<BTreeMap<u8, usize>> = vec![BTreeMap::new(); vertices];
        for edge in edges {
            if edge.from >= vertices || edge.to >= vertices {
                return Err(EdgeOutOfRange(edge.from, edge.to));
            }
            let &[symbol] = edge.label.as_bytes() else {
                return Err(LabelNotSingleByte(edge.label.to_string()));
            };
            match graph[edge.from].insert(symbol, edge.to) {
                Some(previous) if previous != edge.to => {
                    return Err(NotDeterministic(edge.from, symbol as char));
                }
                _ => {}
            }
        }

        let mut terminal = vec![false; vertices];
        for index in terminals {
            if index >= vertices {
                return Err(TerminalOutOfRange(index));
            }
            terminal[index] = true;
        }

        Ok(Dfa { graph, terminal })
    }
}
