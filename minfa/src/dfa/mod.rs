//! # Deterministic Finite Automaton
//! The DFA module includes the [Dfa] struct which represents a
//! [deterministic finite automaton](https://en.wikipedia.org/wiki/Deterministic_finite_automaton)
//! over single bytes: every vertex carries a partial map from byte to
//! successor vertex, so there is at most one transition per vertex and
//! symbol. Vertex 0 is the start vertex.
//!
//! A DFA is obtained either by determinizing an NFA or by loading the
//! textual format:
//!
//! ```
//! use minfa::dfa::Dfa;
//! use minfa::parser;
//!
//! // Strings of 'b's followed by a single 'a'
//! let nfa = parser::regex("b*a").unwrap().to_nfa();
//! let mut dfa = Dfa::try_from(nfa).unwrap();
//! assert!(dfa.allows("bba"));
//! assert!(!dfa.allows("ab"));
//!
//! // The minimal total DFA for b*a needs a b-loop, an accepting vertex
//! // and a trap vertex
//! dfa.minimize();
//! assert_eq!(dfa.size(), 3);
//! ```
//!
//! ## Determinization
//! [Dfa::try_from] uses the subset construction over a bitmask encoding of
//! NFA vertex subsets: a `u64` holds one bit per NFA vertex, which caps the
//! supported input at 63 vertices ([DfaBuildError::TooManyStates] otherwise).
//! The NFA is normalized first ([Nfa::expand_edges] and
//! [Nfa::remove_empty_edges]), so every remaining edge carries exactly one
//! byte. Discovered subsets are numbered in discovery order starting with 0
//! for the start subset, which keeps the output stable across runs.
//!
//! ## Minimization and complement
//! [Dfa::minimize] first totalizes the automaton with [Dfa::make_full]
//! (adding a non-terminal trap vertex that catches every missing transition
//! over the used alphabet) and then refines the terminal/non-terminal
//! partition until no (block, symbol) pair splits any block. The quotient by
//! the final partition is the minimal total DFA for the language.
//! [Dfa::complement] totalizes and flips every terminal flag, which
//! complements the language relative to the used alphabet.

use crate::nfa::{Nfa, ToEdge};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use thiserror::Error;

pub use parse::DfaParseError;

pub mod parse;

/// A deterministic finite automaton: one partial byte-to-vertex map per
/// vertex plus a terminal flag per vertex. Vertex 0 is the start vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) graph: Vec<BTreeMap<u8, usize>>,
    pub(crate) terminal: Vec<bool>,
}

/// Error when determinizing an NFA.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DfaBuildError {
    #[error("the subset construction keeps vertex subsets in a 64-bit mask and needs fewer than 64 NFA vertices, got {0}")]
    TooManyStates(usize),
}

impl TryFrom<Nfa> for Dfa {
    type Error = DfaBuildError;

    /// Determinizes the NFA with the subset construction. The NFA is
    /// consumed and normalized first so that every edge carries a single
    /// byte; the vertex cap applies to the normalized automaton.
    fn try_from(mut nfa: Nfa) -> Result<Self, Self::Error> {
        nfa.expand_edges();
        nfa.remove_empty_edges();
        Dfa::subset_construction(&nfa)
    }
}

impl Dfa {
    /// The subset construction proper. Precondition: every edge of `nfa`
    /// carries exactly one byte.
    fn subset_construction(nfa: &Nfa) -> Result<Dfa, DfaBuildError> {
        let n = nfa.size();
        if n >= 64 {
            return Err(DfaBuildError::TooManyStates(n));
        }

        let mut dfa = Dfa {
            graph: vec![BTreeMap::new()],
            terminal: vec![false],
        };
        // Subset of NFA vertices -> DFA vertex, numbered in discovery order.
        let mut numbering: HashMap<u64, usize> = HashMap::from([(1u64, 0)]);
        let mut queue: VecDeque<u64> = VecDeque::from([1u64]);

        while let Some(subset) = queue.pop_front() {
            for c in 0..=127u8 {
                let mut image = 0u64;
                for v in 0..n {
                    if subset & (1 << v) == 0 {
                        continue;
                    }
                    for e in &nfa.graph[v] {
                        if e.by.as_bytes().first() == Some(&c) {
                            image |= 1 << e.to;
                        }
                    }
                }
                if image == 0 {
                    continue;
                }
                let next = match numbering.get(&image) {
                    Some(&next) => next,
                    None => {
                        let next = numbering.len();
                        numbering.insert(image, next);
                        dfa.graph.push(BTreeMap::new());
                        dfa.terminal.push(false);
                        queue.push_back(image);
                        next
                    }
                };
                let here = numbering[&subset];
                dfa.graph[here].insert(c, next);
            }
        }

        // A subset accepts iff any member vertex accepts. The flags are
        // independent of each other, so map order does not matter here.
        for (&subset, &number) in &numbering {
            dfa.terminal[number] = (0..n).any(|v| subset & (1 << v) != 0 && nfa.terminal[v]);
        }
        Ok(dfa)
    }

    /// Checks whether the automaton accepts `word`: a linear walk that
    /// rejects on the first missing transition.
    pub fn allows(&self, word: &str) -> bool {
        let mut current = 0;
        for b in word.bytes() {
            match self.graph[current].get(&b) {
                Some(&next) => current = next,
                None => return false,
            }
        }
        self.terminal[current]
    }

    /// The set of bytes appearing as an edge label anywhere in the
    /// automaton.
    fn used_alphabet(&self) -> BTreeSet<u8> {
        self.graph
            .iter()
            .flat_map(|edges| edges.keys().copied())
            .collect()
    }

    /// Checks whether every vertex has a transition for every byte of the
    /// used alphabet.
    pub fn is_full(&self) -> bool {
        let alphabet = self.used_alphabet();
        self.graph
            .iter()
            .all(|edges| alphabet.iter().all(|c| edges.contains_key(c)))
    }

    /// Totalizes the automaton: if any transition over the used alphabet is
    /// missing, a non-terminal trap vertex is appended, every missing
    /// transition is routed to it, and the trap loops onto itself on every
    /// symbol. Does nothing when the automaton already is total.
    pub fn make_full(&mut self) {
        if self.is_full() {
            return;
        }
        let alphabet = self.used_alphabet();
        let trap = self.graph.len();
        self.graph.push(BTreeMap::new());
        self.terminal.push(false);
        for &c in &alphabet {
            for v in 0..self.graph.len() {
                self.graph[v].entry(c).or_insert(trap);
            }
        }
    }

    /// Minimizes the automaton by partition refinement. The automaton is
    /// totalized first; the terminal and non-terminal vertices form the
    /// initial partition, and (block, symbol) pairs are processed until no
    /// block can be split any further. The vertices are then replaced by the
    /// partition blocks, with the block containing the start vertex becoming
    /// the new vertex 0. The result accepts the same language with the
    /// minimal number of vertices for a total DFA.
    pub fn minimize(&mut self) {
        self.make_full();

        let (terminals, others): (BTreeSet<usize>, BTreeSet<usize>) =
            (0..self.graph.len()).partition(|&v| self.terminal[v]);
        let mut partition: Vec<BTreeSet<usize>> = [others, terminals]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect();

        // After make_full the start vertex carries the whole used alphabet.
        let symbols: Vec<u8> = self.graph[0].keys().copied().collect();
        let mut queue: VecDeque<(BTreeSet<usize>, u8)> = VecDeque::new();
        for &c in &symbols {
            for block in &partition {
                queue.push_back((block.clone(), c));
            }
        }

        while let Some((splitter, c)) = queue.pop_front() {
            let mut refined = Vec::with_capacity(partition.len());
            for block in partition {
                let (inside, outside): (BTreeSet<usize>, BTreeSet<usize>) = block
                    .iter()
                    .partition(|&&v| splitter.contains(&self.graph[v][&c]));
                if inside.is_empty() || outside.is_empty() {
                    refined.push(block);
                } else {
                    for &c in &symbols {
                        queue.push_back((inside.clone(), c));
                        queue.push_back((outside.clone(), c));
                    }
                    refined.push(inside);
                    refined.push(outside);
                }
            }
            partition = refined;
        }

        // The block holding the start vertex becomes the new vertex 0.
        if let Some(pos) = partition.iter().position(|block| block.contains(&0)) {
            partition.swap(0, pos);
        }
        let mut block_of = vec![0usize; self.graph.len()];
        for (number, block) in partition.iter().enumerate() {
            for &v in block {
                block_of[v] = number;
            }
        }

        let mut graph = vec![BTreeMap::new(); partition.len()];
        let mut terminal = vec![false; partition.len()];
        for (v, edges) in self.graph.iter().enumerate() {
            for (&c, &to) in edges {
                graph[block_of[v]].insert(c, block_of[to]);
            }
            if self.terminal[v] {
                terminal[block_of[v]] = true;
            }
        }
        self.graph = graph;
        self.terminal = terminal;
    }

    /// Complements the language relative to the used alphabet: totalizes the
    /// automaton and flips every terminal flag. Every word over the used
    /// alphabet flips between accepted and rejected; words with bytes
    /// outside of it stay rejected.
    pub fn complement(&mut self) {
        self.make_full();
        self.terminal.iter_mut().for_each(|t| *t = !*t);
    }

    /// Converts this DFA into the equivalent NFA with one single-byte edge
    /// per transition.
    pub fn to_nfa(&self) -> Nfa {
        let mut nfa = Nfa {
            graph: vec![Vec::new(); self.graph.len()],
            rev_graph: vec![Vec::new(); self.graph.len()],
            terminal: self.terminal.clone(),
        };
        for (v, edges) in self.graph.iter().enumerate() {
            for (&c, &to) in edges {
                nfa.add_edge(v, ToEdge::new((c as char).to_string(), to));
            }
        }
        nfa
    }

    /// The number of vertices.
    pub fn size(&self) -> usize {
        self.graph.len()
    }

    /// The number of transitions.
    pub fn edges(&self) -> usize {
        self.graph.iter().map(BTreeMap::len).sum()
    }

    /// Serializes this DFA in the textual automaton format; see
    /// [Nfa::dump]. Transitions are emitted in symbol order per vertex.
    pub fn dump(&self) -> String {
        let mut out = format!("{} {}\n", self.size(), self.edges());
        for (v, edges) in self.graph.iter().enumerate() {
            for (&c, &to) in edges {
                out.push_str(&format!("{} {} {}\n", v, to, c as char));
            }
        }
        let terminals = (0..self.terminal.len())
            .filter(|&v| self.terminal[v])
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        out.push_str(&terminals.join(" "));
        out.push('\n');
        out
    }
}

impl From<Dfa> for Nfa {
    fn from(value: Dfa) -> Self {
        value.to_nfa()
    }
}
