//! # Nondeterministic Finite Automaton
//! The NFA module includes the [Nfa] struct, a
//! [nondeterministic finite automaton](https://en.wikipedia.org/wiki/Nondeterministic_finite_automaton)
//! over a byte alphabet. Edge labels are byte strings: a label of two or more
//! bytes is consumed as a whole, a single byte is an ordinary transition, and
//! the empty label is an ε-move. Vertex 0 is always the start vertex, and any
//! subset of vertices may be terminal.
//!
//! An NFA can be built three ways: starting from [Nfa::new] and growing it
//! with [Nfa::add_vertex], lowering a regular expression
//! ([crate::regex::Regex::to_nfa]), or loading the textual format through
//! [crate::parser::automaton] and [TryInto]:
//!
//! ```
//! use minfa::nfa::Nfa;
//!
//! // Two vertices, a loop on 'a' and an edge on 'b' to the terminal vertex
//! let input = "
//!     2 2
//!     0 0 a
//!     0 1 b
//!     1
//! ";
//! let nfa: Nfa = minfa::parser::automaton(input).unwrap().try_into().unwrap();
//! assert!(nfa.allows("aaab"));
//! assert!(!nfa.allows("ba"));
//! ```
//!
//! ## Rewrites
//! Two structural rewrites normalize an NFA without changing its language:
//! [Nfa::expand_edges] splits every multi-byte edge into a chain of
//! single-byte edges, and [Nfa::remove_empty_edges] eliminates ε-moves by
//! saturating the ε-closure. After both, every edge carries exactly one byte,
//! which is the precondition for the subset construction
//! ([Nfa::to_dfa] normalizes a copy on its own).
//!
//! ## Combinators
//! The regular operations are provided as consuming combinators:
//! [Nfa::parallel] (alternation), [Nfa::consecutive] (concatenation),
//! [Nfa::kleene_star] and [Nfa::kleene_plus]. Each first funnels all terminal
//! vertices into a single one with [Nfa::make_single_terminal], then stitches
//! the operand graphs together with ε-edges. Callers that want to keep an
//! operand pass a clone.
//!
//! ## Acceptance
//! [Nfa::allows] works directly on automata that still carry ε-moves and
//! multi-byte edges, so it can be used before and after normalization to
//! cross-check the rewrites.

use std::collections::VecDeque;

pub use parse::NfaParseError;

pub mod parse;

/// An outgoing edge: consume `by` and move to vertex `to`. An empty `by` is
/// an ε-move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToEdge {
    pub by: String,
    pub to: usize,
}

/// An incoming edge: vertex `from` reaches this vertex by consuming `by`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FromEdge {
    pub by: String,
    pub from: usize,
}

impl ToEdge {
    pub fn new(by: impl Into<String>, to: usize) -> Self {
        ToEdge { by: by.into(), to }
    }
}

impl FromEdge {
    pub fn new(by: impl Into<String>, from: usize) -> Self {
        FromEdge { by: by.into(), from }
    }
}

/// A nondeterministic finite automaton: a labelled multigraph kept as forward
/// and reverse adjacency lists plus a terminal flag per vertex. Vertex 0 is
/// the start vertex. The two adjacency lists always describe the same
/// multiset of edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) graph: Vec<Vec<ToEdge>>,
    pub(crate) rev_graph: Vec<Vec<FromEdge>>,
    pub(crate) terminal: Vec<bool>,
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}

fn single_byte(b: u8) -> String {
    (b as char).to_string()
}

impl Nfa {
    /// Creates an NFA with a single non-terminal start vertex and no edges.
    pub fn new() -> Self {
        Nfa {
            graph: vec![Vec::new()],
            rev_graph: vec![Vec::new()],
            terminal: vec![false],
        }
    }

    /// Appends a new vertex and returns its index. Edges in `from` lead from
    /// existing vertices to the new one, edges in `to` lead from the new
    /// vertex to existing ones. A `to` entry whose target is the new vertex
    /// itself is dropped silently; the combinators rely on that when wiring
    /// fresh vertices.
    pub fn add_vertex(&mut self, from: &[FromEdge], to: &[ToEdge], term: bool) -> usize {
        let v = self.graph.len();
        self.graph.push(Vec::new());
        self.rev_graph.push(Vec::new());
        for edge in from {
            self.graph[edge.from].push(ToEdge::new(edge.by.clone(), v));
            self.rev_graph[v].push(edge.clone());
        }
        for edge in to {
            if edge.to == v {
                continue;
            }
            self.rev_graph[edge.to].push(FromEdge::new(edge.by.clone(), v));
            self.graph[v].push(edge.clone());
        }
        self.terminal.push(term);
        v
    }

    /// Adds the edge to both adjacency lists.
    pub(crate) fn add_edge(&mut self, v: usize, e: ToEdge) {
        self.rev_graph[e.to].push(FromEdge::new(e.by.clone(), v));
        self.graph[v].push(e);
    }

    /// Removes every copy of the edge from both adjacency lists.
    pub(crate) fn remove_edge(&mut self, v: usize, e: &ToEdge) {
        self.rev_graph[e.to].retain(|f| !(f.from == v && f.by == e.by));
        self.graph[v].retain(|g| g != e);
    }

    /// Replaces every edge with a label of two or more bytes by a chain of
    /// fresh non-terminal vertices so that each edge carries a single byte.
    /// After this call, [Nfa::has_long_edges] returns `false`.
    pub fn expand_edges(&mut self) {
        // Vertices appended mid-loop only carry single-byte edges, so the
        // growing upper bound is harmless.
        let mut v = 0;
        while v < self.graph.len() {
            let long_edges: Vec<ToEdge> = self.graph[v]
                .iter()
                .filter(|e| e.by.len() >= 2)
                .cloned()
                .collect();
            for edge in long_edges {
                self.expand_edge(v, &edge);
            }
            v += 1;
        }
    }

    fn expand_edge(&mut self, v: usize, e: &ToEdge) {
        let bytes = e.by.as_bytes().to_vec();
        let n = bytes.len();
        let mut last = v;
        for &b in &bytes[..n - 2] {
            last = self.add_vertex(&[FromEdge::new(single_byte(b), last)], &[], false);
        }
        self.add_vertex(
            &[FromEdge::new(single_byte(bytes[n - 2]), last)],
            &[ToEdge::new(single_byte(bytes[n - 1]), e.to)],
            false,
        );
        self.remove_edge(v, e);
    }

    /// Eliminates all ε-moves while preserving the language. The transitive
    /// closure of the ε-relation is computed first; every vertex inherits the
    /// terminal flag and the non-ε edges of its closure, and all ε-edges are
    /// deleted afterwards. Vertices are never removed, so indices stay
    /// stable.
    pub fn remove_empty_edges(&mut self) {
        let n = self.graph.len();
        let mut closure = vec![vec![false; n]; n];
        for v in 0..n {
            for e in &self.graph[v] {
                if e.by.is_empty() {
                    closure[v][e.to] = true;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                if closure[i][k] {
                    for j in 0..n {
                        if closure[k][j] {
                            closure[i][j] = true;
                        }
                    }
                }
            }
        }

        for i in 0..n {
            for j in 0..n {
                if closure[i][j] && self.terminal[j] {
                    self.terminal[i] = true;
                }
            }
        }

        for i in 0..n {
            for j in 0..n {
                if !closure[i][j] {
                    continue;
                }
                // Snapshot: when i == j the inherited edges would otherwise
                // be read from the list being extended.
                let inherited = self.graph[j].clone();
                for e in inherited {
                    if !e.by.is_empty() && !self.graph[i].contains(&e) {
                        self.add_edge(i, e);
                    }
                }
            }
        }

        for i in 0..n {
            for j in 0..n {
                if closure[i][j] {
                    self.remove_edge(i, &ToEdge::new("", j));
                }
            }
        }
    }

    /// Checks whether the automaton accepts `word`. Works on any NFA,
    /// including ones with ε-moves and multi-byte edges: a reverse dynamic
    /// program over word positions marks the vertices from which the
    /// remaining suffix reaches a terminal vertex, saturating ε-moves
    /// backwards over the reverse graph at every position.
    pub fn allows(&self, word: &str) -> bool {
        let w = word.as_bytes();
        let n = self.graph.len();
        let m = w.len();
        let mut dp = vec![vec![false; n]; m + 1];
        for v in 0..n {
            dp[m][v] = self.terminal[v];
        }

        for pos in (0..=m).rev() {
            if pos != m {
                for v in 0..n {
                    for e in &self.graph[v] {
                        let k = e.by.len();
                        if k > 0 && pos + k <= m && &w[pos..pos + k] == e.by.as_bytes() && dp[pos + k][e.to] {
                            dp[pos][v] = true;
                        }
                    }
                }
            }

            // ε-moves consume nothing: anything that reaches a marked vertex
            // over ε-edges is marked as well.
            let mut queue: VecDeque<usize> = (0..n).filter(|&v| dp[pos][v]).collect();
            while let Some(v) = queue.pop_front() {
                for e in &self.rev_graph[v] {
                    if e.by.is_empty() && !dp[pos][e.from] {
                        dp[pos][e.from] = true;
                        queue.push_back(e.from);
                    }
                }
            }
        }

        dp[0][0]
    }

    /// Funnels all terminal vertices into a single fresh one: appends a new
    /// vertex, adds an ε-edge from every terminal vertex to it, and makes it
    /// the only terminal vertex. Does nothing if the last vertex already is
    /// the sole terminal one.
    pub fn make_single_terminal(&mut self) {
        if self.terminal_count() == 1 && self.terminal[self.terminal.len() - 1] {
            return;
        }
        let sink = self.graph.len();
        self.graph.push(Vec::new());
        self.rev_graph.push(Vec::new());
        for v in 0..self.terminal.len() {
            if self.terminal[v] {
                self.graph[v].push(ToEdge::new("", sink));
                self.rev_graph[sink].push(FromEdge::new("", v));
                self.terminal[v] = false;
            }
        }
        self.terminal.push(true);
    }

    /// Alternation: the result accepts exactly the words accepted by `self`
    /// or by `other`. A fresh start vertex branches over ε-edges into both
    /// operands, and both funnel into a fresh terminal vertex.
    pub fn parallel(mut self, mut other: Nfa) -> Nfa {
        self.make_single_terminal();
        other.make_single_terminal();
        let a = self.size();
        let b = other.size();
        let sink = a + b + 1;

        let mut out = Nfa {
            graph: vec![Vec::new(); a + b + 2],
            rev_graph: vec![Vec::new(); a + b + 2],
            terminal: vec![false; a + b + 2],
        };
        out.add_edge(0, ToEdge::new("", 1));
        out.add_edge(0, ToEdge::new("", a + 1));

        for (v, edges) in self.graph.iter().enumerate() {
            if self.terminal[v] {
                out.add_edge(v + 1, ToEdge::new("", sink));
            }
            for e in edges {
                out.add_edge(v + 1, ToEdge::new(e.by.clone(), e.to + 1));
            }
        }
        for (v, edges) in other.graph.iter().enumerate() {
            if other.terminal[v] {
                out.add_edge(v + a + 1, ToEdge::new("", sink));
            }
            for e in edges {
                out.add_edge(v + a + 1, ToEdge::new(e.by.clone(), e.to + a + 1));
            }
        }

        out.terminal[sink] = true;
        out
    }

    /// Concatenation: the result accepts `uv` for every `u` accepted by
    /// `self` and `v` accepted by `other`. The single terminal vertex of
    /// `self` is connected over an ε-edge to the start vertex of `other`,
    /// and only `other`'s terminal vertex stays terminal.
    pub fn consecutive(mut self, mut other: Nfa) -> Nfa {
        self.make_single_terminal();
        other.make_single_terminal();
        let offset = self.size();

        self.graph[offset - 1].push(ToEdge::new("", offset));
        self.graph.resize(offset + other.size(), Vec::new());
        self.rev_graph.resize(offset + other.size(), Vec::new());
        self.rev_graph[offset].push(FromEdge::new("", offset - 1));
        self.terminal = vec![false; offset + other.size()];

        for (v, edges) in other.graph.iter().enumerate() {
            if other.terminal[v] {
                self.terminal[v + offset] = true;
            }
            for e in edges {
                self.graph[v + offset].push(ToEdge::new(e.by.clone(), e.to + offset));
                self.rev_graph[e.to + offset].push(FromEdge::new(e.by.clone(), v + offset));
            }
        }
        self
    }

    /// Kleene star: accepts any number of repetitions of the operand,
    /// including none. All vertices shift up by one; the fresh vertex 0 is
    /// both start and sole terminal vertex, with an ε-edge into the old start
    /// and ε-edges back from the old terminal vertex.
    pub fn kleene_star(mut self) -> Nfa {
        self.make_single_terminal();
        let n = self.size();

        let mut out = Nfa {
            graph: vec![Vec::new(); n + 1],
            rev_graph: vec![Vec::new(); n + 1],
            terminal: vec![false; n + 1],
        };
        for (v, edges) in self.graph.iter().enumerate() {
            if self.terminal[v] {
                out.add_edge(v + 1, ToEdge::new("", 0));
            }
            for e in edges {
                out.add_edge(v + 1, ToEdge::new(e.by.clone(), e.to + 1));
            }
        }
        out.add_edge(0, ToEdge::new("", 1));
        out.terminal[0] = true;
        out
    }

    /// Kleene plus: at least one repetition, built as the operand followed by
    /// its star.
    pub fn kleene_plus(self) -> Nfa {
        let star = self.clone().kleene_star();
        self.consecutive(star)
    }

    /// The number of vertices.
    pub fn size(&self) -> usize {
        self.graph.len()
    }

    /// The number of edges.
    pub fn edges(&self) -> usize {
        self.graph.iter().map(Vec::len).sum()
    }

    /// The number of terminal vertices.
    pub fn terminal_count(&self) -> usize {
        self.terminal.iter().filter(|&&t| t).count()
    }

    /// Checks whether any edge is an ε-move.
    pub fn has_empty_edges(&self) -> bool {
        self.graph.iter().flatten().any(|e| e.by.is_empty())
    }

    /// Checks whether any edge carries more than one byte.
    pub fn has_long_edges(&self) -> bool {
        self.graph.iter().flatten().any(|e| e.by.len() > 1)
    }

    /// Determinizes this NFA with the subset construction; see
    /// [Dfa](crate::dfa::Dfa). Fails with
    /// [DfaBuildError::TooManyStates](crate::dfa::DfaBuildError) when the
    /// normalized automaton has 64 or more vertices.
    pub fn to_dfa(self) -> Result<crate::dfa::Dfa, crate::dfa::DfaBuildError> {
        self.try_into()
    }

    /// Serializes this NFA in the textual automaton format: a header with the
    /// vertex and edge counts, one `from to label` line per edge (ε printed
    /// as `#`), and the terminal vertex indices on the final line. The output
    /// parses back through [crate::parser::automaton].
    pub fn dump(&self) -> String {
        let mut out = format!("{} {}\n", self.size(), self.edges());
        for (v, edges) in self.graph.iter().enumerate() {
            for e in edges {
                let label = if e.by.is_empty() { "#" } else { e.by.as_str() };
                out.push_str(&format!("{} {} {}\n", v, e.to, label));
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
