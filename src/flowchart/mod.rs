//! Flowchart derivation.
//!
//! Builds a directed graph of statement nodes with branch and loop edges
//! from either surface syntax, by recursively partitioning the classified
//! line list at each branching or looping construct. Branches reconverge
//! implicitly: every recursive call returns its set of pending predecessors
//! and the next statement links from all of them.

use std::collections::HashMap;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::classify::{classify_dncl, classify_python};
use crate::config::Config;
use crate::syntax::types::{EdgeLabel, SourceLang, SourceLine, Statement};

pub mod mermaid;

// ─── Graph types ─────────────────────────────────────────────────────────────

/// Flowchart node shape vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Process,
    Decision,
    Io,
}

/// One flowchart node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
}

/// One flowchart edge, by node id, for external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub from_id: String,
    pub to_id: String,
    pub label: Option<EdgeLabel>,
}

/// Derived flowchart: a petgraph DiGraph plus an id lookup table.
pub struct FlowGraph {
    pub digraph: DiGraph<FlowNode, Option<EdgeLabel>>,
    pub node_index: HashMap<String, NodeIndex>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self {
            digraph: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        shape: NodeShape,
    ) -> NodeIndex {
        let id = id.into();
        let idx = self.digraph.add_node(FlowNode {
            id: id.clone(),
            label: label.into(),
            shape,
        });
        self.node_index.insert(id, idx);
        idx
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, label: Option<EdgeLabel>) {
        self.digraph.add_edge(from, to, label);
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    /// Look up a node by its id.
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.node_index.get(id).map(|&idx| &self.digraph[idx])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> Vec<&FlowNode> {
        self.digraph
            .node_indices()
            .map(|idx| &self.digraph[idx])
            .collect()
    }

    /// All edges as id pairs, for external collaborators.
    pub fn edges(&self) -> Vec<FlowEdge> {
        self.digraph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.digraph.edge_endpoints(e)?;
                Some(FlowEdge {
                    from_id: self.digraph[a].id.clone(),
                    to_id: self.digraph[b].id.clone(),
                    label: self.digraph[e],
                })
            })
            .collect()
    }

    /// True when the graph has no cycles, i.e. the program has no loops.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.digraph)
    }

    pub fn in_degree(&self, id: &str) -> usize {
        match self.node_index.get(id) {
            None => 0,
            Some(&idx) => self
                .digraph
                .edges_directed(idx, petgraph::Direction::Incoming)
                .count(),
        }
    }

    pub fn out_degree(&self, id: &str) -> usize {
        match self.node_index.get(id) {
            None => 0,
            Some(&idx) => self
                .digraph
                .edges_directed(idx, petgraph::Direction::Outgoing)
                .count(),
        }
    }
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Derivation ──────────────────────────────────────────────────────────────

/// Derive a flowchart from program text in the given syntax.
pub fn derive_flowchart(src: &str, from: SourceLang) -> FlowGraph {
    derive_flowchart_with(src, from, &Config::default())
}

/// `derive_flowchart` with explicit settings.
pub fn derive_flowchart_with(src: &str, from: SourceLang, config: &Config) -> FlowGraph {
    let lines = collect_lines(src, from);
    let mut deriver = Deriver {
        lines: &lines,
        graph: FlowGraph::new(),
        next_id: 0,
        budget: config.label_budget,
    };
    // "End" rather than "end": the lowercase form is a Mermaid keyword
    let start = deriver.graph.add_node("Start", "開始", NodeShape::Process);
    let pending = deriver.derive_range(0, lines.len(), vec![(start, None)]);
    let end = deriver.graph.add_node("End", "終了", NodeShape::Process);
    deriver.connect(&pending, end);
    deriver.graph
}

/// One structurally significant line: depth marker, classified statement,
/// display text.
struct FlowLine {
    depth: usize,
    stmt: Statement,
    text: String,
}

fn collect_lines(src: &str, from: SourceLang) -> Vec<FlowLine> {
    let mut out = Vec::new();
    for raw in src.split('\n') {
        let line = match from {
            SourceLang::Python => SourceLine::from_python(raw),
            SourceLang::Dncl => SourceLine::from_dncl(raw),
        };
        if line.is_blank() || line.is_comment() {
            continue;
        }
        let stmt = match from {
            SourceLang::Python => classify_python(line.content),
            SourceLang::Dncl => classify_dncl(line.content),
        };
        out.push(FlowLine {
            depth: line.depth,
            stmt,
            text: line.content.to_string(),
        });
    }
    out
}

/// Pending predecessor: a node whose outgoing edge (with the given label)
/// still waits for its target.
type Pending = (NodeIndex, Option<EdgeLabel>);

struct Deriver<'a> {
    lines: &'a [FlowLine],
    graph: FlowGraph,
    next_id: usize,
    budget: usize,
}

impl Deriver<'_> {
    fn fresh_node(&mut self, label: String, shape: NodeShape) -> NodeIndex {
        self.next_id += 1;
        let id = format!("n{}", self.next_id);
        self.graph.add_node(id, label, shape)
    }

    fn connect(&mut self, preds: &[Pending], to: NodeIndex) {
        for &(from, label) in preds {
            self.graph.add_edge(from, to, label);
        }
    }

    /// End of the block body opened at `i`: the first following index whose
    /// depth does not exceed line i's depth.
    fn body_end(&self, i: usize, hi: usize) -> usize {
        let depth = self.lines[i].depth;
        (i + 1..hi)
            .find(|&k| self.lines[k].depth <= depth)
            .unwrap_or(hi)
    }

    /// Node label for line `i`. Loop headers keep their full text since they
    /// encode the iteration contract; everything else truncates.
    fn label_for(&self, i: usize) -> String {
        let line = &self.lines[i];
        match &line.stmt {
            Statement::If { cond } | Statement::Elif { cond } => truncate(cond, self.budget),
            Statement::While { cond } => cond.clone(),
            Statement::ForRange(_) => line.text.clone(),
            _ => truncate(&line.text, self.budget),
        }
    }

    fn derive_range(&mut self, mut i: usize, hi: usize, mut preds: Vec<Pending>) -> Vec<Pending> {
        while i < hi {
            match &self.lines[i].stmt {
                Statement::If { .. } | Statement::Elif { .. } => {
                    let (pending, next) = self.derive_conditional(i, hi, preds);
                    preds = pending;
                    i = next;
                }
                Statement::Else => {
                    // stray else with no visible guard: its body flows straight
                    // through
                    let end = self.body_end(i, hi);
                    preds = self.derive_range(i + 1, end, preds);
                    i = end;
                }
                Statement::While { .. } | Statement::ForRange(_) => {
                    let label = self.label_for(i);
                    let node = self.fresh_node(label, NodeShape::Decision);
                    self.connect(&preds, node);
                    let end = self.body_end(i, hi);
                    let terminals =
                        self.derive_range(i + 1, end, vec![(node, Some(EdgeLabel::Yes))]);
                    for (terminal, label) in terminals {
                        if terminal != node {
                            self.graph
                                .add_edge(terminal, node, label.or(Some(EdgeLabel::Continue)));
                        }
                    }
                    preds = vec![(node, Some(EdgeLabel::No))];
                    i = end;
                }
                _ => {
                    let shape = if self.lines[i].stmt.is_io() {
                        NodeShape::Io
                    } else {
                        NodeShape::Process
                    };
                    let label = self.label_for(i);
                    let node = self.fresh_node(label, shape);
                    self.connect(&preds, node);
                    preds = vec![(node, None)];
                    i += 1;
                }
            }
        }
        preds
    }

    /// Derive an if/elif decision and its continuation chain. Returns the
    /// combined pending set of every branch and the index after the chain.
    fn derive_conditional(
        &mut self,
        i: usize,
        hi: usize,
        preds: Vec<Pending>,
    ) -> (Vec<Pending>, usize) {
        let depth = self.lines[i].depth;
        let label = self.label_for(i);
        let node = self.fresh_node(label, NodeShape::Decision);
        self.connect(&preds, node);

        let end = self.body_end(i, hi);
        let mut pending = self.derive_range(i + 1, end, vec![(node, Some(EdgeLabel::Yes))]);
        let no = vec![(node, Some(EdgeLabel::No))];

        if end < hi && self.lines[end].depth == depth {
            match &self.lines[end].stmt {
                Statement::Elif { .. } => {
                    let (chained, next) = self.derive_conditional(end, hi, no);
                    pending.extend(chained);
                    return (pending, next);
                }
                Statement::Else => {
                    let else_end = self.body_end(end, hi);
                    let else_pending = self.derive_range(end + 1, else_end, no);
                    pending.extend(else_pending);
                    return (pending, else_end);
                }
                _ => {}
            }
        }

        pending.extend(no);
        (pending, end)
    }
}

/// Clip to `budget` chars with an ellipsis marker.
fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        text.to_string()
    } else {
        let clipped: String = text.chars().take(budget).collect();
        format!("{clipped}…")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
