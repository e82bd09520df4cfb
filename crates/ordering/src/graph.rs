//! # Ordering Graphs
//!
//! Classified relationships between realized orderings, as a directed graph:
//! one node per ordering (labeled with its human-readable form, e.g.
//! `"p00 = p01 < p10"`) and one edge per classified pair.
//!
//! The graph itself stays renderer-agnostic. [`OrderingGraph::edge_list`]
//! hands back plain label pairs so callers can feed any external drawing
//! tool, and the petgraph structure is exposed for everything else.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ordering::PolicyOrdering;

/// What a classified edge between two orderings means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// The source ordering never reverses a strict pair of the target.
    Ungameable,
    /// The source ordering is a strict coarsening of the target.
    Simplification,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Ungameable => write!(f, "ungameable"),
            EdgeKind::Simplification => write!(f, "simplification"),
        }
    }
}

/// A directed graph over ordering labels.
#[derive(Debug, Clone)]
pub struct OrderingGraph {
    graph: DiGraph<String, EdgeKind>,
}

impl OrderingGraph {
    /// Build a graph with one node per ordering and one `kind` edge per
    /// classified index pair.
    ///
    /// Pair indices outside `entries` are a caller bug and panic.
    pub fn from_pairs<A>(
        entries: &[PolicyOrdering<A>],
        pairs: &[(usize, usize)],
        kind: EdgeKind,
    ) -> Self {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = entries.iter().map(|o| graph.add_node(o.label())).collect();
        for &(i, j) in pairs {
            graph.add_edge(nodes[i], nodes[j], kind);
        }
        Self { graph }
    }

    /// Number of orderings in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of classified edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges as `(source label, target label)` pairs, for external renderers.
    pub fn edge_list(&self) -> Vec<(String, String)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].clone(),
                    self.graph[e.target()].clone(),
                )
            })
            .collect()
    }

    /// The underlying petgraph structure.
    pub fn inner(&self) -> &DiGraph<String, EdgeKind> {
        &self.graph
    }
}

impl fmt::Display for OrderingGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "OrderingGraph({} nodes, {} edges)",
            self.node_count(),
            self.edge_count()
        )?;
        for (from, to) in self.edge_list() {
            writeln!(f, "  {} -> {}", from, to)?;
        }
        Ok(())
    }
}
