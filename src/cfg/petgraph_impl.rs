//! Conversion of [`Cfg`] into a `petgraph` graph, for consumers that want
//! off-the-shelf graph algorithms (dominance, SCCs, ...) rather than the
//! bespoke reachability walk this crate implements for dead-code detection.
//!
//! Mirrors the reference crate's `ir/petgraph` submodule, which implements
//! `petgraph::visit::*` directly on an analysis-specific graph type; here it
//! is simpler to hand back a concrete `petgraph::graph::DiGraph` since `Cfg`
//! has no generic node/edge payload to preserve.

use petgraph::graph::DiGraph;

use super::{Cfg, EdgeKind, NodeId};

impl<S> Cfg<S> {
    /// Converts this CFG into a `petgraph` directed graph, with node weights
    /// set to the originating [`NodeId`] and edge weights to the
    /// [`EdgeKind`].
    #[must_use]
    pub fn to_petgraph(&self) -> DiGraph<NodeId, EdgeKind> {
        let mut graph = DiGraph::new();
        let indices: std::collections::BTreeMap<NodeId, _> = self
            .nodes()
            .map(|node| (node, graph.add_node(node)))
            .collect();
        for node in self.nodes() {
            for edge in self.out_edges_of(node) {
                graph.add_edge(indices[&edge.source], indices[&edge.target], edge.kind);
            }
        }
        graph
    }
}
