//! The control flow graph: the structural input the solver and the
//! dead-code detector both walk.
//!
//! Building a CFG from source or bytecode is out of scope for this crate
//! (§1); what's here is the minimal concrete representation needed to
//! exercise and test the framework, the constant-propagation analysis, and
//! the dead-code detector in isolation, grounded in the reference crate's
//! generic `ControlFlowGraph<N, E>` (`ir/control_flow/mod.rs`).

#[cfg(feature = "petgraph")]
mod petgraph_impl;

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::ir::{IndexedNode, Stmt, StmtIndex};

/// A node of the control flow graph.
///
/// Unlike the reference crate, which keys everything — including a
/// synthetic zero node — by a single `ProgramCounter`, the entry and exit
/// here are a distinct variant from `Stmt`. The dead-code detector (§4.6 of
/// the design) must strip the synthetic entry/exit out of its result after
/// the reachability walk, which is simplest when they can never be confused
/// with a real statement index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// The CFG's unique synthetic entry node.
    Entry,
    /// A real statement.
    Stmt(StmtIndex),
    /// The CFG's unique synthetic exit node.
    Exit,
}

/// The kind of an outgoing control flow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Falls through to the next statement.
    FallThrough,
    /// The `true` branch of an `if`.
    IfTrue,
    /// The `false` branch of an `if`.
    IfFalse,
    /// A `switch` case with the given constant.
    ///
    /// The dead-code walk enqueues every out-edge whose case value matches;
    /// per the open question in §10 of the design this crate assumes unique
    /// case values per switch, but does not rely on that assumption for
    /// correctness.
    SwitchCase(i32),
    /// A `switch`'s default target.
    SwitchDefault,
}

/// An outgoing edge, as returned by [`Cfg::out_edges_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// The edge's source node.
    pub source: NodeId,
    /// The edge's target node.
    pub target: NodeId,
    /// The edge's kind.
    pub kind: EdgeKind,
}

/// A control flow graph over a fixed set of node payloads, with a unique
/// synthetic entry and exit node.
///
/// Generic over the node payload `S` (defaulted to [`Stmt`]), mirroring the
/// reference crate's `ControlFlowGraph<N, E>` being generic over its node
/// data — the rest of this crate only ever instantiates `S = Stmt`, since
/// constant propagation and dead-code detection both need to read the
/// concrete `StmtKind`, but nothing in `Cfg` itself depends on that.
#[derive(Debug, Clone)]
pub struct Cfg<S = Stmt> {
    stmts: BTreeMap<StmtIndex, S>,
    out_edges: BTreeMap<NodeId, Vec<Edge>>,
    preds: BTreeMap<NodeId, Vec<NodeId>>,
}

// Hand-written rather than `#[derive(Default)]`: a derived impl would add a
// spurious `S: Default` bound to the generated `impl`, which `Stmt` (the
// default and only instantiation in this crate) does not satisfy.
impl<S> Default for Cfg<S> {
    fn default() -> Self {
        Self {
            stmts: BTreeMap::new(),
            out_edges: BTreeMap::new(),
            preds: BTreeMap::new(),
        }
    }
}

impl<S> Cfg<S> {
    /// The CFG's unique entry node.
    #[must_use]
    pub const fn entry(&self) -> NodeId {
        NodeId::Entry
    }

    /// The CFG's unique exit node.
    #[must_use]
    pub const fn exit(&self) -> NodeId {
        NodeId::Exit
    }

    /// Checks the structural precondition the solver relies on: the CFG
    /// must actually contain its entry and exit nodes (i.e. at least one
    /// edge must touch each of them, or they must have been registered via
    /// [`CfgBuilder::ensure_node`]).
    ///
    /// # Errors
    /// Returns [`CoreError::NoEntry`] / [`CoreError::NoExit`] if either
    /// synthetic node is absent. Per §7 of the design, a solver run over a
    /// CFG that fails this check is undefined behavior — this is the
    /// caller-side validation spec.md leaves to the caller.
    pub fn validate(&self) -> Result<(), CoreError> {
        let has_entry = self.out_edges.contains_key(&NodeId::Entry)
            || self.preds.contains_key(&NodeId::Entry);
        if !has_entry {
            return Err(CoreError::NoEntry);
        }
        let has_exit =
            self.out_edges.contains_key(&NodeId::Exit) || self.preds.contains_key(&NodeId::Exit);
        if !has_exit {
            return Err(CoreError::NoExit);
        }
        Ok(())
    }

    /// `true` if `node` is the entry node.
    #[must_use]
    pub fn is_entry(&self, node: NodeId) -> bool {
        node == NodeId::Entry
    }

    /// `true` if `node` is the exit node.
    #[must_use]
    pub fn is_exit(&self, node: NodeId) -> bool {
        node == NodeId::Exit
    }

    /// The statement at a [`NodeId::Stmt`] node, or `None` for the
    /// synthetic entry/exit nodes.
    #[must_use]
    pub fn stmt_of(&self, node: NodeId) -> Option<&S> {
        match node {
            NodeId::Stmt(index) => self.stmts.get(&index),
            NodeId::Entry | NodeId::Exit => None,
        }
    }

    /// All statements, ordered by index.
    pub fn stmts(&self) -> impl Iterator<Item = &S> {
        self.stmts.values()
    }

    /// All nodes: the entry, every statement, and the exit.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(NodeId::Entry)
            .chain(self.stmts.keys().copied().map(NodeId::Stmt))
            .chain(std::iter::once(NodeId::Exit))
    }

    /// The predecessors of `node`, in the order their edges were added.
    #[must_use]
    pub fn preds_of(&self, node: NodeId) -> &[NodeId] {
        self.preds.get(&node).map_or(&[], Vec::as_slice)
    }

    /// The successors of `node`, in the order their edges were added.
    pub fn succs_of(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges_of(node).map(|edge| edge.target)
    }

    /// The outgoing edges of `node`, in the order they were added.
    pub fn out_edges_of(&self, node: NodeId) -> impl Iterator<Item = Edge> + '_ {
        self.out_edges
            .get(&node)
            .into_iter()
            .flat_map(|edges| edges.iter().copied())
    }
}

/// Builds a [`Cfg`] by adding statements and edges.
#[derive(Debug)]
pub struct CfgBuilder<S = Stmt> {
    cfg: Cfg<S>,
}

// See the note on `Cfg`'s `Default` impl: hand-written to avoid a spurious
// `S: Default` bound.
impl<S> Default for CfgBuilder<S> {
    fn default() -> Self {
        Self {
            cfg: Cfg::default(),
        }
    }
}

impl<S: IndexedNode> CfgBuilder<S> {
    /// A builder with no statements or edges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statement to the CFG. Does not add any edges for it; callers
    /// must connect it with [`add_edge`](Self::add_edge).
    #[must_use]
    pub fn add_stmt(mut self, stmt: S) -> Self {
        self.cfg.stmts.insert(stmt.stmt_index(), stmt);
        self
    }

    /// Ensures `node` is registered even if it ends up with no incident
    /// edges (e.g. a lone entry directly connected to exit).
    #[must_use]
    pub fn ensure_node(mut self, node: NodeId) -> Self {
        self.cfg.out_edges.entry(node).or_default();
        self
    }

    /// Adds a directed edge.
    ///
    /// # Panics
    /// Panics if an edge with the same source, target, and kind already
    /// exists, mirroring the reference crate's `ControlFlowGraph::from_edges`
    /// panic-on-duplicate-edge convention — a duplicate edge is a CFG
    /// construction bug, not a recoverable runtime condition.
    #[must_use]
    pub fn add_edge(mut self, source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        let edge = Edge {
            source,
            target,
            kind,
        };
        let out = self.cfg.out_edges.entry(source).or_default();
        assert!(
            !out.contains(&edge),
            "duplicate edge {source:?} -> {target:?} ({kind:?})"
        );
        out.push(edge);
        self.cfg.preds.entry(target).or_default().push(source);
        self
    }

    /// Builds the [`Cfg`].
    #[must_use]
    pub fn build(self) -> Cfg<S> {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{LValue, StmtKind, Var};

    fn straight_line() -> Cfg {
        let s0 = Stmt::new(
            StmtIndex::new(0),
            StmtKind::Assign(LValue::Var(Var::int("x")), crate::ir::Expr::IntLiteral(1)),
        );
        CfgBuilder::new()
            .add_stmt(s0.clone())
            .add_edge(NodeId::Entry, NodeId::Stmt(s0.index()), EdgeKind::FallThrough)
            .add_edge(NodeId::Stmt(s0.index()), NodeId::Exit, EdgeKind::FallThrough)
            .build()
    }

    #[test]
    fn validate_succeeds_when_entry_and_exit_present() {
        assert!(straight_line().validate().is_ok());
    }

    #[test]
    fn validate_fails_without_entry() {
        let cfg: Cfg = CfgBuilder::new().build();
        assert_eq!(cfg.validate(), Err(CoreError::NoEntry));
    }

    #[test]
    fn nodes_include_synthetic_entry_and_exit() {
        let cfg = straight_line();
        let nodes: Vec<_> = cfg.nodes().collect();
        assert_eq!(nodes.len(), 3);
        assert!(nodes.contains(&NodeId::Entry));
        assert!(nodes.contains(&NodeId::Exit));
    }

    #[test]
    #[should_panic(expected = "duplicate edge")]
    fn duplicate_edge_panics() {
        let _: Cfg = CfgBuilder::new()
            .add_edge(NodeId::Entry, NodeId::Exit, EdgeKind::FallThrough)
            .add_edge(NodeId::Entry, NodeId::Exit, EdgeKind::FallThrough)
            .build();
    }

    #[test]
    fn preds_and_succs() {
        let cfg = straight_line();
        let s0 = NodeId::Stmt(StmtIndex::new(0));
        assert_eq!(cfg.preds_of(s0), &[NodeId::Entry]);
        assert_eq!(cfg.succs_of(s0).collect::<Vec<_>>(), vec![NodeId::Exit]);
    }
}
