//! Statements: the nodes of the control flow graph.

use derive_more::{Display, From, Into};

use super::expr::Expr;
use super::var::Var;

/// A statement's position in program order.
///
/// Mirrors the reference crate's `ProgramCounter`: a `Copy` newtype over an
/// integer rather than a bare `usize`, so statement identity can't be
/// accidentally confused with an unrelated index, and so it orders and
/// displays consistently everywhere it's used as a map key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Default,
)]
#[display("#{_0}")]
pub struct StmtIndex(u32);

impl StmtIndex {
    /// Creates a statement index from a raw, zero-based position.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw, zero-based position.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// The assignment target of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LValue {
    /// A local variable or parameter.
    #[display("{_0}")]
    Var(Var),
    /// Any other assignment target (a field or array element), which this
    /// crate never tracks as a constant-propagation fact.
    #[display("<non-var lvalue>")]
    Other,
}

/// The kind of a statement, forming the closed family described in §3 of the
/// design: conditionals, switches, definitions, and unclassified statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    /// `if (cond) ...`. Branches on [`ControlTransfer`](crate::cfg::EdgeKind)
    /// edges out of the owning node.
    If(Expr),
    /// `switch (var) { .. }`. Case targets live on the owning node's
    /// out-edges, not on the statement itself.
    Switch(Var),
    /// `lvalue = rvalue`. Covers both a literal `AssignStmt` and any other
    /// `DefinitionStmt` whose right-hand side happens not to be foldable
    /// (e.g. a call result) — the evaluator's catch-all already folds such
    /// shapes to `NAC`, so one variant suffices for both.
    Assign(LValue, Expr),
    /// Any statement that neither branches nor defines a value (e.g. a
    /// `return`, a lock operation, a bare side-effecting call).
    Other,
}

/// A CFG node payload that can report its own position in program order.
///
/// [`Cfg`](crate::cfg::Cfg) is generic over this so that a consumer with a
/// richer node payload than a bare [`Stmt`] can reuse the same CFG
/// representation, mirroring the reference crate's `ControlFlowGraph<N, E>`
/// being generic over its node data `N` while still keying everything by a
/// single stable position.
pub trait IndexedNode {
    /// This node's stable position in program order.
    fn stmt_index(&self) -> StmtIndex;
}

impl IndexedNode for Stmt {
    fn stmt_index(&self) -> StmtIndex {
        self.index()
    }
}

/// A single IR statement: a stable index plus its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    index: StmtIndex,
    kind: StmtKind,
}

impl Stmt {
    /// Creates a new statement at the given index.
    #[must_use]
    pub const fn new(index: StmtIndex, kind: StmtKind) -> Self {
        Self { index, kind }
    }

    /// The statement's stable index.
    #[must_use]
    pub const fn index(&self) -> StmtIndex {
        self.index
    }

    /// The statement's kind.
    #[must_use]
    pub const fn kind(&self) -> &StmtKind {
        &self.kind
    }

    /// The lvalue this statement defines, if any.
    #[must_use]
    pub const fn defined_lvalue(&self) -> Option<&LValue> {
        match &self.kind {
            StmtKind::Assign(lvalue, _) => Some(lvalue),
            _ => None,
        }
    }

    /// The variables this statement reads: an `If`'s condition, a `Switch`'s
    /// scrutinee, or an `Assign`'s rvalue. `Other` statements expose nothing
    /// the core can see into.
    #[must_use]
    pub fn used_vars(&self) -> Vec<&Var> {
        match &self.kind {
            StmtKind::If(cond) => cond.used_vars(),
            StmtKind::Switch(var) => vec![var],
            StmtKind::Assign(_, rvalue) => rvalue.used_vars(),
            StmtKind::Other => vec![],
        }
    }
}
