//! The three-address IR this crate analyzes: statements, expressions, and
//! variables.

pub mod expr;
pub mod stmt;
pub mod var;

pub use expr::{ArithOp, BitwiseOp, CondOp, Expr, Operand, ShiftOp};
pub use stmt::{IndexedNode, LValue, Stmt, StmtIndex, StmtKind};
pub use var::{Var, VarType};

use crate::error::CoreError;
use crate::result_store::{AnalysisId, AnalysisStore};

/// The IR of a single method, as handed to the core by the enclosing
/// analysis harness.
///
/// Construction of an [`Ir`] (parsing, desugaring, SSA or non-SSA form, ...)
/// is out of scope for this crate — see §1 of the design's "Out of scope"
/// list — this trait only describes the read surface the core needs.
pub trait Ir {
    /// All statements of the method, ordered by [`StmtIndex`].
    fn stmts(&self) -> &[Stmt];

    /// The method's formal parameters, in declaration order.
    fn params(&self) -> &[Var];

    /// The store of analysis results this IR's owner has stashed so far
    /// (e.g. constant propagation's `DataflowResult`, stored before the
    /// dead-code detector runs over it), keyed by [`AnalysisId`].
    fn analysis_results(&self) -> &AnalysisStore;

    /// Looks up a statement by its index.
    #[must_use]
    fn stmt_at(&self, index: StmtIndex) -> Option<&Stmt> {
        self.stmts()
            .binary_search_by_key(&index, Stmt::index)
            .ok()
            .map(|pos| &self.stmts()[pos])
    }

    /// A keyed retrieval of a previously stored analysis result, per spec.md
    /// §6's `IR::getResult(analysisId)`.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingResult`] if nothing was stored under `id`.
    fn result<T: 'static>(&self, id: AnalysisId) -> Result<&T, CoreError> {
        self.analysis_results().get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixtureIr {
        stmts: Vec<Stmt>,
        params: Vec<Var>,
        results: AnalysisStore,
    }

    impl Ir for FixtureIr {
        fn stmts(&self) -> &[Stmt] {
            &self.stmts
        }

        fn params(&self) -> &[Var] {
            &self.params
        }

        fn analysis_results(&self) -> &AnalysisStore {
            &self.results
        }
    }

    #[test]
    fn stmt_at_looks_up_by_index() {
        let ir = FixtureIr {
            stmts: vec![
                Stmt::new(StmtIndex::new(0), StmtKind::Other),
                Stmt::new(StmtIndex::new(1), StmtKind::Other),
            ],
            params: vec![],
            results: AnalysisStore::new(),
        };
        assert_eq!(ir.stmt_at(StmtIndex::new(1)).map(Stmt::index), Some(StmtIndex::new(1)));
        assert_eq!(ir.stmt_at(StmtIndex::new(5)), None);
    }

    #[test]
    fn result_reads_through_to_the_analysis_store() {
        let mut results = AnalysisStore::new();
        results.insert(AnalysisId::DeadCode, vec![StmtIndex::new(3)]);
        let ir = FixtureIr {
            stmts: vec![],
            params: vec![],
            results,
        };
        assert_eq!(
            ir.result::<Vec<StmtIndex>>(AnalysisId::DeadCode),
            Ok(&vec![StmtIndex::new(3)])
        );
        assert_eq!(
            ir.result::<Vec<StmtIndex>>(AnalysisId::ConstProp),
            Err(CoreError::MissingResult(AnalysisId::ConstProp))
        );
    }
}
