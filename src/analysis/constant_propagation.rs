//! The constant-propagation analysis: a forward [`DataflowAnalysis`] over
//! [`CPFact`].

use crate::cfg::Cfg;
use crate::config::AnalysisConfig;
use crate::evaluator::evaluate;
use crate::fact::CPFact;
use crate::ir::{LValue, Stmt, StmtKind, Var};
use crate::value::Value;

use super::fixed_point::DataflowAnalysis;

/// Propagates constant integer values forward through a CFG.
///
/// The boundary fact binds every integer-typed parameter to `NAC` — a
/// parameter's actual value is unknown to an intraprocedural analysis, which
/// is the conservative top of the lattice, not the bottom. Every other node
/// starts at the all-`UNDEF` fact (the empty [`CPFact`]).
#[derive(Debug, Clone)]
pub struct ConstantPropagation {
    params: Vec<Var>,
    config: AnalysisConfig,
}

impl ConstantPropagation {
    /// Creates the analysis for a method with the given formal parameters.
    ///
    /// `config` is threaded straight through from the enclosing harness (per
    /// spec.md §6) and otherwise unread here — this analysis has no knobs of
    /// its own, but the constructor still accepts it so a harness can pass
    /// the one opaque config it has to every analysis uniformly.
    #[must_use]
    pub fn new(params: Vec<Var>, config: AnalysisConfig) -> Self {
        Self { params, config }
    }

    /// The configuration this analysis was constructed with.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

impl DataflowAnalysis for ConstantPropagation {
    type Fact = CPFact;

    fn is_forward(&self) -> bool {
        true
    }

    fn new_boundary_fact(&self, _cfg: &Cfg) -> Self::Fact {
        let mut fact = CPFact::new();
        for param in &self.params {
            if param.is_int_like() {
                fact.update(param.clone(), Value::nac());
            }
        }
        fact
    }

    fn new_initial_fact(&self) -> Self::Fact {
        CPFact::new()
    }

    fn meet_into(&self, src: &Self::Fact, dst: &mut Self::Fact) {
        CPFact::meet_into(src, dst);
    }

    /// `out <- in`, then for an `Assign(Var(v), rvalue)` where `v` is
    /// integer-typed, `out[v] <- evaluate(rvalue, in)`. Every other
    /// statement kind (conditionals, switches, non-variable lvalues,
    /// unclassified statements) is the identity transfer: it reads facts
    /// but never narrows one.
    fn transfer_node(&self, stmt: &Stmt, in_fact: &Self::Fact, out_fact: &mut Self::Fact) -> bool {
        let mut new_out = in_fact.copy();
        if let StmtKind::Assign(LValue::Var(var), rvalue) = stmt.kind() {
            if var.is_int_like() {
                let value = evaluate(rvalue, in_fact);
                new_out.update(var.clone(), value);
            }
        }
        let changed = *out_fact != new_out;
        *out_fact = new_out;
        changed
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::cfg::{CfgBuilder, EdgeKind, NodeId};
    use crate::ir::{ArithOp, CondOp, Expr, StmtIndex};

    /// `x = 1; y = x + 1;` — both constants should propagate to `NAC`-free
    /// facts at exit.
    #[test]
    fn propagates_constants_through_straight_line_code() {
        let s0 = Stmt::new(
            StmtIndex::new(0),
            StmtKind::Assign(LValue::Var(Var::int("x")), Expr::IntLiteral(1)),
        );
        let s1 = Stmt::new(
            StmtIndex::new(1),
            StmtKind::Assign(
                LValue::Var(Var::int("y")),
                Expr::Arithmetic(ArithOp::Add, Var::int("x").into(), 1.into()),
            ),
        );
        let cfg = CfgBuilder::new()
            .add_stmt(s0.clone())
            .add_stmt(s1.clone())
            .add_edge(NodeId::Entry, NodeId::Stmt(s0.index()), EdgeKind::FallThrough)
            .add_edge(
                NodeId::Stmt(s0.index()),
                NodeId::Stmt(s1.index()),
                EdgeKind::FallThrough,
            )
            .add_edge(NodeId::Stmt(s1.index()), NodeId::Exit, EdgeKind::FallThrough)
            .build();

        let analysis = ConstantPropagation::new(vec![], AnalysisConfig::new());
        let result = super::super::fixed_point::solve(&cfg, &analysis).unwrap();
        let exit_in = result.in_fact(NodeId::Exit);
        assert_eq!(exit_in.get(&Var::int("x")), Value::constant(1));
        assert_eq!(exit_in.get(&Var::int("y")), Value::constant(2));
    }

    /// A parameter is seeded to `NAC`, not `UNDEF`.
    #[test]
    fn integer_parameters_are_seeded_nac() {
        let cfg = CfgBuilder::new()
            .add_edge(NodeId::Entry, NodeId::Exit, EdgeKind::FallThrough)
            .build();
        let analysis = ConstantPropagation::new(vec![Var::int("p")], AnalysisConfig::new());
        let result = super::super::fixed_point::solve(&cfg, &analysis).unwrap();
        assert_eq!(result.in_fact(NodeId::Entry).get(&Var::int("p")), Value::nac());
    }

    /// Merging two branches that assign different constants to the same
    /// variable yields `NAC` at the join point.
    #[test]
    fn conflicting_branches_join_to_nac() {
        let s0 = Stmt::new(
            StmtIndex::new(0),
            StmtKind::If(Expr::Condition(CondOp::Eq, Var::int("c").into(), 0.into())),
        );
        let s1 = Stmt::new(
            StmtIndex::new(1),
            StmtKind::Assign(LValue::Var(Var::int("x")), Expr::IntLiteral(1)),
        );
        let s2 = Stmt::new(
            StmtIndex::new(2),
            StmtKind::Assign(LValue::Var(Var::int("x")), Expr::IntLiteral(2)),
        );
        let cfg = CfgBuilder::new()
            .add_stmt(s0.clone())
            .add_stmt(s1.clone())
            .add_stmt(s2.clone())
            .add_edge(NodeId::Entry, NodeId::Stmt(s0.index()), EdgeKind::FallThrough)
            .add_edge(NodeId::Stmt(s0.index()), NodeId::Stmt(s1.index()), EdgeKind::IfTrue)
            .add_edge(NodeId::Stmt(s0.index()), NodeId::Stmt(s2.index()), EdgeKind::IfFalse)
            .add_edge(NodeId::Stmt(s1.index()), NodeId::Exit, EdgeKind::FallThrough)
            .add_edge(NodeId::Stmt(s2.index()), NodeId::Exit, EdgeKind::FallThrough)
            .build();

        let analysis = ConstantPropagation::new(vec![], AnalysisConfig::new());
        let result = super::super::fixed_point::solve(&cfg, &analysis).unwrap();
        assert_eq!(result.in_fact(NodeId::Exit).get(&Var::int("x")), Value::nac());
    }

    /// Monotonicity of the transfer function: if `in1 ⊑ in2` pointwise, then
    /// `transfer(in1) ⊑ transfer(in2)` pointwise (§8 of the design). Builds
    /// an `in1` that is the meet of two arbitrary facts and an `in2` that is
    /// one of the two operands, which is always `in1 ⊑ in2` by construction
    /// (a meet is a lower bound of both its operands).
    #[test]
    fn transfer_is_monotonic() {
        proptest!(|(a in any::<Value>(), b in any::<Value>(), c in any::<Value>(), d in any::<Value>())| {
            let mut in1 = CPFact::new();
            in1.update(Var::int("x"), a.meet(b));
            in1.update(Var::int("y"), c.meet(d));

            let mut in2 = CPFact::new();
            in2.update(Var::int("x"), a);
            in2.update(Var::int("y"), c);

            let stmt = Stmt::new(
                StmtIndex::new(0),
                StmtKind::Assign(
                    LValue::Var(Var::int("z")),
                    Expr::Arithmetic(ArithOp::Add, Var::int("x").into(), Var::int("y").into()),
                ),
            );
            let analysis = ConstantPropagation::new(vec![], AnalysisConfig::new());
            let mut out1 = CPFact::new();
            let mut out2 = CPFact::new();
            analysis.transfer_node(&stmt, &in1, &mut out1);
            analysis.transfer_node(&stmt, &in2, &mut out2);

            prop_assert!(out1.get(&Var::int("z")).leq(out2.get(&Var::int("z"))));
        });
    }

    /// A non-integer lvalue is never tracked, even when its rvalue would
    /// otherwise fold.
    #[test]
    fn non_integer_lvalue_is_untracked() {
        let s0 = Stmt::new(
            StmtIndex::new(0),
            StmtKind::Assign(LValue::Other, Expr::IntLiteral(1)),
        );
        let cfg = CfgBuilder::new()
            .add_stmt(s0.clone())
            .add_edge(NodeId::Entry, NodeId::Stmt(s0.index()), EdgeKind::FallThrough)
            .add_edge(NodeId::Stmt(s0.index()), NodeId::Exit, EdgeKind::FallThrough)
            .build();
        let analysis = ConstantPropagation::new(vec![], AnalysisConfig::new());
        let result = super::super::fixed_point::solve(&cfg, &analysis).unwrap();
        assert_eq!(result.out_fact(NodeId::Stmt(s0.index())).iter().count(), 0);
    }
}
