//! The generic monotone dataflow framework: a forward/backward worklist
//! solver parametric over the fact type.
//!
//! This supersedes the reference crate's `analysis::fixed_point` module,
//! which models a dataflow problem as "seeds + a flow function to
//! successors" (IFDS-flavoured). The contract implemented here instead
//! mirrors classic in/out gen-kill frameworks: each node has a stored `in`
//! and `out` fact, and the analysis supplies `meet_into`/`transfer_node`
//! rather than a per-location `flow` closure. Termination follows the same
//! argument the reference crate documents for its own solver: facts only
//! rise in a finite-height lattice, so a fixed point is reached in bounded
//! iterations.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::cfg::{Cfg, NodeId};
use crate::error::CoreError;
use crate::ir::Stmt;

/// The capability set a concrete analysis must provide to be driven by
/// [`solve`].
pub trait DataflowAnalysis {
    /// The fact type this analysis computes, e.g.
    /// [`CPFact`](crate::fact::CPFact) for constant propagation.
    type Fact: Clone + PartialEq;

    /// `true` for a forward analysis, `false` for a backward one.
    fn is_forward(&self) -> bool;

    /// The fact seeded at the entry (forward) or exit (backward) node.
    fn new_boundary_fact(&self, cfg: &Cfg) -> Self::Fact;

    /// The fact every other node starts with before the solver runs.
    fn new_initial_fact(&self) -> Self::Fact;

    /// Merges `src` into `dst` in place (the lattice meet, applied
    /// pointwise across whatever `Self::Fact` represents).
    fn meet_into(&self, src: &Self::Fact, dst: &mut Self::Fact);

    /// The transfer function for one statement.
    ///
    /// For a forward analysis, `in_fact` is the fact flowing into `stmt` and
    /// `out_fact` is overwritten with the fact flowing out. For a backward
    /// analysis the roles are swapped by the solver: `in_fact` receives what
    /// a forward reading would call the node's `out`, and `out_fact` is
    /// overwritten with what a forward reading would call its `in`. This
    /// lets a backward analysis such as liveness be written with the same
    /// signature, reasoning from uses-before-defs instead.
    ///
    /// Returns whether `out_fact` changed. This must be a genuine
    /// content-equality comparison against the fact's prior value — the
    /// source this crate is grounded on has a latent bug here, comparing two
    /// freshly allocated fact objects by identity (always `true`) instead of
    /// by value; this framework compares by value.
    fn transfer_node(&self, stmt: &Stmt, in_fact: &Self::Fact, out_fact: &mut Self::Fact) -> bool;
}

/// The `in`/`out` facts computed for every node of a CFG.
///
/// Constructed and mutated only by [`solve`]; handed to consumers (such as
/// the dead-code detector) read-only afterwards.
#[derive(Debug, Clone)]
pub struct DataflowResult<F> {
    in_facts: BTreeMap<NodeId, F>,
    out_facts: BTreeMap<NodeId, F>,
}

impl<F> DataflowResult<F> {
    /// The fact flowing into `node`.
    ///
    /// # Panics
    /// Panics if `node` is not part of the CFG this result was computed
    /// over.
    #[must_use]
    pub fn in_fact(&self, node: NodeId) -> &F {
        self.in_facts
            .get(&node)
            .expect("node is not part of this dataflow result")
    }

    /// The fact flowing out of `node`.
    ///
    /// # Panics
    /// Panics if `node` is not part of the CFG this result was computed
    /// over.
    #[must_use]
    pub fn out_fact(&self, node: NodeId) -> &F {
        self.out_facts
            .get(&node)
            .expect("node is not part of this dataflow result")
    }
}

/// Runs the worklist algorithm to a fixed point.
///
/// # Errors
/// Returns [`CoreError::NoEntry`] / [`CoreError::NoExit`] if `cfg` fails
/// [`Cfg::validate`].
///
/// # Worklist order
/// The solver seeds the worklist with every node, including the synthetic
/// entry/exit — a superset of "every non-entry node", which is harmless
/// since the boundary node has no predecessors to merge and reaches its own
/// fixed point on the first visit. Any queue discipline that re-examines a
/// node whenever an upstream fact it depends on changes is correct; this
/// solver uses a plain FIFO queue with re-enqueue deduplication.
pub fn solve<A: DataflowAnalysis>(
    cfg: &Cfg,
    analysis: &A,
) -> Result<DataflowResult<A::Fact>, CoreError> {
    cfg.validate()?;
    let forward = analysis.is_forward();

    let mut in_facts: BTreeMap<NodeId, A::Fact> = BTreeMap::new();
    let mut out_facts: BTreeMap<NodeId, A::Fact> = BTreeMap::new();
    for node in cfg.nodes() {
        in_facts.insert(node, analysis.new_initial_fact());
        out_facts.insert(node, analysis.new_initial_fact());
    }
    if forward {
        in_facts.insert(cfg.entry(), analysis.new_boundary_fact(cfg));
    } else {
        out_facts.insert(cfg.exit(), analysis.new_boundary_fact(cfg));
    }

    let mut queued: HashSet<NodeId> = cfg.nodes().collect();
    let mut worklist: VecDeque<NodeId> = cfg.nodes().collect();

    while let Some(node) = worklist.pop_front() {
        queued.remove(&node);

        if forward {
            for &pred in cfg.preds_of(node) {
                let src = out_facts[&pred].clone();
                analysis.meet_into(&src, in_facts.get_mut(&node).unwrap());
            }
        } else {
            for succ in cfg.succs_of(node).collect::<Vec<_>>() {
                let src = in_facts[&succ].clone();
                analysis.meet_into(&src, out_facts.get_mut(&node).unwrap());
            }
        }

        let changed = match cfg.stmt_of(node) {
            Some(stmt) if forward => {
                let mut out = out_facts[&node].clone();
                let changed = analysis.transfer_node(stmt, &in_facts[&node], &mut out);
                out_facts.insert(node, out);
                changed
            }
            Some(stmt) => {
                let mut inf = in_facts[&node].clone();
                let changed = analysis.transfer_node(stmt, &out_facts[&node], &mut inf);
                in_facts.insert(node, inf);
                changed
            }
            // The synthetic entry/exit nodes carry no statement: their
            // transfer is the identity.
            None if forward => {
                let in_fact = in_facts[&node].clone();
                let changed = out_facts[&node] != in_fact;
                out_facts.insert(node, in_fact);
                changed
            }
            None => {
                let out_fact = out_facts[&node].clone();
                let changed = in_facts[&node] != out_fact;
                in_facts.insert(node, out_fact);
                changed
            }
        };

        if changed {
            let successors: Vec<NodeId> = if forward {
                cfg.succs_of(node).collect()
            } else {
                cfg.preds_of(node).to_vec()
            };
            for next in successors {
                if queued.insert(next) {
                    worklist.push_back(next);
                }
            }
        }
    }

    Ok(DataflowResult {
        in_facts,
        out_facts,
    })
}
