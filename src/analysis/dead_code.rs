//! The dead-code detector: a CFG-constrained reachability walk combined
//! with a liveness-based dead-store rule.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::cfg::{Cfg, EdgeKind, NodeId};
use crate::evaluator::evaluate;
use crate::fact::{CPFact, SetFact};
use crate::ir::{LValue, StmtIndex, StmtKind, Var};

use super::fixed_point::DataflowResult;

/// Detects dead statements in `cfg`, given its constant-propagation and
/// live-variable results.
///
/// Live variables are consumed, not produced, by this crate (see §1's
/// out-of-scope list), so `liveness` is any [`DataflowResult`] over
/// [`SetFact<Var>`] the caller already computed — queried here the same way
/// spec's external interface describes, `out_fact(stmt).contains(var)`.
///
/// Returns the set of dead statement indices, ordered by index for
/// deterministic output independent of the walk's queue order.
#[must_use]
pub fn detect(
    cfg: &Cfg,
    constant_propagation: &DataflowResult<CPFact>,
    liveness: &DataflowResult<SetFact<Var>>,
) -> BTreeSet<StmtIndex> {
    let mut live: BTreeSet<NodeId> = BTreeSet::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    queue.push_back(cfg.entry());

    while let Some(cur) = queue.pop_front() {
        if !visited.insert(cur) {
            continue;
        }

        if cfg.is_exit(cur) {
            live.insert(cur);
            continue;
        }

        let Some(stmt) = cfg.stmt_of(cur) else {
            // The entry node: no statement, always live, flows to its
            // single successor.
            live.insert(cur);
            enqueue_all_successors(cfg, cur, &mut queue);
            continue;
        };

        match stmt.kind() {
            StmtKind::If(cond) => {
                live.insert(cur);
                let in_fact = constant_propagation.in_fact(cur);
                match evaluate(cond, in_fact).as_constant() {
                    Some(c) => {
                        let wanted = if c != 0 {
                            EdgeKind::IfTrue
                        } else {
                            EdgeKind::IfFalse
                        };
                        for edge in cfg.out_edges_of(cur) {
                            if edge.kind == wanted {
                                queue.push_back(edge.target);
                            }
                        }
                    }
                    None => enqueue_all_successors(cfg, cur, &mut queue),
                }
            }
            StmtKind::Switch(var) => {
                live.insert(cur);
                let in_fact = constant_propagation.in_fact(cur);
                match in_fact.get(var).as_constant() {
                    Some(c) => {
                        let matching: Vec<NodeId> = cfg
                            .out_edges_of(cur)
                            .filter(|edge| edge.kind == EdgeKind::SwitchCase(c))
                            .map(|edge| edge.target)
                            .collect();
                        if matching.is_empty() {
                            for edge in cfg.out_edges_of(cur) {
                                if edge.kind == EdgeKind::SwitchDefault {
                                    queue.push_back(edge.target);
                                }
                            }
                        } else {
                            for target in matching {
                                queue.push_back(target);
                            }
                        }
                    }
                    None => enqueue_all_successors(cfg, cur, &mut queue),
                }
            }
            StmtKind::Assign(lvalue, rvalue) => {
                let dead_store = !rvalue.has_side_effect()
                    && matches!(lvalue, LValue::Var(var) if !liveness.out_fact(cur).contains(var));
                if !dead_store {
                    live.insert(cur);
                }
                enqueue_all_successors(cfg, cur, &mut queue);
            }
            StmtKind::Other => {
                live.insert(cur);
                enqueue_all_successors(cfg, cur, &mut queue);
            }
        }
    }

    cfg.stmts()
        .map(crate::ir::Stmt::index)
        .filter(|index| !live.contains(&NodeId::Stmt(*index)))
        .collect()
}

fn enqueue_all_successors(cfg: &Cfg, node: NodeId, queue: &mut VecDeque<NodeId>) {
    for succ in cfg.succs_of(node) {
        queue.push_back(succ);
    }
}
