//! Dataflow facts: the per-program-point state the solver propagates.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::ir::Var;
use crate::value::Value;

/// A mapping from [`Var`] to [`Value`], with an absent key read as `UNDEF`.
///
/// This is the fact type of the constant-propagation analysis. Ownership is
/// one slot of a [`DataflowResult`](crate::analysis::DataflowResult) per the
/// data model: each `CPFact` belongs to exactly one node's `in` or `out`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CPFact {
    bindings: BTreeMap<Var, Value>,
}

impl CPFact {
    /// An empty fact (every variable implicitly `UNDEF`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the value bound to `var`, or `UNDEF` if unbound.
    #[must_use]
    pub fn get(&self, var: &Var) -> Value {
        self.bindings.get(var).copied().unwrap_or_default()
    }

    /// Binds `var` to `value`. Binding to `UNDEF` removes the key instead of
    /// storing it explicitly, preserving the invariant that every stored
    /// binding is informative (so that structural equality and iteration
    /// agree with the "absent means UNDEF" convention).
    pub fn update(&mut self, var: Var, value: Value) {
        if value.is_undef() {
            self.bindings.remove(&var);
        } else {
            self.bindings.insert(var, value);
        }
    }

    /// A deep copy of this fact, for use as the seed of a freshly computed
    /// `out` fact (`newOut <- in.copy()` in the transfer contract).
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Iterates over the explicitly bound variables, in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&Var, &Value)> {
        self.bindings.iter()
    }

    /// Merges `src` into `dst` in place: for every key bound in `src`,
    /// `dst[k] <- meet(src[k], dst[k])`. Keys present only in `dst` are left
    /// untouched, since an unbound `src` key is `UNDEF`, the identity element
    /// of meet.
    pub fn meet_into(src: &Self, dst: &mut Self) {
        for (var, value) in &src.bindings {
            let merged = value.meet(dst.get(var));
            dst.update(var.clone(), merged);
        }
    }
}

/// A set fact, used for results this crate only reads by membership (live
/// variables, supplied externally).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetFact<T: Ord> {
    members: BTreeSet<T>,
}

impl<T: Ord> SetFact<T> {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: BTreeSet::new(),
        }
    }

    /// Whether `value` is a member of this set.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    /// Iterates over the set's members, in sorted order. Needed by a real
    /// liveness `meet_into` (set union at a merge point) and transfer
    /// (gen/kill over the current live set).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.members.iter()
    }
}

impl<T: Ord> FromIterator<T> for SetFact<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord> From<BTreeSet<T>> for SetFact<T> {
    fn from(members: BTreeSet<T>) -> Self {
        Self { members }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Var;

    #[test]
    fn absent_key_is_undef() {
        let fact = CPFact::new();
        assert_eq!(fact.get(&Var::int("x")), Value::undef());
    }

    #[test]
    fn update_to_undef_removes_binding() {
        let mut fact = CPFact::new();
        fact.update(Var::int("x"), Value::constant(1));
        assert_eq!(fact.iter().count(), 1);
        fact.update(Var::int("x"), Value::undef());
        assert_eq!(fact.iter().count(), 0);
        assert_eq!(fact.get(&Var::int("x")), Value::undef());
    }

    #[test]
    fn meet_into_merges_only_src_keys() {
        let mut dst = CPFact::new();
        dst.update(Var::int("x"), Value::constant(1));
        dst.update(Var::int("y"), Value::constant(2));

        let mut src = CPFact::new();
        src.update(Var::int("x"), Value::constant(1));
        // `z` absent from src is UNDEF, identity under meet.

        CPFact::meet_into(&src, &mut dst);
        assert_eq!(dst.get(&Var::int("x")), Value::constant(1));
        assert_eq!(dst.get(&Var::int("y")), Value::constant(2));
    }

    #[test]
    fn meet_into_conflicting_constants_yields_nac() {
        let mut dst = CPFact::new();
        dst.update(Var::int("x"), Value::constant(1));

        let mut src = CPFact::new();
        src.update(Var::int("x"), Value::constant(2));

        CPFact::meet_into(&src, &mut dst);
        assert_eq!(dst.get(&Var::int("x")), Value::nac());
    }

    #[test]
    fn equality_ignores_explicit_vs_implicit_undef() {
        let a = CPFact::new();
        let mut b = CPFact::new();
        b.update(Var::int("x"), Value::constant(1));
        b.update(Var::int("x"), Value::undef());
        assert_eq!(a, b);
    }

    #[test]
    fn set_fact_membership() {
        let set: SetFact<Var> = [Var::int("x"), Var::int("y")].into_iter().collect();
        assert!(set.contains(&Var::int("x")));
        assert!(!set.contains(&Var::int("z")));
    }

    #[test]
    fn set_fact_iter_yields_members_sorted() {
        let set: SetFact<Var> = [Var::int("y"), Var::int("x")].into_iter().collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![&Var::int("x"), &Var::int("y")]
        );
    }
}
