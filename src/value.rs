//! The abstract integer domain used by constant propagation.

use derive_more::Display;

/// An abstract integer value: the three-element constant-propagation
/// lattice.
///
/// ```text
///          NAC
///         /   \
///   ... CONST(c) ...
///         \   /
///         UNDEF
/// ```
///
/// `UNDEF` is bottom ("nothing known yet"), `NAC` is top ("not a constant" —
/// too many possibilities), and every `CONST(c)` sits strictly between them,
/// incomparable to every other `CONST(c')`. The lattice has height 3 on any
/// single variable, which is what guarantees the solver terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Value {
    /// Bottom: no information yet.
    #[display("UNDEF")]
    Undef,
    /// A known constant 32-bit integer.
    #[display("{_0}")]
    Const(i32),
    /// Top: not a constant.
    #[display("NAC")]
    Nac,
}

impl Default for Value {
    /// The default value is `UNDEF`, matching the convention that an absent
    /// [`CPFact`](crate::fact::CPFact) binding means `UNDEF`.
    fn default() -> Self {
        Self::Undef
    }
}

impl Value {
    /// Constructs the bottom value.
    #[must_use]
    pub const fn undef() -> Self {
        Self::Undef
    }

    /// Constructs the top value.
    #[must_use]
    pub const fn nac() -> Self {
        Self::Nac
    }

    /// Constructs a known constant.
    #[must_use]
    pub const fn constant(c: i32) -> Self {
        Self::Const(c)
    }

    /// Whether this is the bottom value.
    #[must_use]
    pub const fn is_undef(self) -> bool {
        matches!(self, Self::Undef)
    }

    /// Whether this is the top value.
    #[must_use]
    pub const fn is_nac(self) -> bool {
        matches!(self, Self::Nac)
    }

    /// Whether this is a known constant.
    #[must_use]
    pub const fn is_constant(self) -> bool {
        matches!(self, Self::Const(_))
    }

    /// The constant this value holds, if [`is_constant`](Self::is_constant).
    #[must_use]
    pub const fn as_constant(self) -> Option<i32> {
        match self {
            Self::Const(c) => Some(c),
            _ => None,
        }
    }

    /// The meet (greatest lower bound) of two values.
    ///
    /// - `NAC` meet anything is `NAC` (top is absorbing).
    /// - `UNDEF` meet `x` is `x` (bottom is the identity).
    /// - Two equal constants meet to themselves; two different constants
    ///   meet to `NAC` (the lattice has no room between distinct constants).
    #[must_use]
    pub const fn meet(self, other: Self) -> Self {
        match (self, other) {
            (Self::Nac, _) | (_, Self::Nac) => Self::Nac,
            (Self::Undef, x) | (x, Self::Undef) => x,
            (Self::Const(a), Self::Const(b)) if a == b => Self::Const(a),
            (Self::Const(_), Self::Const(_)) => Self::Nac,
        }
    }

    /// The lattice order `self ⊑ other`, defined via meet (`a ⊑ b` iff
    /// `meet(a, b) == a`). Used by monotonicity tests; not needed by the
    /// solver itself, which only ever calls `meet`.
    #[must_use]
    pub fn leq(self, other: Self) -> bool {
        self.meet(other) == self
    }
}
