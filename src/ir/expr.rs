//! The closed family of pure and side-effectful IR expressions.

use derive_more::Display;

use super::var::Var;

/// An operand of a binary expression: either a variable or an immediate
/// constant. Three-address code folds nested expressions into temporaries,
/// but still allows an immediate literal on either side of a binary op
/// (`x = y + 2`), so both shapes are modelled here rather than forcing every
/// operand through a variable.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Operand {
    /// A reference to a variable.
    #[display("{_0}")]
    Var(Var),
    /// An immediate 32-bit integer constant.
    #[display("{_0}")]
    Const(i32),
}

impl From<Var> for Operand {
    fn from(value: Var) -> Self {
        Self::Var(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Const(value)
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArithOp {
    /// `+`
    #[display("+")]
    Add,
    /// `-`
    #[display("-")]
    Sub,
    /// `*`
    #[display("*")]
    Mul,
    /// `/`, signed.
    #[display("/")]
    Div,
    /// `%`, signed.
    #[display("%")]
    Rem,
}

/// Relational operators. Each evaluates to `1` (true) or `0` (false).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CondOp {
    /// `==`
    #[display("==")]
    Eq,
    /// `!=`
    #[display("!=")]
    Ne,
    /// `<`
    #[display("<")]
    Lt,
    /// `>`
    #[display(">")]
    Gt,
    /// `<=`
    #[display("<=")]
    Le,
    /// `>=`
    #[display(">=")]
    Ge,
}

/// Shift operators. The shift amount is masked to its low 5 bits before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ShiftOp {
    /// `<<`
    #[display("<<")]
    Shl,
    /// `>>`, arithmetic (sign-extending).
    #[display(">>")]
    Shr,
    /// `>>>`, logical (zero-extending).
    #[display(">>>")]
    UShr,
}

/// Bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BitwiseOp {
    /// `|`
    #[display("|")]
    Or,
    /// `&`
    #[display("&")]
    And,
    /// `^`
    #[display("^")]
    Xor,
}

/// A pure or side-effectful IR expression.
///
/// This is a closed family: the evaluator (§4.3 of the design) dispatches on
/// every variant and the catch-all case only ever applies to the
/// side-effectful shapes at the bottom (`New`, `Cast`, `FieldAccess`,
/// `ArrayAccess`), which are intentionally opaque to constant folding.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Expr {
    /// A bare variable reference.
    #[display("{_0}")]
    Var(Var),
    /// An integer literal.
    #[display("{_0}")]
    IntLiteral(i32),
    /// `a <op> b` for an [`ArithOp`].
    #[display("{_1} {_0} {_2}")]
    Arithmetic(ArithOp, Operand, Operand),
    /// `a <op> b` for a [`CondOp`].
    #[display("{_1} {_0} {_2}")]
    Condition(CondOp, Operand, Operand),
    /// `a <op> b` for a [`ShiftOp`].
    #[display("{_1} {_0} {_2}")]
    Shift(ShiftOp, Operand, Operand),
    /// `a <op> b` for a [`BitwiseOp`].
    #[display("{_1} {_0} {_2}")]
    Bitwise(BitwiseOp, Operand, Operand),
    /// `new ClassName(..)`. Side-effectful: it mutates the heap.
    #[display("new {_0}")]
    New(Box<str>),
    /// A cast to the given type. Side-effectful: it may trap at runtime.
    #[display("({_1}) {_0}")]
    Cast(Operand, Box<str>),
    /// A field read, optionally through an instance (`None` for a static
    /// field). Side-effectful: class initialisation or a null dereference.
    #[display("{}.{field}", base.as_ref().map_or_else(|| "<static>".to_string(), ToString::to_string))]
    FieldAccess {
        /// The instance the field is read through, or `None` for statics.
        base: Option<Operand>,
        /// The field name.
        field: Box<str>,
    },
    /// An array element read. Side-effectful: null/bounds faults.
    #[display("{array}[{index}]")]
    ArrayAccess {
        /// The array reference.
        array: Operand,
        /// The index expression.
        index: Operand,
    },
}

impl Expr {
    /// Whether evaluating this expression may have an observable side
    /// effect, per the classification in §4.6 of the design.
    ///
    /// `DIV`/`REM` are side-effectful because a zero divisor traps at
    /// runtime; every other arithmetic, condition, shift, and bitwise
    /// expression is pure.
    #[must_use]
    pub const fn has_side_effect(&self) -> bool {
        matches!(
            self,
            Self::New(_) | Self::Cast(..) | Self::FieldAccess { .. } | Self::ArrayAccess { .. }
        ) || matches!(self, Self::Arithmetic(ArithOp::Div | ArithOp::Rem, ..))
    }

    /// The variables this expression reads, in left-to-right order.
    ///
    /// Part of the data model's "a set of used rvalues" requirement (§3):
    /// an `Operand::Const` contributes nothing, and `New` has no operand at
    /// all, so only the variable-carrying shapes yield anything.
    #[must_use]
    pub fn used_vars(&self) -> Vec<&Var> {
        fn operand_var(operand: &Operand) -> Option<&Var> {
            match operand {
                Operand::Var(var) => Some(var),
                Operand::Const(_) => None,
            }
        }

        match self {
            Self::Var(var) => vec![var],
            Self::IntLiteral(_) | Self::New(_) => vec![],
            Self::Arithmetic(_, a, b)
            | Self::Condition(_, a, b)
            | Self::Shift(_, a, b)
            | Self::Bitwise(_, a, b) => [a, b].into_iter().filter_map(operand_var).collect(),
            Self::Cast(operand, _) => operand_var(operand).into_iter().collect(),
            Self::FieldAccess { base, .. } => {
                base.as_ref().and_then(operand_var).into_iter().collect()
            }
            Self::ArrayAccess { array, index } => {
                [array, index].into_iter().filter_map(operand_var).collect()
            }
        }
    }
}
