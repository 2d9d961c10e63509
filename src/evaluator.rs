//! Abstract interpretation of IR expressions over a [`CPFact`].

use crate::fact::CPFact;
use crate::ir::{ArithOp, BitwiseOp, CondOp, Expr, Operand, ShiftOp};
use crate::value::Value;

fn operand_value(operand: &Operand, fact: &CPFact) -> Value {
    match operand {
        Operand::Var(var) => fact.get(var),
        Operand::Const(c) => Value::constant(*c),
    }
}

/// Evaluates an expression against a constant-propagation fact.
///
/// Follows the precedence spelled out in §4.3 of the design: the
/// division/remainder-by-zero rule is checked before the generic
/// NAC-propagation rule, so `x / 0` is `UNDEF` even when `x` is `NAC`.
/// Expression shapes outside the pure arithmetic/condition/shift/bitwise
/// families (`New`, `Cast`, field/array access) are conservatively `NAC`.
#[must_use]
pub fn evaluate(expr: &Expr, fact: &CPFact) -> Value {
    match expr {
        Expr::Var(var) => fact.get(var),
        Expr::IntLiteral(c) => Value::constant(*c),
        Expr::Arithmetic(op, a, b) => evaluate_arithmetic(*op, a, b, fact),
        Expr::Condition(op, a, b) => evaluate_binary(a, b, fact, |x, y| condition(*op, x, y)),
        Expr::Shift(op, a, b) => evaluate_binary(a, b, fact, |x, y| shift(*op, x, y)),
        Expr::Bitwise(op, a, b) => evaluate_binary(a, b, fact, |x, y| bitwise(*op, x, y)),
        Expr::New(_) | Expr::Cast(..) | Expr::FieldAccess { .. } | Expr::ArrayAccess { .. } => {
            Value::nac()
        }
    }
}

fn evaluate_arithmetic(op: ArithOp, a: &Operand, b: &Operand, fact: &CPFact) -> Value {
    let v1 = operand_value(a, fact);
    let v2 = operand_value(b, fact);

    // The div/rem-by-zero rule fires before NAC propagation, even if `v1` is
    // NAC — a runtime trap on division is certain regardless of the
    // dividend, so it is never masked by the dividend's own uncertainty.
    if matches!(op, ArithOp::Div | ArithOp::Rem) && v2 == Value::constant(0) {
        return Value::undef();
    }
    if v1.is_nac() || v2.is_nac() {
        return Value::nac();
    }
    if v1.is_undef() || v2.is_undef() {
        return Value::undef();
    }
    let (a, b) = (v1.as_constant().unwrap(), v2.as_constant().unwrap());
    let result = match op {
        ArithOp::Add => a.wrapping_add(b),
        ArithOp::Sub => a.wrapping_sub(b),
        ArithOp::Mul => a.wrapping_mul(b),
        // `b == 0` was already handled above.
        ArithOp::Div => a.wrapping_div(b),
        ArithOp::Rem => a.wrapping_rem(b),
    };
    Value::constant(result)
}

fn evaluate_binary(
    a: &Operand,
    b: &Operand,
    fact: &CPFact,
    compute: impl FnOnce(i32, i32) -> i32,
) -> Value {
    let v1 = operand_value(a, fact);
    let v2 = operand_value(b, fact);
    if v1.is_nac() || v2.is_nac() {
        return Value::nac();
    }
    if v1.is_undef() || v2.is_undef() {
        return Value::undef();
    }
    Value::constant(compute(
        v1.as_constant().unwrap(),
        v2.as_constant().unwrap(),
    ))
}

fn condition(op: CondOp, a: i32, b: i32) -> i32 {
    let result = match op {
        CondOp::Eq => a == b,
        CondOp::Ne => a != b,
        CondOp::Lt => a < b,
        CondOp::Gt => a > b,
        CondOp::Le => a <= b,
        CondOp::Ge => a >= b,
    };
    i32::from(result)
}

fn shift(op: ShiftOp, a: i32, b: i32) -> i32 {
    // The source language masks the shift amount to its low 5 bits.
    let amount = (b as u32) & 0x1f;
    match op {
        ShiftOp::Shl => ((a as u32) << amount) as i32,
        ShiftOp::Shr => a >> amount,
        ShiftOp::UShr => ((a as u32) >> amount) as i32,
    }
}

fn bitwise(op: BitwiseOp, a: i32, b: i32) -> i32 {
    match op {
        BitwiseOp::Or => a | b,
        BitwiseOp::And => a & b,
        BitwiseOp::Xor => a ^ b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Var;

    fn fact(bindings: &[(&str, Value)]) -> CPFact {
        let mut fact = CPFact::new();
        for (name, value) in bindings {
            fact.update(Var::int(*name), *value);
        }
        fact
    }

    #[test]
    fn div_by_zero_is_undef() {
        let fact = fact(&[("x", Value::constant(5)), ("y", Value::constant(0))]);
        let exp = Expr::Arithmetic(ArithOp::Div, Var::int("x").into(), Var::int("y").into());
        assert_eq!(evaluate(&exp, &fact), Value::undef());
    }

    #[test]
    fn rem_by_zero_beats_nac() {
        let fact = fact(&[("x", Value::nac()), ("y", Value::constant(0))]);
        let exp = Expr::Arithmetic(ArithOp::Rem, Var::int("x").into(), Var::int("y").into());
        assert_eq!(evaluate(&exp, &fact), Value::undef());
    }

    #[test]
    fn constant_folding() {
        let fact = fact(&[("x", Value::constant(3)), ("y", Value::constant(4))]);
        assert_eq!(
            evaluate(
                &Expr::Arithmetic(ArithOp::Add, Var::int("x").into(), Var::int("y").into()),
                &fact
            ),
            Value::constant(7)
        );
        assert_eq!(
            evaluate(
                &Expr::Condition(CondOp::Lt, Var::int("x").into(), Var::int("y").into()),
                &fact
            ),
            Value::constant(1)
        );
        assert_eq!(
            evaluate(
                &Expr::Bitwise(BitwiseOp::And, Var::int("x").into(), Var::int("y").into()),
                &fact
            ),
            Value::constant(0)
        );
    }

    #[test]
    fn undef_operand_propagates() {
        let fact = fact(&[("y", Value::constant(7))]);
        let exp = Expr::Arithmetic(ArithOp::Mul, Var::int("x").into(), Var::int("y").into());
        assert_eq!(evaluate(&exp, &fact), Value::undef());
    }

    #[test]
    fn unclassified_shapes_are_nac() {
        let fact = CPFact::new();
        assert_eq!(evaluate(&Expr::New("T".into()), &fact), Value::nac());
        assert_eq!(
            evaluate(&Expr::Cast(Var::int("x").into(), "T".into()), &fact),
            Value::nac()
        );
    }

    #[test]
    fn shift_amount_is_masked_to_5_bits() {
        let fact = fact(&[("x", Value::constant(1)), ("y", Value::constant(33))]);
        // 33 & 0x1f == 1
        let exp = Expr::Shift(ShiftOp::Shl, Var::int("x").into(), Var::int("y").into());
        assert_eq!(evaluate(&exp, &fact), Value::constant(2));
    }

    #[test]
    fn logical_vs_arithmetic_shift_right() {
        let fact = fact(&[("x", Value::constant(-8)), ("y", Value::constant(1))]);
        let arith = Expr::Shift(ShiftOp::Shr, Var::int("x").into(), Var::int("y").into());
        let logical = Expr::Shift(ShiftOp::UShr, Var::int("x").into(), Var::int("y").into());
        assert_eq!(evaluate(&arith, &fact), Value::constant(-4));
        assert_eq!(evaluate(&logical, &fact), Value::constant(i32::MAX - 3));
    }
}
