//! Constant valuation of initializer expressions.
//!
//! A small, total evaluator over the dump expression model. Integer
//! arithmetic wraps; division by zero, out-of-range shift amounts, and
//! operations without a defined constant meaning yield "not a constant"
//! rather than an error, matching how a front end folds initializers.

use crate::ast::{BinOp, Expr, UnaryOp};

/// A fully computed constant value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn is_integral(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    fn truthy(&self) -> bool {
        match self {
            Value::Int(v) => *v != 0,
            Value::Float(f) => *f != 0.0,
        }
    }
}

/// Syntactic pre-check: the expression is built only from literals,
/// operators, and names with front-end-recorded constant values.
pub fn is_candidate(expr: &Expr) -> bool {
    match expr {
        Expr::IntLiteral(_)
        | Expr::BoolLiteral(_)
        | Expr::CharLiteral(_)
        | Expr::FloatLiteral(_) => true,
        Expr::Unary { operand, .. } => is_candidate(operand),
        Expr::Binary { lhs, rhs, .. } => is_candidate(lhs) && is_candidate(rhs),
        Expr::Conditional {
            cond,
            then_branch,
            else_branch,
        } => is_candidate(cond) && is_candidate(then_branch) && is_candidate(else_branch),
        Expr::Name {
            constant_value,
            dependent,
            ..
        } => !dependent && constant_value.is_some(),
        Expr::Opaque { .. } => false,
    }
}

/// Evaluate an expression to a constant, or `None` if it has no
/// translation-time value.
pub fn evaluate(expr: &Expr) -> Option<Value> {
    match expr {
        Expr::IntLiteral(v) => Some(Value::Int(*v)),
        Expr::BoolLiteral(b) => Some(Value::Int(i64::from(*b))),
        Expr::CharLiteral(c) => Some(Value::Int(*c)),
        Expr::FloatLiteral(f) => Some(Value::Float(*f)),
        Expr::Name {
            constant_value,
            dependent: false,
            ..
        } => constant_value.map(Value::Int),
        Expr::Name { .. } => None,
        Expr::Unary { op, operand } => eval_unary(*op, evaluate(operand)?),
        Expr::Binary { op, lhs, rhs } => {
            let l = evaluate(lhs)?;
            let r = evaluate(rhs)?;
            eval_binary(*op, l, r)
        }
        // Only the selected branch must have a value.
        Expr::Conditional {
            cond,
            then_branch,
            else_branch,
        } => {
            if evaluate(cond)?.truthy() {
                evaluate(then_branch)
            } else {
                evaluate(else_branch)
            }
        }
        Expr::Opaque { .. } => None,
    }
}

fn eval_unary(op: UnaryOp, v: Value) -> Option<Value> {
    match (op, v) {
        (UnaryOp::Plus, v) => Some(v),
        (UnaryOp::Neg, Value::Int(i)) => Some(Value::Int(i.wrapping_neg())),
        (UnaryOp::Neg, Value::Float(f)) => Some(Value::Float(-f)),
        (UnaryOp::Not, v) => Some(Value::Int(i64::from(!v.truthy()))),
        (UnaryOp::BitNot, Value::Int(i)) => Some(Value::Int(!i)),
        (UnaryOp::BitNot, Value::Float(_)) => None,
    }
}

fn eval_binary(op: BinOp, l: Value, r: Value) -> Option<Value> {
    use BinOp::*;

    // Logical and comparison operators produce int regardless of operand kind.
    match op {
        And => return Some(Value::Int(i64::from(l.truthy() && r.truthy()))),
        Or => return Some(Value::Int(i64::from(l.truthy() || r.truthy()))),
        Eq | Ne | Lt | Gt | Le | Ge => return eval_comparison(op, l, r),
        _ => {}
    }

    match (l, r) {
        (Value::Int(a), Value::Int(b)) => eval_int_arith(op, a, b),
        // Mixed operands promote to floating point.
        (a, b) => {
            let (a, b) = (to_f64(a), to_f64(b));
            match op {
                Add => Some(Value::Float(a + b)),
                Sub => Some(Value::Float(a - b)),
                Mul => Some(Value::Float(a * b)),
                Div => Some(Value::Float(a / b)),
                // No remainder, shift, or bitwise operators on floating point.
                _ => None,
            }
        }
    }
}

fn eval_comparison(op: BinOp, l: Value, r: Value) -> Option<Value> {
    use BinOp::*;
    let outcome = match (l, r) {
        (Value::Int(a), Value::Int(b)) => match op {
            Eq => a == b,
            Ne => a != b,
            Lt => a < b,
            Gt => a > b,
            Le => a <= b,
            Ge => a >= b,
            _ => return None,
        },
        (a, b) => {
            let (a, b) = (to_f64(a), to_f64(b));
            match op {
                Eq => a == b,
                Ne => a != b,
                Lt => a < b,
                Gt => a > b,
                Le => a <= b,
                Ge => a >= b,
                _ => return None,
            }
        }
    };
    Some(Value::Int(i64::from(outcome)))
}

fn eval_int_arith(op: BinOp, a: i64, b: i64) -> Option<Value> {
    use BinOp::*;
    let v = match op {
        Add => a.wrapping_add(b),
        Sub => a.wrapping_sub(b),
        Mul => a.wrapping_mul(b),
        Div => {
            if b == 0 {
                return None;
            }
            a.wrapping_div(b)
        }
        Rem => {
            if b == 0 {
                return None;
            }
            a.wrapping_rem(b)
        }
        Shl => {
            let amount = u32::try_from(b).ok().filter(|s| *s < 64)?;
            a.wrapping_shl(amount)
        }
        Shr => {
            let amount = u32::try_from(b).ok().filter(|s| *s < 64)?;
            a.wrapping_shr(amount)
        }
        BitAnd => a & b,
        BitOr => a | b,
        BitXor => a ^ b,
        And | Or | Eq | Ne | Lt | Gt | Le | Ge => return None,
    };
    Some(Value::Int(v))
}

fn to_f64(v: Value) -> f64 {
    match v {
        Value::Int(i) => i as f64,
        Value::Float(f) => f,
    }
}
