// Binary and unary operator tables (spec.md §4.2).
//
// Grounded on original_source/utils.py's BINARY_OPERATORS/UNARY_OPERATORS
// typechecked-closure tables, restructured here as an exhaustive match
// over (operand type, operand type, operator) per the Design Notes' call
// for a tagged-sum / exhaustive-match style.

use crate::ast::{BinOp, UnOp};
use crate::error::Fault;
use crate::value::Value;

/// `div0` is raised (catchable) rather than returned as a Fault; callers
/// distinguish it from an ordinary TYPE_ERROR.
pub enum BinResult {
    Value(Value),
    DivByZero,
}

pub fn eval_binop(op: BinOp, l: &Value, r: &Value) -> Result<BinResult, Fault> {
    use BinOp::*;
    use Value::*;

    // `==`/`!=` are universal and never fail.
    if let Eq | Ne = op {
        let eq = Value::values_equal(l, r);
        return Ok(BinResult::Value(Value::Bool(if op == Eq { eq } else { !eq })));
    }

    match (op, l, r) {
        (Add, Int(a), Int(b)) => Ok(BinResult::Value(Int(a + b))),
        (Sub, Int(a), Int(b)) => Ok(BinResult::Value(Int(a - b))),
        (Mul, Int(a), Int(b)) => Ok(BinResult::Value(Int(a * b))),
        (Div, Int(_), Int(0)) => Ok(BinResult::DivByZero),
        (Div, Int(a), Int(b)) => Ok(BinResult::Value(Int(floor_div(*a, *b)))),
        (Lt, Int(a), Int(b)) => Ok(BinResult::Value(Bool(a < b))),
        (Lte, Int(a), Int(b)) => Ok(BinResult::Value(Bool(a <= b))),
        (Gt, Int(a), Int(b)) => Ok(BinResult::Value(Bool(a > b))),
        (Gte, Int(a), Int(b)) => Ok(BinResult::Value(Bool(a >= b))),

        (Add, Str(a), Str(b)) => Ok(BinResult::Value(Str(format!("{}{}", a, b)))),

        (And, a, b) | (Or, a, b) => {
            let (a, b) = (coerce_logical(a)?, coerce_logical(b)?);
            let result = if op == And { a && b } else { a || b };
            Ok(BinResult::Value(Bool(result)))
        }

        _ => Err(Fault::type_(format!(
            "unsupported operand type(s) for {:?}: {}, {}",
            op,
            l.type_tag(),
            r.type_tag()
        ))),
    }
}

/// Floor (not truncating) division, per §4.2.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

/// Coerces int/bool operands of `&&`/`||` per §4.1 rule 1.
fn coerce_logical(v: &Value) -> Result<bool, Fault> {
    match v {
        Value::Bool(b) => Ok(*b),
        Value::Int(i) => Ok(*i != 0),
        _ => Err(Fault::type_(format!(
            "unsupported operand type for &&/||: {}",
            v.type_tag()
        ))),
    }
}

pub fn eval_unop(op: UnOp, operand: &Value) -> Result<Value, Fault> {
    match (op, operand) {
        (UnOp::Neg, Value::Int(i)) => Ok(Value::Int(-i)),
        (UnOp::Neg, _) => Err(Fault::type_(format!(
            "bad operand type for unary negation: {}",
            operand.type_tag()
        ))),
        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnOp::Not, Value::Int(i)) => Ok(Value::Bool(*i == 0)),
        (UnOp::Not, _) => Err(Fault::type_(format!(
            "bad operand type for logical not: {}",
            operand.type_tag()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_arithmetic() {
        match eval_binop(BinOp::Add, &Value::Int(1), &Value::Int(2)).unwrap() {
            BinResult::Value(Value::Int(3)) => {}
            _ => panic!("expected 3"),
        }
    }

    #[test]
    fn div_by_zero_is_reported() {
        assert!(matches!(
            eval_binop(BinOp::Div, &Value::Int(1), &Value::Int(0)).unwrap(),
            BinResult::DivByZero
        ));
    }

    #[test]
    fn universal_equality_never_errors() {
        match eval_binop(BinOp::Eq, &Value::Str("x".into()), &Value::Int(1)).unwrap() {
            BinResult::Value(Value::Bool(false)) => {}
            _ => panic!("expected false"),
        }
    }

    #[test]
    fn struct_equality_is_identity() {
        use std::cell::RefCell;
        use std::collections::HashMap;
        use std::rc::Rc;

        let handle = Rc::new(RefCell::new(HashMap::new()));
        let a = Value::Struct {
            type_name: "N".into(),
            handle: Some(handle.clone()),
        };
        let b = Value::Struct {
            type_name: "N".into(),
            handle: Some(handle.clone()),
        };
        let c = Value::Struct {
            type_name: "N".into(),
            handle: Some(Rc::new(RefCell::new(HashMap::new()))),
        };
        assert!(Value::values_equal(&a, &b));
        assert!(!Value::values_equal(&a, &c));
    }
}
