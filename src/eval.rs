// Expression evaluator (spec.md §4.6).

use crate::ast::{BinOp, Expr, Literal};
use crate::call;
use crate::env::{Env, Slot, SlotRef};
use crate::interp::Interp;
use crate::ops::{self, BinResult};
use crate::signal::{EvalResult, Unwind};
use crate::value::{self, Value};
use std::rc::Rc;

pub fn eval_expr(interp: &mut Interp, expr: &Expr, env: &Rc<Env>) -> EvalResult {
    match expr {
        Expr::Lit(lit) => Ok(literal_value(lit)),
        Expr::Var { name } => read_var(interp, env, name),
        Expr::Unary { op, op1 } => {
            let v = eval_expr(interp, op1, env)?;
            Ok(ops::eval_unop(*op, &v)?)
        }
        Expr::Binary { op, op1, op2 } => eval_binary(interp, *op, op1, op2, env),
        Expr::FCall { name, args } => call::call_expr(interp, env, name, args),
        Expr::New { var_type } => eval_new(interp, var_type),
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Int(i) => Value::Int(*i),
        Literal::Str(s) => Value::Str(s.clone()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Nil => Value::Nil,
    }
}

fn eval_binary(
    interp: &mut Interp,
    op: BinOp,
    op1: &Expr,
    op2: &Expr,
    env: &Rc<Env>,
) -> EvalResult {
    // Short-circuit: the right operand is evaluated only if the left does
    // not already determine the result (§4.2). At the lazy level this
    // also means the right-hand thunk, if any, is never forced.
    if matches!(op, BinOp::And | BinOp::Or) {
        let l = eval_expr(interp, op1, env)?;
        let l = l.coerce_bool().map_err(Unwind::from)?;
        if op == BinOp::And && !l {
            return Ok(Value::Bool(false));
        }
        if op == BinOp::Or && l {
            return Ok(Value::Bool(true));
        }
        let r = eval_expr(interp, op2, env)?;
        let r = r.coerce_bool().map_err(Unwind::from)?;
        return Ok(Value::Bool(r));
    }

    let l = eval_expr(interp, op1, env)?;
    let r = eval_expr(interp, op2, env)?;
    match ops::eval_binop(op, &l, &r)? {
        BinResult::Value(v) => Ok(v),
        BinResult::DivByZero if interp.exceptions() => Err(Unwind::Raise("div0".to_string())),
        BinResult::DivByZero => Err(Unwind::from(crate::error::Fault::runtime("division by zero"))),
    }
}

fn eval_new(interp: &mut Interp, type_name: &str) -> EvalResult {
    let fields = interp
        .structs
        .fields(type_name)
        .ok_or_else(|| Unwind::from(crate::error::Fault::type_(format!(
            "undefined struct type '{}'",
            type_name
        ))))?;

    let mut map = std::collections::HashMap::new();
    for (name, ty) in fields {
        map.insert(name.clone(), Value::default_for(ty));
    }
    Ok(Value::Struct {
        type_name: type_name.to_string(),
        handle: Some(Rc::new(std::cell::RefCell::new(map))),
    })
}

/// Forces the slot's value, running the thunk if one is stored there.
pub fn force_slot(interp: &mut Interp, slot: &SlotRef) -> EvalResult {
    match &*slot.borrow() {
        Slot::Value(v) => Ok(v.clone()),
        Slot::Thunk(t) => t.force(interp),
    }
}

/// Reads a (possibly dotted, e.g. "p.v") variable reference.
pub fn read_var(interp: &mut Interp, env: &Rc<Env>, path: &str) -> EvalResult {
    let mut parts = path.split('.');
    let head = parts.next().unwrap();
    let slot = env
        .lookup(head)
        .ok_or_else(|| Unwind::from(crate::error::Fault::name(format!(
            "Undefined variable '{}'",
            head
        ))))?;
    let mut current = force_slot(interp, &slot)?;
    for field in parts {
        current = value::get_field(&current, field, head).map_err(Unwind::from)?;
    }
    Ok(current)
}

/// Writes a (possibly dotted) variable reference with `value`. Only the
/// final segment write is affected by the active language level: plain
/// (non-dotted) writes build a thunk at the lazy level; dotted struct
/// field writes are always eager (a struct field is a heap cell, not a
/// parameter slot).
pub fn write_var(
    interp: &mut Interp,
    env: &Rc<Env>,
    path: &str,
    expr: &Expr,
) -> Result<(), Unwind> {
    let mut parts = path.split('.');
    let head = parts.next().unwrap();
    let slot = env
        .lookup(head)
        .ok_or_else(|| Unwind::from(crate::error::Fault::name(format!(
            "Undefined variable '{}'",
            head
        ))))?;

    let remaining: Vec<&str> = parts.collect();
    if remaining.is_empty() {
        let new_slot = if interp.lazy {
            Slot::Thunk(crate::thunk::Thunk::new(Rc::new(expr.clone()), env.clone(), None))
        } else {
            Slot::Value(eval_expr(interp, expr, env)?)
        };
        *slot.borrow_mut() = new_slot;
        return Ok(());
    }

    let mut target = force_slot(interp, &slot)?;
    for field in &remaining[..remaining.len() - 1] {
        target = value::get_field(&target, field, head).map_err(Unwind::from)?;
    }
    let field_name = remaining[remaining.len() - 1];
    let mut value = eval_expr(interp, expr, env)?;
    if interp.typed() {
        if let Value::Struct { type_name, .. } = &target {
            if let Some(declared) = interp.structs.fields(type_name).and_then(|f| f.get(field_name)) {
                value = value.coerce_to(declared).map_err(Unwind::from)?;
            }
        }
    }
    value::set_field(&target, field_name, head, value).map_err(Unwind::from)
}
