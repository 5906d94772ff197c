// Call dispatch & thunks (spec.md §4.5).
//
// Grounded on original_source/interpreterv4.py's run_func/do_func_call,
// generalized with the Slot::Thunk capture-by-pointer scheme: a thunk
// built here holds a direct Rc to the caller's Env chain rather than a
// name, so it resolves free variables against caller-time bindings even
// when forced much later from inside the callee.

use crate::ast::{Expr, FuncDef};
use crate::env::{Env, Slot};
use crate::error::Fault;
use crate::eval::eval_expr;
use crate::exec;
use crate::interp::Interp;
use crate::signal::{EvalResult, Flow, Unwind};
use crate::thunk::Thunk;
use crate::value::Value;
use std::rc::Rc;

pub fn call_expr(interp: &mut Interp, env: &Rc<Env>, name: &str, args: &[Expr]) -> EvalResult {
    match name {
        "print" => builtin_print(interp, env, args),
        "inputi" => builtin_input(interp, env, args, true),
        "inputs" => builtin_input(interp, env, args, false),
        _ => call_user_func(interp, env, name, args),
    }
}

fn builtin_print(interp: &mut Interp, env: &Rc<Env>, args: &[Expr]) -> EvalResult {
    let mut rendered = String::new();
    for arg in args {
        let v = eval_expr(interp, arg, env)?;
        rendered.push_str(&v.render());
    }
    interp.host.output(&rendered);
    Ok(Value::Nil)
}

fn builtin_input(interp: &mut Interp, env: &Rc<Env>, args: &[Expr], as_int: bool) -> EvalResult {
    if args.len() > 1 {
        let builtin = if as_int { "inputi" } else { "inputs" };
        return Err(Unwind::from(Fault::name(format!(
            "{} accepts at most one argument",
            builtin
        ))));
    }
    if let Some(prompt) = args.first() {
        let v = eval_expr(interp, prompt, env)?;
        interp.host.output(&v.render());
    }
    let line = interp.host.get_input();
    if as_int {
        let n: i64 = line
            .trim()
            .parse()
            .map_err(|_| Unwind::from(Fault::type_(format!("'{}' is not an int", line))))?;
        Ok(Value::Int(n))
    } else {
        Ok(Value::Str(line))
    }
}

fn call_user_func(interp: &mut Interp, env: &Rc<Env>, name: &str, args: &[Expr]) -> EvalResult {
    log::debug!("calling {} with {} argument(s)", name, args.len());
    let def = interp.functions.resolve(name, args.len())?.clone();
    let func_env = Env::function();
    bind_args(interp, env, &func_env, &def, args)?;

    let body_env = Env::block(&func_env);
    let flow = exec::exec_block(interp, &def.statements, &body_env)?;
    log::trace!("returning from {}", name);

    let value = match flow {
        Flow::Return(v) => v,
        Flow::Normal => Value::default_for(&def.return_type),
    };
    finish_return(&def, value)
}

fn bind_args(
    interp: &mut Interp,
    caller_env: &Rc<Env>,
    func_env: &Rc<Env>,
    def: &FuncDef,
    args: &[Expr],
) -> Result<(), Unwind> {
    for (param, arg_expr) in def.args.iter().zip(args) {
        let slot = if interp.lazy {
            Slot::Thunk(Thunk::new(
                Rc::new(arg_expr.clone()),
                caller_env.clone(),
                Some(param.var_type.clone()),
            ))
        } else {
            let v = eval_expr(interp, arg_expr, caller_env)?;
            let v = if interp.typed() {
                v.coerce_to(&param.var_type).map_err(Unwind::from)?
            } else {
                v
            };
            Slot::Value(v)
        };
        if !func_env.define(&param.name, slot) {
            return Err(Unwind::from(Fault::name(format!(
                "duplicate parameter '{}'",
                param.name
            ))));
        }
    }
    Ok(())
}

fn finish_return(def: &FuncDef, value: Value) -> EvalResult {
    use crate::ast::TypeTag;
    match &def.return_type {
        TypeTag::Void if !matches!(value, Value::Nil) => Err(Unwind::from(Fault::type_(format!(
            "void function {} returned a value",
            def.name
        )))),
        TypeTag::Void => Ok(Value::Nil),
        ty => value.coerce_to(ty).map_err(Unwind::from),
    }
}
