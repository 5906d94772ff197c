// Statement executor (spec.md §4.4).

use crate::ast::Stmt;
use crate::call;
use crate::env::{Env, Slot};
use crate::error::Fault;
use crate::eval::{self, eval_expr};
use crate::interp::Interp;
use crate::signal::{ExecResult, Flow, Unwind};
use crate::value::Value;
use std::rc::Rc;

/// Runs a block of statements in `env`, stopping at the first statement
/// that returns or raises (spec.md §4.4: "A block terminator is observed
/// when the return flag is set or an exception propagates").
pub fn exec_block(interp: &mut Interp, stmts: &[Stmt], env: &Rc<Env>) -> ExecResult {
    for stmt in stmts {
        match exec_stmt(interp, stmt, env)? {
            Flow::Normal => {}
            Flow::Return(v) => return Ok(Flow::Return(v)),
        }
    }
    Ok(Flow::Normal)
}

pub fn exec_stmt(interp: &mut Interp, stmt: &Stmt, env: &Rc<Env>) -> ExecResult {
    match stmt {
        Stmt::VarDef { name, var_type } => exec_vardef(env, name, var_type),
        Stmt::Assign { name, expression } => {
            eval::write_var(interp, env, name, expression)?;
            Ok(Flow::Normal)
        }
        Stmt::FCall { name, args } => {
            call::call_expr(interp, env, name, args)?;
            Ok(Flow::Normal)
        }
        Stmt::If {
            condition,
            statements,
            else_statements,
        } => exec_if(interp, condition, statements, else_statements, env),
        Stmt::For {
            init,
            condition,
            update,
            statements,
        } => exec_for(interp, init, condition, update, statements, env),
        Stmt::Return { expression } => exec_return(interp, expression, env),
        Stmt::Try {
            statements,
            catchers,
        } => exec_try(interp, statements, catchers, env),
        Stmt::Raise { exception_type } => exec_raise(interp, exception_type, env),
    }
}

fn exec_vardef(
    env: &Rc<Env>,
    name: &str,
    var_type: &Option<crate::ast::TypeTag>,
) -> ExecResult {
    let default = match var_type {
        Some(ty) => Value::default_for(ty),
        None => Value::Nil,
    };
    if !env.define(name, Slot::Value(default)) {
        return Err(Unwind::from(Fault::name(format!(
            "Multiple definition of variable '{}'",
            name
        ))));
    }
    Ok(Flow::Normal)
}

fn exec_if(
    interp: &mut Interp,
    condition: &crate::ast::Expr,
    then_stmts: &[Stmt],
    else_stmts: &[Stmt],
    env: &Rc<Env>,
) -> ExecResult {
    let cond = eval_expr(interp, condition, env)?
        .coerce_bool()
        .map_err(Unwind::from)?;
    let block = Env::block(env);
    if cond {
        exec_block(interp, then_stmts, &block)
    } else {
        exec_block(interp, else_stmts, &block)
    }
}

fn exec_for(
    interp: &mut Interp,
    init: &Stmt,
    condition: &crate::ast::Expr,
    update: &Stmt,
    body: &[Stmt],
    env: &Rc<Env>,
) -> ExecResult {
    // init/update run in the enclosing frame, not a fresh block (§4.4).
    exec_stmt(interp, init, env)?;
    loop {
        let cond = eval_expr(interp, condition, env)?
            .coerce_bool()
            .map_err(Unwind::from)?;
        if !cond {
            return Ok(Flow::Normal);
        }

        let block = Env::block(env);
        match exec_block(interp, body, &block)? {
            Flow::Normal => {}
            Flow::Return(v) => return Ok(Flow::Return(v)),
        }
        exec_stmt(interp, update, env)?;
    }
}

fn exec_return(
    interp: &mut Interp,
    expression: &Option<crate::ast::Expr>,
    env: &Rc<Env>,
) -> ExecResult {
    let value = match expression {
        Some(expr) => eval_expr(interp, expr, env)?,
        None => Value::Nil,
    };
    Ok(Flow::Return(value))
}

fn exec_raise(interp: &mut Interp, expr: &crate::ast::Expr, env: &Rc<Env>) -> ExecResult {
    let value = eval_expr(interp, expr, env)?;
    match value {
        Value::Str(s) => Err(Unwind::Raise(s)),
        other => Err(Unwind::from(Fault::type_(format!(
            "raise expects a string, got {}",
            other.type_tag()
        )))),
    }
}

fn exec_try(
    interp: &mut Interp,
    body: &[Stmt],
    catchers: &[crate::ast::Catcher],
    env: &Rc<Env>,
) -> ExecResult {
    let block = Env::block(env);
    match exec_block(interp, body, &block) {
        Err(Unwind::Raise(payload)) => {
            for catcher in catchers {
                if catcher.exception_type == payload {
                    let handler_env = Env::block(env);
                    return exec_block(interp, &catcher.statements, &handler_env);
                }
            }
            // No catcher matched: re-raise (spec.md §4.4: try{...}).
            Err(Unwind::Raise(payload))
        }
        other => other,
    }
}
