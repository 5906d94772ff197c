// Thunks: suspended expression + captured environment + memoization cell
// (spec.md §3, §4.7).
//
// Per the Design Note "thunk environment capture" (spec.md §9), a thunk
// holds a direct Rc to the Env chain visible at its construction site
// (down to and including the owning function frame), not merely a
// variable name — so a thunk built inside `f` and returned to `g` still
// resolves its free variables against `f`'s bindings when forced from `g`.

use crate::ast::{Expr, TypeTag};
use crate::env::Env;
use crate::interp::Interp;
use crate::signal::{EvalResult, Unwind};
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub struct Thunk {
    expr: Rc<Expr>,
    env: Rc<Env>,
    /// The parameter's declared type, checked (at the typed level) the
    /// same way an eagerly bound argument is (spec.md §4.5 point 3).
    /// `None` for thunks built by plain assignment, which bind to no
    /// declared type.
    declared_type: Option<TypeTag>,
    cache: RefCell<Option<Value>>,
}

impl Thunk {
    pub fn new(expr: Rc<Expr>, env: Rc<Env>, declared_type: Option<TypeTag>) -> Thunk {
        Thunk {
            expr,
            env,
            declared_type,
            cache: RefCell::new(None),
        }
    }

    /// Forces the thunk, memoizing the first successful evaluation.
    /// A raised exception is not cached: it propagates from the point
    /// that forced it (§4.7), and a later force re-evaluates.
    pub fn force(&self, interp: &mut Interp) -> EvalResult {
        if let Some(v) = self.cache.borrow().as_ref() {
            log::trace!("thunk cache hit");
            return Ok(v.clone());
        }
        log::trace!("forcing thunk");
        let value = crate::eval::eval_expr(interp, &self.expr, &self.env)?;
        let value = match &self.declared_type {
            Some(ty) if interp.typed() => value.coerce_to(ty).map_err(Unwind::from)?,
            _ => value,
        };
        *self.cache.borrow_mut() = Some(value.clone());
        Ok(value)
    }
}
