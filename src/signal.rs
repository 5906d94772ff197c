// Explicit control-flow signal replacing the source's boolean return-flag
// global (Design Note "global interpreter state", spec.md §9).

use crate::error::Fault;
use crate::value::Value;

/// The outcome of running a statement or statement block.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Why evaluation is unwinding. `Raise` is catchable by `try`/`catch`;
/// `Fault` (name/type/fault errors) is not and propagates straight to the
/// host.
#[derive(Debug)]
pub enum Unwind {
    Raise(String),
    Fault(Fault),
}

impl From<Fault> for Unwind {
    fn from(f: Fault) -> Unwind {
        Unwind::Fault(f)
    }
}

pub type ExecResult = Result<Flow, Unwind>;
pub type EvalResult = Result<Value, Unwind>;
