// The interpreter context threaded through statement execution, expression
// evaluation and call dispatch (Design Note "global interpreter state",
// spec.md §9: an explicit Context replacing the source's single
// interpreter object).

use crate::config::Level;
use crate::host::Host;
use crate::registry::{FunctionTable, StructRegistry};

pub struct Interp<'a> {
    pub functions: &'a FunctionTable,
    pub structs: &'a StructRegistry,
    pub host: &'a mut dyn Host,
    pub level: Level,
    /// Whether slot writes build thunks (the lazy/"need" level) or plain
    /// values (every earlier level).
    pub lazy: bool,
}

impl<'a> Interp<'a> {
    pub fn new(
        functions: &'a FunctionTable,
        structs: &'a StructRegistry,
        host: &'a mut dyn Host,
        level: Level,
    ) -> Interp<'a> {
        Interp {
            functions,
            structs,
            host,
            level,
            lazy: level == Level::Lazy,
        }
    }

    /// Whether call arguments and return values are checked against
    /// declared types (spec.md §4.5: "at the typed level").
    pub fn typed(&self) -> bool {
        self.level >= Level::Typed
    }

    /// Whether `raise`/`try`/`catch` and div-by-zero-as-exception are
    /// active (spec.md §4.2: "in earlier levels it is a fatal error").
    pub fn exceptions(&self) -> bool {
        self.level >= Level::Exceptions
    }
}
