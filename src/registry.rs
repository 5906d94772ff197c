// Struct and function tables, validated once at program load (spec.md §3).

use crate::ast::{FieldMap, FuncDef, Program, Stmt, TypeTag};
use crate::error::Fault;
use std::collections::HashMap;

pub struct StructRegistry {
    defs: HashMap<String, FieldMap>,
}

impl StructRegistry {
    pub fn fields(&self, name: &str) -> Option<&FieldMap> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    /// Validates that `ty` resolves to a primitive or a declared struct
    /// name (spec.md §3: "declared types must resolve to a primitive...
    /// or another declared struct name").
    pub fn validate_type(&self, ty: &TypeTag) -> Result<(), Fault> {
        match ty {
            TypeTag::Int | TypeTag::String | TypeTag::Bool | TypeTag::Void => Ok(()),
            TypeTag::Struct(name) => {
                if self.contains(name) {
                    Ok(())
                } else {
                    Err(Fault::type_(format!("undefined struct type '{}'", name)))
                }
            }
        }
    }
}

pub struct FunctionTable {
    funcs: HashMap<String, Vec<FuncDef>>,
}

impl FunctionTable {
    pub fn candidates(&self, name: &str) -> Option<&[FuncDef]> {
        self.funcs.get(name).map(|v| v.as_slice())
    }

    /// Selects the first candidate whose parameter count matches `arity`
    /// (spec.md §4.5, Design Note "overload selection"). If none match,
    /// reports a NAME_ERROR citing the last candidate's arity.
    pub fn resolve(&self, name: &str, arity: usize) -> Result<&FuncDef, Fault> {
        let candidates = self
            .funcs
            .get(name)
            .ok_or_else(|| Fault::name(format!("Function '{}' is not defined", name)))?;

        for cand in candidates {
            if cand.args.len() == arity {
                return Ok(cand);
            }
        }
        let last = candidates.last().unwrap();
        Err(Fault::name(format!(
            "Function {} expected {} arguments, got {}",
            name,
            last.args.len(),
            arity
        )))
    }
}

/// Walks every `vardef` reachable from `stmts` (through `if`/`for`/`try`
/// bodies and catchers) and validates its declared type, per
/// `original_source/interpreterv3.py`'s `do_definition` (`is_valid_type`
/// check at definition time, not merely at struct/signature declaration).
fn validate_vardefs(stmts: &[Stmt], structs: &StructRegistry) -> Result<(), Fault> {
    for stmt in stmts {
        match stmt {
            Stmt::VarDef { var_type: Some(ty), .. } => structs.validate_type(ty)?,
            Stmt::VarDef { var_type: None, .. } => {}
            Stmt::Assign { .. } | Stmt::FCall { .. } | Stmt::Return { .. } | Stmt::Raise { .. } => {}
            Stmt::If { statements, else_statements, .. } => {
                validate_vardefs(statements, structs)?;
                validate_vardefs(else_statements, structs)?;
            }
            Stmt::For { init, update, statements, .. } => {
                validate_vardefs(std::slice::from_ref(&**init), structs)?;
                validate_vardefs(std::slice::from_ref(&**update), structs)?;
                validate_vardefs(statements, structs)?;
            }
            Stmt::Try { statements, catchers } => {
                validate_vardefs(statements, structs)?;
                for catcher in catchers {
                    validate_vardefs(&catcher.statements, structs)?;
                }
            }
        }
    }
    Ok(())
}

/// Builds and validates the struct and function registries from a parsed
/// program. Invalid declared types are reported before execution begins
/// (spec.md §3: "Validated once at program load").
pub fn build(program: &Program) -> Result<(StructRegistry, FunctionTable), Fault> {
    let mut defs = HashMap::new();
    for def in &program.structs {
        let mut fields = FieldMap::new();
        for field in &def.fields {
            fields.insert(field.name.clone(), field.var_type.clone());
        }
        defs.insert(def.name.clone(), fields);
    }
    let structs = StructRegistry { defs };

    for (name, fields) in &structs.defs {
        for ty in fields.values() {
            structs
                .validate_type(ty)
                .map_err(|e| Fault::type_(format!("struct {}: {}", name, e.message)))?;
        }
    }

    let mut funcs: HashMap<String, Vec<FuncDef>> = HashMap::new();
    for def in &program.functions {
        structs.validate_type(&def.return_type)?;
        for arg in &def.args {
            structs.validate_type(&arg.var_type)?;
        }
        validate_vardefs(&def.statements, &structs)?;
        funcs.entry(def.name.clone()).or_default().push(def.clone());
    }

    Ok((structs, FunctionTable { funcs }))
}
