// Runtime value model (spec.md §3, §4.1).

use crate::ast::TypeTag;
use crate::error::Fault;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type StructHandle = Option<Rc<RefCell<HashMap<String, Value>>>>;

#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Nil,
    Struct { type_name: String, handle: StructHandle },
}

impl Value {
    pub fn default_for(ty: &TypeTag) -> Value {
        match ty {
            TypeTag::Int => Value::Int(0),
            TypeTag::String => Value::Str(String::new()),
            TypeTag::Bool => Value::Bool(false),
            TypeTag::Void => Value::Nil,
            TypeTag::Struct(name) => Value::Struct {
                type_name: name.clone(),
                handle: None,
            },
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Nil => "nil",
            Value::Struct { .. } => "struct",
        }
    }

    /// int -> bool coercion (§4.1 rule 1). Non-int/bool values are rejected.
    pub fn coerce_bool(&self) -> Result<bool, Fault> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Int(i) => Ok(*i != 0),
            _ => Err(Fault::type_(format!(
                "expected bool, got {}",
                self.type_tag()
            ))),
        }
    }

    /// Coerce `self` to a value compatible with the declared type `ty`,
    /// applying the two rules of §4.1 (int->bool, nil->struct(T)).
    pub fn coerce_to(&self, ty: &TypeTag) -> Result<Value, Fault> {
        match (ty, self) {
            (TypeTag::Int, Value::Int(_)) => Ok(self.clone()),
            (TypeTag::String, Value::Str(_)) => Ok(self.clone()),
            (TypeTag::Bool, Value::Bool(_)) => Ok(self.clone()),
            (TypeTag::Bool, Value::Int(i)) => Ok(Value::Bool(*i != 0)),
            (TypeTag::Struct(name), Value::Nil) => Ok(Value::Struct {
                type_name: name.clone(),
                handle: None,
            }),
            (TypeTag::Struct(name), Value::Struct { type_name, .. })
                if type_name == name =>
            {
                Ok(self.clone())
            }
            (TypeTag::Void, _) => Err(Fault::type_("cannot coerce a value to void")),
            _ => Err(Fault::type_(format!(
                "cannot coerce {} to {}",
                self.type_tag(),
                ty
            ))),
        }
    }

    pub fn is_coercible_to(&self, ty: &TypeTag) -> bool {
        self.coerce_to(ty).is_ok()
    }

    /// Universal `==`: different, non-coercible type-tags compare unequal,
    /// never an error (§4.2).
    pub fn values_equal(a: &Value, b: &Value) -> bool {
        use Value::*;
        match (a, b) {
            (Int(x), Int(y)) => x == y,
            (Str(x), Str(y)) => x == y,
            (Bool(x), Bool(y)) => x == y,
            (Int(x), Bool(y)) | (Bool(y), Int(x)) => (*x != 0) == *y,
            (Nil, Nil) => true,
            (Nil, Struct { handle, .. }) | (Struct { handle, .. }, Nil) => handle.is_none(),
            (Struct { handle: h1, .. }, Struct { handle: h2, .. }) => match (h1, h2) {
                (None, None) => true,
                (Some(x), Some(y)) => Rc::ptr_eq(x, y),
                _ => false,
            },
            _ => false,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Str(s) => s.clone(),
            Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Value::Nil => "nil".to_string(),
            Value::Struct { type_name, handle } => match handle {
                None => "nil".to_string(),
                Some(_) => format!("struct {}", type_name),
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Reads field `field` from a struct value, walking one level of a
/// dotted path (spec.md §4.4, grounded on
/// original_source/scope_manager.py's get_var).
pub fn get_field(target: &Value, field: &str, owner: &str) -> Result<Value, Fault> {
    match target {
        Value::Struct { handle: Some(cell), .. } => {
            let map = cell.borrow();
            map.get(field).cloned().ok_or_else(|| {
                Fault::name(format!("Variable {} has no field {}", owner, field))
            })
        }
        Value::Struct { handle: None, .. } => Err(Fault::runtime(format!(
            "Attempted to access field {} of uninitialized struct {}",
            field, owner
        ))),
        _ => Err(Fault::type_(format!("Not a struct: {}", owner))),
    }
}

/// Writes field `field` of a struct value, per the same walk as
/// `get_field`.
pub fn set_field(target: &Value, field: &str, owner: &str, value: Value) -> Result<(), Fault> {
    match target {
        Value::Struct { handle: Some(cell), .. } => {
            let mut map = cell.borrow_mut();
            if !map.contains_key(field) {
                return Err(Fault::name(format!(
                    "Variable {} has no field {}",
                    owner, field
                )));
            }
            map.insert(field.to_string(), value);
            Ok(())
        }
        Value::Struct { handle: None, .. } => Err(Fault::runtime(format!(
            "Attempted to access field {} of uninitialized struct {}",
            field, owner
        ))),
        _ => Err(Fault::type_(format!("Not a struct: {}", owner))),
    }
}
