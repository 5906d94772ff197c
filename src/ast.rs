// Abstract syntax tree node shapes consumed by the evaluator.
//
// The parser that produces these trees is an external collaborator (see
// spec.md, out of scope); this module only defines the tagged-sum shape
// of the nodes it expects to receive, so a host can hand over a
// JSON-serialized tree built by any front end.

use serde::Deserialize;
use std::collections::HashMap;
use std::rc::Rc;

// Abstract over various memory management strategies.
pub type Node<T> = Rc<T>;
pub type Seq<T> = Vec<T>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum TypeTag {
    Int,
    String,
    Bool,
    Void,
    Struct(String),
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TypeTag::Int => write!(f, "int"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Void => write!(f, "void"),
            TypeTag::Struct(name) => write!(f, "{}", name),
        }
    }
}

// Arithmetic, relational and logic operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Ne,
    And,
    Or,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum UnOp {
    Not,
    Neg,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum Literal {
    Int(i64),
    Str(String),
    Bool(bool),
    Nil,
}

// ADT for expressions. `Var`'s `name` may be a dotted path ("p.v") which
// the scope manager resolves by walking struct field maps.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "elem_type")]
pub enum Expr {
    #[serde(rename = "lit")]
    Lit(Literal),
    #[serde(rename = "var")]
    Var { name: String },
    #[serde(rename = "unary")]
    Unary { op: UnOp, op1: Node<Expr> },
    #[serde(rename = "binary")]
    Binary {
        op: BinOp,
        op1: Node<Expr>,
        op2: Node<Expr>,
    },
    #[serde(rename = "fcall")]
    FCall { name: String, args: Seq<Expr> },
    #[serde(rename = "new")]
    New { var_type: String },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Catcher {
    pub exception_type: String,
    pub statements: Seq<Stmt>,
}

// ADT for effects and structure.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "elem_type")]
pub enum Stmt {
    #[serde(rename = "vardef")]
    VarDef {
        name: String,
        var_type: Option<TypeTag>,
    },
    #[serde(rename = "=")]
    Assign { name: String, expression: Expr },
    #[serde(rename = "fcall")]
    FCall { name: String, args: Seq<Expr> },
    #[serde(rename = "if")]
    If {
        condition: Expr,
        statements: Seq<Stmt>,
        #[serde(default)]
        else_statements: Seq<Stmt>,
    },
    #[serde(rename = "for")]
    For {
        init: Node<Stmt>,
        condition: Expr,
        update: Node<Stmt>,
        statements: Seq<Stmt>,
    },
    #[serde(rename = "return")]
    Return { expression: Option<Expr> },
    #[serde(rename = "try")]
    Try {
        statements: Seq<Stmt>,
        catchers: Seq<Catcher>,
    },
    #[serde(rename = "raise")]
    Raise { exception_type: Expr },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Arg {
    pub name: String,
    pub var_type: TypeTag,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FuncDef {
    pub name: String,
    pub args: Seq<Arg>,
    pub return_type: TypeTag,
    pub statements: Seq<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Field {
    pub name: String,
    pub var_type: TypeTag,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StructDef {
    pub name: String,
    pub fields: Seq<Field>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Program {
    pub functions: Seq<FuncDef>,
    #[serde(default)]
    pub structs: Seq<StructDef>,
}

pub type FieldMap = HashMap<String, TypeTag>;
