// End-to-end scenarios, run through the full pipeline (registry
// validation + call dispatch) against a BufferHost, per the Testable
// Properties' literal-I/O scenarios.

use brewi::ast::*;
use brewi::call::call_expr;
use brewi::env::Env;
use brewi::host::BufferHost;
use brewi::interp::Interp;
use brewi::registry;

fn lit(v: i64) -> Expr {
    Expr::Lit(Literal::Int(v))
}

fn var(name: &str) -> Expr {
    Expr::Var { name: name.to_string() }
}

fn binary(op: BinOp, a: Expr, b: Expr) -> Expr {
    Expr::Binary {
        op,
        op1: std::rc::Rc::new(a),
        op2: std::rc::Rc::new(b),
    }
}

fn print_stmt(args: Vec<Expr>) -> Stmt {
    Stmt::FCall { name: "print".to_string(), args }
}

fn program(functions: Vec<FuncDef>, structs: Vec<StructDef>) -> Program {
    Program { functions, structs }
}

fn func(name: &str, args: Vec<Arg>, return_type: TypeTag, statements: Vec<Stmt>) -> FuncDef {
    FuncDef { name: name.to_string(), args, return_type, statements }
}

fn arg(name: &str, ty: TypeTag) -> Arg {
    Arg { name: name.to_string(), var_type: ty }
}

fn run(prog: &Program) -> Vec<String> {
    let (structs, functions) = registry::build(prog).expect("valid program");
    let mut host = BufferHost::default();
    let mut interp = Interp::new(&functions, &structs, &mut host, brewi::config::Level::Lazy);
    let env = Env::function();
    call_expr(&mut interp, &env, "main", &[]).expect("main succeeds");
    host.captured
}

#[test]
fn arithmetic_and_print() {
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![print_stmt(vec![binary(
            BinOp::Add,
            lit(1),
            binary(BinOp::Mul, lit(2), lit(3)),
        )])],
    );
    assert_eq!(run(&program(vec![main], vec![])), vec!["7"]);
}

#[test]
fn overload_by_arity() {
    let f1 = func(
        "f",
        vec![arg("x", TypeTag::Int)],
        TypeTag::Int,
        vec![Stmt::Return { expression: Some(var("x")) }],
    );
    let f2 = func(
        "f",
        vec![arg("x", TypeTag::Int), arg("y", TypeTag::Int)],
        TypeTag::Int,
        vec![Stmt::Return { expression: Some(var("x")) }],
    );
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![
            print_stmt(vec![Expr::FCall { name: "f".into(), args: vec![lit(7)] }]),
            print_stmt(vec![Expr::FCall {
                name: "f".into(),
                args: vec![lit(7), lit(9)],
            }]),
        ],
    );
    assert_eq!(run(&program(vec![f1, f2, main], vec![])), vec!["7", "7"]);
}

#[test]
fn lexical_scoping_with_block_shadowing() {
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![
            Stmt::VarDef { name: "x".into(), var_type: None },
            Stmt::Assign { name: "x".into(), expression: lit(1) },
            Stmt::If {
                condition: Expr::Lit(Literal::Bool(true)),
                statements: vec![
                    Stmt::VarDef { name: "x".into(), var_type: None },
                    Stmt::Assign { name: "x".into(), expression: lit(2) },
                    print_stmt(vec![var("x")]),
                ],
                else_statements: vec![],
            },
            print_stmt(vec![var("x")]),
        ],
    );
    assert_eq!(run(&program(vec![main], vec![])), vec!["2", "1"]);
}

#[test]
fn struct_reference_semantics() {
    let n_struct = StructDef {
        name: "N".into(),
        fields: vec![Field { name: "v".into(), var_type: TypeTag::Int }],
    };
    let set_fn = func(
        "set",
        vec![arg("n", TypeTag::Struct("N".into()))],
        TypeTag::Void,
        vec![Stmt::Assign { name: "n.v".into(), expression: lit(42) }],
    );
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![
            Stmt::VarDef { name: "p".into(), var_type: Some(TypeTag::Struct("N".into())) },
            Stmt::Assign { name: "p".into(), expression: Expr::New { var_type: "N".into() } },
            Stmt::FCall { name: "set".into(), args: vec![var("p")] },
            print_stmt(vec![var("p.v")]),
        ],
    );
    assert_eq!(run(&program(vec![set_fn, main], vec![n_struct])), vec!["42"]);
}

#[test]
fn lazy_argument_is_memoized() {
    // e() prints "E" and returns 1; g(x) reads x twice. "E" must appear
    // exactly once even though x is read twice.
    let e_fn = func(
        "e",
        vec![],
        TypeTag::Int,
        vec![
            print_stmt(vec![Expr::Lit(Literal::Str("E".into()))]),
            Stmt::Return { expression: Some(lit(1)) },
        ],
    );
    let g_fn = func(
        "g",
        vec![arg("x", TypeTag::Int)],
        TypeTag::Void,
        vec![print_stmt(vec![var("x")]), print_stmt(vec![var("x")])],
    );
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![Stmt::FCall {
            name: "g".into(),
            args: vec![Expr::FCall { name: "e".into(), args: vec![] }],
        }],
    );
    assert_eq!(run(&program(vec![e_fn, g_fn, main], vec![])), vec!["E", "1", "1"]);
}

#[test]
fn reassignment_before_second_use_yields_new_value() {
    let h_fn = func(
        "h",
        vec![arg("x", TypeTag::Int)],
        TypeTag::Void,
        vec![
            print_stmt(vec![var("x")]),
            Stmt::Assign { name: "x".into(), expression: lit(99) },
            print_stmt(vec![var("x")]),
        ],
    );
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![Stmt::FCall { name: "h".into(), args: vec![lit(1)] }],
    );
    assert_eq!(run(&program(vec![h_fn, main], vec![])), vec!["1", "99"]);
}

#[test]
fn exception_catch_by_payload() {
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![Stmt::Try {
            statements: vec![Stmt::Raise {
                exception_type: Expr::Lit(Literal::Str("bad".into())),
            }],
            catchers: vec![
                Catcher { exception_type: "other".into(), statements: vec![print_stmt(vec![Expr::Lit(Literal::Str("o".into()))])] },
                Catcher { exception_type: "bad".into(), statements: vec![print_stmt(vec![Expr::Lit(Literal::Str("b".into()))])] },
            ],
        }],
    );
    assert_eq!(run(&program(vec![main], vec![])), vec!["b"]);
}

#[test]
fn div_by_zero_raises_catchable_div0() {
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![Stmt::Try {
            statements: vec![
                Stmt::VarDef { name: "z".into(), var_type: None },
                Stmt::Assign {
                    name: "z".into(),
                    expression: binary(BinOp::Div, lit(1), lit(0)),
                },
                print_stmt(vec![var("z")]),
            ],
            catchers: vec![Catcher {
                exception_type: "div0".into(),
                statements: vec![print_stmt(vec![Expr::Lit(Literal::Str("b".into()))])],
            }],
        }],
    );
    assert_eq!(run(&program(vec![main], vec![])), vec!["b"]);
}

#[test]
fn short_circuit_and_never_evaluates_right_operand() {
    let boom = func(
        "boom",
        vec![],
        TypeTag::Bool,
        vec![Stmt::Raise { exception_type: Expr::Lit(Literal::Str("never".into())) }],
    );
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![print_stmt(vec![binary(
            BinOp::And,
            Expr::Lit(Literal::Bool(false)),
            Expr::FCall { name: "boom".into(), args: vec![] },
        )])],
    );
    assert_eq!(run(&program(vec![boom, main], vec![])), vec!["false"]);
}

#[test]
fn null_deref_yields_fault_error() {
    let n_struct = StructDef {
        name: "N".into(),
        fields: vec![Field { name: "v".into(), var_type: TypeTag::Int }],
    };
    let main = func(
        "main",
        vec![],
        TypeTag::Void,
        vec![
            Stmt::VarDef { name: "p".into(), var_type: Some(TypeTag::Struct("N".into())) },
            print_stmt(vec![var("p.v")]),
        ],
    );
    let prog = program(vec![main], vec![n_struct]);
    let (structs, functions) = registry::build(&prog).expect("valid program");
    let mut host = BufferHost::default();
    let mut interp = Interp::new(&functions, &structs, &mut host, brewi::config::Level::Lazy);
    let env = Env::function();
    let err = call_expr(&mut interp, &env, "main", &[]).unwrap_err();
    match err {
        brewi::signal::Unwind::Fault(f) => assert_eq!(f.kind, brewi::error::ErrorKind::FaultError),
        other => panic!("expected a fault, got {:?}", std::mem::discriminant(&other)),
    }
}
