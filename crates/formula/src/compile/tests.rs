use super::*;
use formula_ast::template::{Callable, FunctionOverload, GenericFunction, NodeTemplate};
use formula_ast::{DataType, ExprType, TyExpr, TyExprKind, TyStmt, TyStmtKind, Value};
use formula_resolve::{GeometryNodes, ShaderNodes};
use std::path::PathBuf;

fn ops(compilation: &Compilation) -> Vec<String> {
    compilation.operations.iter().map(ToString::to_string).collect()
}

fn compile_ok<B: BackEnd>(backend: B, source: &str) -> Vec<String> {
    let compilation = Compiler::new(backend).compile(source).unwrap();
    assert!(compilation.succeeded(), "unexpected errors: {:?}", compilation.errors);
    ops(&compilation)
}

#[test]
fn test_expression_assignment() {
    assert_eq!(
        compile_ok(ShaderNodes, "y = x * 2"),
        vec![
            "PUSH_VALUE default: float",
            "CREATE_VAR x",
            "GET_VAR x",
            "PUSH_VALUE 2.0: float",
            "CALL_BUILTIN ShaderNodeMath operation=MULTIPLY",
            "CREATE_VAR y",
            "END_OF_STATEMENT",
        ]
    );
}

#[test]
fn test_literal_assignment_becomes_input() {
    assert_eq!(
        compile_ok(GeometryNodes, "v = (1, 2, 3)"),
        vec!["PUSH_VALUE (1.0, 2.0, 3.0): vec3", "CREATE_VAR v", "END_OF_STATEMENT"]
    );
}

#[test]
fn test_shader_flattens_vector_inputs() {
    assert_eq!(
        compile_ok(ShaderNodes, "v = (1, 2, 3)"),
        vec![
            "PUSH_VALUE 1.0: float",
            "PUSH_VALUE 2.0: float",
            "PUSH_VALUE 3.0: float",
            "CALL_BUILTIN ShaderNodeCombineXYZ",
            "CREATE_VAR v",
            "END_OF_STATEMENT",
        ]
    );
}

#[test]
fn test_lowered_templates_keep_defaults() {
    let compilation = Compiler::new(ShaderNodes).compile("-x").unwrap();
    let Some(Operation::CallBuiltin { node }) = compilation.operations.get(3) else {
        panic!("expected a call, got {:?}", compilation.operations);
    };
    assert_eq!(node.key, "ShaderNodeMath");
    assert_eq!(node.inputs, &[1]);
    assert_eq!(node.defaults.len(), 1);
}

#[test]
fn test_invalid_character_is_a_syntax_error() {
    let compilation = Compiler::new(GeometryNodes).compile("y = 2 $ 3").unwrap();

    assert_eq!(compilation.errors.len(), 1);
    let error = &compilation.errors[0];
    assert_eq!(error.kind, ErrorKind::Syntax);
    assert_eq!(error.span, Span::new(0, 6, 7));
    assert!(error.message.contains('$'));
    assert!(compilation.typed.is_none());
}

#[test]
fn test_syntax_errors_skip_checking() {
    let compilation = Compiler::new(GeometryNodes)
        .compile("x = ; y = foo(1); z = (1 +")
        .unwrap();

    assert_eq!(compilation.errors.len(), 2);
    assert!(compilation.has_syntax_errors());
    assert!(compilation.typed.is_none());
    assert!(compilation.operations.is_empty());
}

#[test]
fn test_type_errors_keep_typed_tree() {
    let compilation = Compiler::new(GeometryNodes).compile("foo(1)").unwrap();

    assert!(!compilation.succeeded());
    assert!(!compilation.has_syntax_errors());
    assert!(compilation.operations.is_empty());
    assert_eq!(compilation.typed.map(|typed| typed.body.len()), Some(1));
}

#[test]
fn test_generic_function_calls_are_unsupported() {
    let mut functions = FunctionLibrary::new();
    functions.register(GenericFunction::new(
        "ripple",
        vec![("t".to_string(), DataType::Float)],
        vec![("value".to_string(), DataType::Float)],
    ));
    let compiler = Compiler::with_functions(ShaderNodes, functions);

    let err = compiler.compile("y = ripple(1)").unwrap_err();
    assert!(matches!(err, Fatal::Unsupported { .. }), "{err}");
    assert!(err.to_string().contains("ripple"));
}

#[test]
fn test_empty_statements_produce_nothing() {
    assert!(compile_ok(GeometryNodes, "").is_empty());
    assert!(compile_ok(GeometryNodes, "; ;  # nothing here").is_empty());
}

#[test]
fn test_compiler_is_reusable() {
    let compiler = Compiler::new(ShaderNodes);
    let first = compiler.compile("a = sin(t); b = a + t").unwrap();
    let second = compiler.compile("a = sin(t); b = a + t").unwrap();
    assert_eq!(first, second);

    // No variables leak between compiles
    let other = compiler.compile("b = a").unwrap();
    assert_eq!(other.operations[0], Operation::push(Value::Default, DataType::Float));
}

#[test]
fn test_format_errors_with_sources() {
    let source = "y = foo(1)";
    let mut sources = SourceMap::new();
    let file_id = sources.add_file(PathBuf::from("wave.txt"), source.to_string());

    let compilation = Compiler::new(GeometryNodes)
        .compile_file(source, file_id)
        .unwrap();
    let formatted = format_errors(&compilation.errors, &sources);

    assert!(formatted.starts_with("error: unresolved function: "), "{formatted}");
    assert!(formatted.contains("wave.txt:1:5"), "{formatted}");
    assert!(formatted.contains("^^^^^^"), "{formatted}");
}

#[test]
fn test_lex_collects_every_invalid_character() {
    let (tokens, errors) = lex("a @ b $", 3);
    assert_eq!(tokens.len(), 2);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.span.file_id == 3));
}

fn statement(expr: TyExpr) -> TyStmt {
    TyStmt {
        span: expr.span,
        kind: TyStmtKind::Expr(expr),
    }
}

fn float_const(value: f64, span: Span) -> TyExpr {
    TyExpr::new(
        TyExprKind::Const {
            value: Value::Float(value),
        },
        ExprType::Single(DataType::Float),
        span,
    )
}

#[test]
fn test_error_node_is_an_internal_error() {
    let span = Span::new(0, 2, 5);
    let program = TyProgram {
        body: vec![statement(TyExpr::error(span))],
    };

    let err = lower(&program, &ShaderNodes).unwrap_err();
    assert!(matches!(err, Fatal::Internal { span: s, .. } if s == span), "{err}");
    assert!(err.to_string().starts_with("internal compiler error"), "{err}");
}

#[test]
fn test_uncatalogued_template_is_an_internal_error() {
    let span = Span::new(0, 0, 9);
    let call = TyExpr::new(
        TyExprKind::Call {
            name: "mystery".to_string(),
            overload: FunctionOverload {
                name: "mystery".to_string(),
                params: vec![DataType::Float],
                outputs: vec![("value".to_string(), DataType::Float)],
                callable: Callable::Node(NodeTemplate::new("missing_node", &[0], &[0])),
            },
            args: vec![float_const(1.0, Span::new(0, 8, 9))],
        },
        ExprType::Single(DataType::Float),
        span,
    );

    let err = lower(&TyProgram { body: vec![statement(call)] }, &GeometryNodes).unwrap_err();
    assert!(matches!(err, Fatal::Internal { .. }), "{err}");
    assert!(err.to_string().contains("missing_node"), "{err}");
}

#[test]
fn test_internal_error_discards_earlier_statements() {
    let program = TyProgram {
        body: vec![
            statement(float_const(2.0, Span::new(0, 0, 3))),
            statement(TyExpr::error(Span::new(0, 5, 8))),
        ],
    };

    let result = lower(&program, &GeometryNodes);
    assert!(matches!(result, Err(Fatal::Internal { .. })), "{result:?}");
}
