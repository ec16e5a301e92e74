use super::*;
use crate::backend::{BackEnd, GeometryNodes, ShaderNodes};
use formula_ast::template::PropValue;

use formula_ast::foundation::DataType::{Bool, Float, Geometry, Int, Vec3};

fn node_of(resolution: &Resolution) -> NodeTemplate {
    match &resolution.overload.callable {
        Callable::Node(template) => *template,
        Callable::Function(f) => panic!("expected a node, got function {}", f.name),
    }
}

fn operation_of(resolution: &Resolution) -> Option<&'static str> {
    node_of(resolution)
        .props
        .iter()
        .find(|prop| prop.name == "operation")
        .and_then(|prop| match prop.value {
            PropValue::Enum(value) => Some(value),
            _ => None,
        })
}

fn function(name: &str, params: &[DataType], output: DataType) -> GenericFunction {
    GenericFunction::new(
        name,
        params
            .iter()
            .enumerate()
            .map(|(i, ty)| (format!("arg{i}"), *ty))
            .collect(),
        vec![("result".to_string(), output)],
    )
}

#[test]
fn test_exact_integer_overload_wins_in_geometry() {
    let functions = FunctionLibrary::new();
    let resolution = GeometryNodes
        .resolve_function("add", &[Int, Int], &functions)
        .unwrap();

    assert_eq!(node_of(&resolution).key, "integer_math");
    assert_eq!(operation_of(&resolution), Some("ADD"));
    assert_eq!(resolution.cost, 0);
    assert_eq!(resolution.source, "geometry nodes");
    assert_eq!(resolution.param_types(), &[Int, Int]);
}

#[test]
fn test_shader_falls_back_to_float_math() {
    let functions = FunctionLibrary::new();
    let resolution = ShaderNodes
        .resolve_function("add", &[Float, Float], &functions)
        .unwrap();

    assert_eq!(node_of(&resolution).key, "math");
    assert_eq!(operation_of(&resolution), Some("ADD"));
    assert_eq!(resolution.cost, 0);
    assert_eq!(resolution.source, "nodes");
}

#[test]
fn test_widening_is_charged_per_step() {
    let functions = FunctionLibrary::new();
    let resolution = ShaderNodes
        .resolve_function("add", &[Int, Int], &functions)
        .unwrap();

    assert_eq!(node_of(&resolution).key, "math");
    assert_eq!(resolution.cost, 2);
}

#[test]
fn test_vector_scaled_by_scalar() {
    let functions = FunctionLibrary::new();
    let resolution = GeometryNodes
        .resolve_function("mul", &[Vec3, Float], &functions)
        .unwrap();
    assert_eq!(operation_of(&resolution), Some("SCALE"));
    assert_eq!(node_of(&resolution).inputs, &[0, 3]);

    let resolution = GeometryNodes
        .resolve_function("mul", &[Float, Vec3], &functions)
        .unwrap();
    assert_eq!(operation_of(&resolution), Some("SCALE"));
    assert_eq!(node_of(&resolution).inputs, &[3, 0]);
}

#[test]
fn test_first_registered_wins_ties() {
    let mut functions = FunctionLibrary::new();
    functions.register(function("blend", &[Float], Float));
    functions.register(function("blend", &[Float], Vec3));

    let resolution = GeometryNodes
        .resolve_function("blend", &[Float], &functions)
        .unwrap();
    assert_eq!(resolution.overload.output_types(), vec![Float]);
}

#[test]
fn test_nodes_win_ties_against_functions() {
    let mut functions = FunctionLibrary::new();
    functions.register(function("sqrt", &[Float], Float));

    let resolution = ShaderNodes
        .resolve_function("sqrt", &[Float], &functions)
        .unwrap();
    assert!(matches!(resolution.overload.callable, Callable::Node(_)));
    assert_eq!(resolution.source, "nodes");
}

#[test]
fn test_cheaper_function_beats_node() {
    let mut functions = FunctionLibrary::new();
    functions.register(function("sqrt", &[Int], Float));

    let resolution = GeometryNodes
        .resolve_function("sqrt", &[Int], &functions)
        .unwrap();
    assert!(matches!(resolution.overload.callable, Callable::Function(_)));
    assert_eq!(resolution.source, FUNCTIONS_LABEL);
    assert_eq!(resolution.cost, 0);
}

#[test]
fn test_aliases_are_domain_specific() {
    let functions = FunctionLibrary::new();
    let resolution = GeometryNodes
        .resolve_function("pos", &[], &functions)
        .unwrap();
    assert_eq!(node_of(&resolution).key, "input_position");

    let err = ShaderNodes.resolve_function("pos", &[], &functions).unwrap_err();
    assert_eq!(
        err,
        ResolveError::UnknownFunction {
            name: "pos".to_string(),
            args: vec![],
            searched: vec!["shader nodes", "nodes", "functions"],
        }
    );
}

#[test]
fn test_shared_alias_reaches_helpers() {
    let functions = FunctionLibrary::new();
    for backend in [&ShaderNodes as &dyn BackEnd, &GeometryNodes] {
        let resolution = backend
            .resolve_function("vec", &[Float, Float, Float], &functions)
            .unwrap();
        assert_eq!(node_of(&resolution).key, "combine_xyz");
    }
}

#[test]
fn test_reference_expands_to_target_candidates() {
    let functions = FunctionLibrary::new();
    let resolution = ShaderNodes
        .resolve_function("tex_coords", &[], &functions)
        .unwrap();

    assert_eq!(node_of(&resolution).key, "texture_coordinate");
    assert_eq!(resolution.output_names().len(), 7);
    assert!(resolution.overload.output_types().iter().all(|ty| *ty == Vec3));
}

#[test]
fn test_arity_selects_overload() {
    let functions = FunctionLibrary::new();
    let short = GeometryNodes
        .resolve_function("set_position", &[Geometry, Vec3], &functions)
        .unwrap();
    assert_eq!(node_of(&short).inputs, &[0, 2]);

    let long = GeometryNodes
        .resolve_function("set_position", &[Geometry, Bool, Vec3], &functions)
        .unwrap();
    assert_eq!(node_of(&long).inputs, &[0, 1, 2]);

    let err = GeometryNodes
        .resolve_function("set_position", &[Geometry; 5], &functions)
        .unwrap_err();
    assert!(matches!(err, ResolveError::NoMatchingOverload { .. }));
}

#[test]
fn test_shader_disqualifies_parameters_it_cannot_carry() {
    let mut functions = FunctionLibrary::new();
    functions.register(function("flag", &[Bool], Float));

    assert!(GeometryNodes.resolve_function("flag", &[Bool], &functions).is_ok());
    let err = ShaderNodes
        .resolve_function("flag", &[Float], &functions)
        .unwrap_err();
    assert!(matches!(err, ResolveError::NoMatchingOverload { .. }));
}

#[test]
fn test_no_overload_message_names_the_call() {
    let functions = FunctionLibrary::new();
    let err = ShaderNodes
        .resolve_function("add", &[Geometry, Geometry], &functions)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'add'"), "{message}");
    assert!(message.contains("(geometry, geometry)"), "{message}");
    assert!(!message.contains("searched"), "{message}");
    assert_eq!(err.searched(), ["shader nodes", "nodes", "functions"]);
}

#[test]
fn test_resolution_is_deterministic() {
    let functions = FunctionLibrary::new();
    let first = GeometryNodes.resolve_function("less_than", &[Int, Float], &functions);
    for _ in 0..10 {
        assert_eq!(
            GeometryNodes.resolve_function("less_than", &[Int, Float], &functions),
            first
        );
    }
    assert_eq!(first.map(|r| r.param_types().to_vec()), Ok(vec![Float, Float]));
}
