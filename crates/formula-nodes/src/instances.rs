//! Instance tables: overload sets of node templates, keyed by call name.
//!
//! Within one entry list, candidates are listed in registration order. The
//! resolver scans them in that order and keeps the first cheapest match, so
//! earlier entries win ties.

use formula_ast::foundation::Value;
use formula_ast::template::{NodeTemplate, Prop, PropValue, SocketDefault};

/// One candidate of an instance table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry {
    /// A concrete node overload
    Node(NodeTemplate),
    /// Every candidate registered under another call name
    Ref(&'static str),
}

/// Call name to candidates.
pub type InstanceTable = &'static [(&'static str, &'static [Entry])];

/// `node!("math", [0, 1] => [0], operation = "ADD"; 2 = Value::Float(0.0))`
macro_rules! node {
    ($key:literal, [$($i:literal),*] => [$($o:literal),*]
        $(, $prop:ident = $val:literal)*
        $(; $($socket:literal = $default:expr),+)?) => {
        Entry::Node(
            NodeTemplate::new($key, &[$($i),*], &[$($o),*])
                .with_props(&[$(Prop { name: stringify!($prop), value: PropValue::Enum($val) }),*])
                $(.with_defaults(&[$(SocketDefault { socket: $socket, value: $default }),+]))?
        )
    };
}

/// Domain-independent overloads: float math, vector math and helpers
/// available in both shader and geometry node trees.
pub static INSTANCES: InstanceTable = &[
    (
        "add",
        &[
            node!("math", [0, 1] => [0], operation = "ADD"),
            node!("vector_math", [0, 1] => [0], operation = "ADD"),
        ],
    ),
    (
        "sub",
        &[
            node!("math", [0, 1] => [0], operation = "SUBTRACT"),
            node!("vector_math", [0, 1] => [0], operation = "SUBTRACT"),
        ],
    ),
    (
        "mul",
        &[
            node!("math", [0, 1] => [0], operation = "MULTIPLY"),
            node!("vector_math", [0, 3] => [0], operation = "SCALE"),
            node!("vector_math", [3, 0] => [0], operation = "SCALE"),
            node!("vector_math", [0, 1] => [0], operation = "MULTIPLY"),
        ],
    ),
    (
        "div",
        &[
            node!("math", [0, 1] => [0], operation = "DIVIDE"),
            node!("vector_math", [0, 1] => [0], operation = "DIVIDE"),
        ],
    ),
    (
        "mod",
        &[
            node!("math", [0, 1] => [0], operation = "MODULO"),
            node!("vector_math", [0, 1] => [0], operation = "MODULO"),
        ],
    ),
    ("pow", &[node!("math", [0, 1] => [0], operation = "POWER")]),
    (
        "neg",
        &[
            node!("math", [1] => [0], operation = "SUBTRACT"; 0 = Value::Float(0.0)),
            node!("vector_math", [0] => [0], operation = "SCALE"; 3 = Value::Float(-1.0)),
        ],
    ),
    ("less_than", &[node!("math", [0, 1] => [0], operation = "LESS_THAN")]),
    ("greater_than", &[node!("math", [0, 1] => [0], operation = "GREATER_THAN")]),
    (
        "equal",
        &[node!("math", [0, 1] => [0], operation = "COMPARE"; 2 = Value::Float(0.0))],
    ),
    ("sqrt", &[node!("math", [0] => [0], operation = "SQRT")]),
    ("exp", &[node!("math", [0] => [0], operation = "EXPONENT")]),
    ("log", &[node!("math", [0, 1] => [0], operation = "LOGARITHM")]),
    (
        "abs",
        &[
            node!("math", [0] => [0], operation = "ABSOLUTE"),
            node!("vector_math", [0] => [0], operation = "ABSOLUTE"),
        ],
    ),
    ("sign", &[node!("math", [0] => [0], operation = "SIGN")]),
    ("round", &[node!("math", [0] => [0], operation = "ROUND")]),
    (
        "floor",
        &[
            node!("math", [0] => [0], operation = "FLOOR"),
            node!("vector_math", [0] => [0], operation = "FLOOR"),
        ],
    ),
    (
        "ceil",
        &[
            node!("math", [0] => [0], operation = "CEIL"),
            node!("vector_math", [0] => [0], operation = "CEIL"),
        ],
    ),
    (
        "fract",
        &[
            node!("math", [0] => [0], operation = "FRACT"),
            node!("vector_math", [0] => [0], operation = "FRACTION"),
        ],
    ),
    (
        "min",
        &[
            node!("math", [0, 1] => [0], operation = "MINIMUM"),
            node!("vector_math", [0, 1] => [0], operation = "MINIMUM"),
        ],
    ),
    (
        "max",
        &[
            node!("math", [0, 1] => [0], operation = "MAXIMUM"),
            node!("vector_math", [0, 1] => [0], operation = "MAXIMUM"),
        ],
    ),
    (
        "multiply_add",
        &[node!("math", [0, 1, 2] => [0], operation = "MULTIPLY_ADD")],
    ),
    (
        "sin",
        &[
            node!("math", [0] => [0], operation = "SINE"),
            node!("vector_math", [0] => [0], operation = "SINE"),
        ],
    ),
    (
        "cos",
        &[
            node!("math", [0] => [0], operation = "COSINE"),
            node!("vector_math", [0] => [0], operation = "COSINE"),
        ],
    ),
    (
        "tan",
        &[
            node!("math", [0] => [0], operation = "TANGENT"),
            node!("vector_math", [0] => [0], operation = "TANGENT"),
        ],
    ),
    ("atan2", &[node!("math", [0, 1] => [0], operation = "ARCTAN2")]),
    ("dot", &[node!("vector_math", [0, 1] => [1], operation = "DOT_PRODUCT")]),
    ("cross", &[node!("vector_math", [0, 1] => [0], operation = "CROSS_PRODUCT")]),
    ("length", &[node!("vector_math", [0] => [1], operation = "LENGTH")]),
    ("distance", &[node!("vector_math", [0, 1] => [1], operation = "DISTANCE")]),
    ("normalize", &[node!("vector_math", [0] => [0], operation = "NORMALIZE")]),
    ("combine_xyz", &[node!("combine_xyz", [0, 1, 2] => [0])]),
    ("separate_xyz", &[node!("separate_xyz", [0] => [0, 1, 2])]),
    (
        "map_range",
        &[
            node!("map_range", [0, 1, 2, 3, 4] => [0], interpolation_type = "LINEAR"),
            node!("map_range", [0, 3, 4] => [0], interpolation_type = "LINEAR"),
        ],
    ),
    ("clamp", &[node!("clamp", [0, 1, 2] => [0], clamp_type = "MINMAX")]),
];

/// Overloads only shader node trees have. Shader trees carry no boolean
/// sockets, so logic runs on floats.
pub static SHADER_INSTANCES: InstanceTable = &[
    ("tex_coords", &[Entry::Ref("texture_coordinate")]),
    (
        "texture_coordinate",
        &[node!("texture_coordinate", [] => [0, 1, 2, 3, 4, 5, 6])],
    ),
    ("normal", &[node!("texture_coordinate", [] => [1])]),
    ("geometry", &[node!("new_geometry", [] => [0, 1, 2, 3, 4, 5, 6, 7])]),
    ("position", &[node!("new_geometry", [] => [0])]),
    ("and", &[node!("math", [0, 1] => [0], operation = "MULTIPLY")]),
    ("or", &[node!("math", [0, 1] => [0], operation = "MAXIMUM")]),
    (
        "not",
        &[node!("math", [1] => [0], operation = "SUBTRACT"; 0 = Value::Float(1.0))],
    ),
];

/// Overloads only geometry node trees have: integer and boolean math,
/// typed comparisons, field inputs and geometry operations.
pub static GEOMETRY_INSTANCES: InstanceTable = &[
    ("add", &[node!("integer_math", [0, 1] => [0], operation = "ADD")]),
    ("sub", &[node!("integer_math", [0, 1] => [0], operation = "SUBTRACT")]),
    ("mul", &[node!("integer_math", [0, 1] => [0], operation = "MULTIPLY")]),
    ("mod", &[node!("integer_math", [0, 1] => [0], operation = "MODULO")]),
    ("pow", &[node!("integer_math", [0, 1] => [0], operation = "POWER")]),
    ("neg", &[node!("integer_math", [0] => [0], operation = "NEGATE")]),
    ("abs", &[node!("integer_math", [0] => [0], operation = "ABSOLUTE")]),
    ("sign", &[node!("integer_math", [0] => [0], operation = "SIGN")]),
    ("min", &[node!("integer_math", [0, 1] => [0], operation = "MINIMUM")]),
    ("max", &[node!("integer_math", [0, 1] => [0], operation = "MAXIMUM")]),
    ("and", &[node!("boolean_math", [0, 1] => [0], operation = "AND")]),
    ("or", &[node!("boolean_math", [0, 1] => [0], operation = "OR")]),
    ("not", &[node!("boolean_math", [0] => [0], operation = "NOT")]),
    (
        "less_than",
        &[
            node!("compare", [2, 3] => [0], data_type = "INT", operation = "LESS_THAN"),
            node!("compare", [0, 1] => [0], data_type = "FLOAT", operation = "LESS_THAN"),
        ],
    ),
    (
        "less_equal",
        &[
            node!("compare", [2, 3] => [0], data_type = "INT", operation = "LESS_EQUAL"),
            node!("compare", [0, 1] => [0], data_type = "FLOAT", operation = "LESS_EQUAL"),
        ],
    ),
    (
        "greater_than",
        &[
            node!("compare", [2, 3] => [0], data_type = "INT", operation = "GREATER_THAN"),
            node!("compare", [0, 1] => [0], data_type = "FLOAT", operation = "GREATER_THAN"),
        ],
    ),
    (
        "greater_equal",
        &[
            node!("compare", [2, 3] => [0], data_type = "INT", operation = "GREATER_EQUAL"),
            node!("compare", [0, 1] => [0], data_type = "FLOAT", operation = "GREATER_EQUAL"),
        ],
    ),
    (
        "equal",
        &[
            node!("boolean_math", [0, 1] => [0], operation = "XNOR"),
            node!("compare", [2, 3] => [0], data_type = "INT", operation = "EQUAL"),
            node!("compare", [0, 1] => [0], data_type = "FLOAT", operation = "EQUAL"),
            node!("compare", [4, 5] => [0], data_type = "VECTOR", mode = "ELEMENT", operation = "EQUAL"),
        ],
    ),
    (
        "not_equal",
        &[
            node!("boolean_math", [0, 1] => [0], operation = "XOR"),
            node!("compare", [2, 3] => [0], data_type = "INT", operation = "NOT_EQUAL"),
            node!("compare", [0, 1] => [0], data_type = "FLOAT", operation = "NOT_EQUAL"),
            node!("compare", [4, 5] => [0], data_type = "VECTOR", mode = "ELEMENT", operation = "NOT_EQUAL"),
        ],
    ),
    ("position", &[node!("input_position", [] => [0])]),
    ("normal", &[node!("input_normal", [] => [0])]),
    ("index", &[node!("input_index", [] => [0])]),
    (
        "set_position",
        &[
            node!("set_position", [0, 2] => [0]),
            node!("set_position", [0, 1, 2] => [0]),
            node!("set_position", [0, 1, 2, 3] => [0]),
        ],
    ),
];
