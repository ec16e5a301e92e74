//! The node catalog: every host node a template may instantiate.
//!
//! Socket lists follow the host node's socket order; templates refer to
//! sockets by index into these lists.

use formula_ast::foundation::DataType::{self, Bool, Float, Geometry, Int, Vec3};
use formula_ast::template::{BuiltinNode, Socket};

const fn s(name: &'static str, ty: DataType) -> Socket {
    Socket::new(name, ty)
}

const MATH_IN: &[Socket] = &[s("value", Float), s("value_001", Float), s("value_002", Float)];
const MATH_OUT: &[Socket] = &[s("value", Float)];

const VECTOR_MATH_IN: &[Socket] = &[
    s("vector", Vec3),
    s("vector_001", Vec3),
    s("vector_002", Vec3),
    s("scale", Float),
];
const VECTOR_MATH_OUT: &[Socket] = &[s("vector", Vec3), s("value", Float)];

const INTEGER_MATH_IN: &[Socket] = &[s("value", Int), s("value_001", Int), s("value_002", Int)];
const INTEGER_MATH_OUT: &[Socket] = &[s("value", Int)];

const BOOLEAN_MATH_IN: &[Socket] = &[s("boolean", Bool), s("boolean_001", Bool)];
const BOOLEAN_MATH_OUT: &[Socket] = &[s("boolean", Bool)];

const COMPARE_IN: &[Socket] = &[
    s("a", Float),
    s("b", Float),
    s("a_int", Int),
    s("b_int", Int),
    s("a_vec3", Vec3),
    s("b_vec3", Vec3),
    s("epsilon", Float),
];
const COMPARE_OUT: &[Socket] = &[s("result", Bool)];

const XYZ: &[Socket] = &[s("x", Float), s("y", Float), s("z", Float)];
const VECTOR: &[Socket] = &[s("vector", Vec3)];

const TEX_COORD_OUT: &[Socket] = &[
    s("generated", Vec3),
    s("normal", Vec3),
    s("uv", Vec3),
    s("object", Vec3),
    s("camera", Vec3),
    s("window", Vec3),
    s("reflection", Vec3),
];

const NEW_GEOMETRY_OUT: &[Socket] = &[
    s("position", Vec3),
    s("normal", Vec3),
    s("tangent", Vec3),
    s("true_normal", Vec3),
    s("incoming", Vec3),
    s("parametric", Vec3),
    s("backfacing", Float),
    s("pointiness", Float),
];

const MAP_RANGE_IN: &[Socket] = &[
    s("value", Float),
    s("from_min", Float),
    s("from_max", Float),
    s("to_min", Float),
    s("to_max", Float),
];
const CLAMP_IN: &[Socket] = &[s("value", Float), s("min", Float), s("max", Float)];
const RESULT: &[Socket] = &[s("result", Float)];

const SET_POSITION_IN: &[Socket] = &[
    s("geometry", Geometry),
    s("selection", Bool),
    s("position", Vec3),
    s("offset", Vec3),
];
const GEOMETRY_OUT: &[Socket] = &[s("geometry", Geometry)];

const POSITION_OUT: &[Socket] = &[s("position", Vec3)];
const NORMAL_OUT: &[Socket] = &[s("normal", Vec3)];
const INDEX_OUT: &[Socket] = &[s("index", Int)];

/// Every built-in node, keyed by the abstract key templates use.
pub static NODES: &[BuiltinNode] = &[
    BuiltinNode {
        key: "math",
        host_name: "ShaderNodeMath",
        inputs: MATH_IN,
        outputs: MATH_OUT,
    },
    BuiltinNode {
        key: "vector_math",
        host_name: "ShaderNodeVectorMath",
        inputs: VECTOR_MATH_IN,
        outputs: VECTOR_MATH_OUT,
    },
    BuiltinNode {
        key: "integer_math",
        host_name: "FunctionNodeIntegerMath",
        inputs: INTEGER_MATH_IN,
        outputs: INTEGER_MATH_OUT,
    },
    BuiltinNode {
        key: "boolean_math",
        host_name: "FunctionNodeBooleanMath",
        inputs: BOOLEAN_MATH_IN,
        outputs: BOOLEAN_MATH_OUT,
    },
    BuiltinNode {
        key: "compare",
        host_name: "FunctionNodeCompare",
        inputs: COMPARE_IN,
        outputs: COMPARE_OUT,
    },
    BuiltinNode {
        key: "combine_xyz",
        host_name: "ShaderNodeCombineXYZ",
        inputs: XYZ,
        outputs: VECTOR,
    },
    BuiltinNode {
        key: "separate_xyz",
        host_name: "ShaderNodeSeparateXYZ",
        inputs: VECTOR,
        outputs: XYZ,
    },
    BuiltinNode {
        key: "map_range",
        host_name: "ShaderNodeMapRange",
        inputs: MAP_RANGE_IN,
        outputs: RESULT,
    },
    BuiltinNode {
        key: "clamp",
        host_name: "ShaderNodeClamp",
        inputs: CLAMP_IN,
        outputs: RESULT,
    },
    BuiltinNode {
        key: "texture_coordinate",
        host_name: "ShaderNodeTexCoord",
        inputs: &[],
        outputs: TEX_COORD_OUT,
    },
    BuiltinNode {
        key: "new_geometry",
        host_name: "ShaderNodeNewGeometry",
        inputs: &[],
        outputs: NEW_GEOMETRY_OUT,
    },
    BuiltinNode {
        key: "input_position",
        host_name: "GeometryNodeInputPosition",
        inputs: &[],
        outputs: POSITION_OUT,
    },
    BuiltinNode {
        key: "input_normal",
        host_name: "GeometryNodeInputNormal",
        inputs: &[],
        outputs: NORMAL_OUT,
    },
    BuiltinNode {
        key: "input_index",
        host_name: "GeometryNodeInputIndex",
        inputs: &[],
        outputs: INDEX_OUT,
    },
    BuiltinNode {
        key: "set_position",
        host_name: "GeometryNodeSetPosition",
        inputs: SET_POSITION_IN,
        outputs: GEOMETRY_OUT,
    },
];
