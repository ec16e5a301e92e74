//! Callable descriptors: built-in graph nodes and generic functions.
//!
//! Two layers describe the host's node types:
//!
//! - [`BuiltinNode`]: one entry of the process-wide node catalog, with the
//!   host's node identifier and its full socket lists.
//! - [`NodeTemplate`]: one overload built on top of a catalog entry. It lists
//!   the input sockets bound to call arguments and the outputs returned as
//!   results, plus construction properties and pinned input values.
//!
//! Both are `'static` data, built once and never mutated. Overload
//! resolution turns either a template or a [`GenericFunction`] into a
//! [`FunctionOverload`], the signature the type checker works with.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::foundation::{DataType, Value};

/// Named, typed socket of a catalog node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Socket {
    /// Socket identifier on the host node
    pub name: &'static str,
    /// Socket type
    pub ty: DataType,
}

impl Socket {
    /// Const constructor for static tables.
    pub const fn new(name: &'static str, ty: DataType) -> Self {
        Self { name, ty }
    }
}

/// Entry of the node catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuiltinNode {
    /// Abstract key used by templates (e.g. `math`)
    pub key: &'static str,
    /// Host node identifier (e.g. `ShaderNodeMath`)
    pub host_name: &'static str,
    /// Input sockets in host order
    pub inputs: &'static [Socket],
    /// Output sockets in host order
    pub outputs: &'static [Socket],
}

/// Value of an extra construction property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Enum item identifier, e.g. `ADD`
    Enum(&'static str),
    /// Boolean flag
    Bool(bool),
    /// Integer setting
    Int(i64),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Enum(item) => f.write_str(item),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Extra construction property set on the host node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prop {
    /// Property identifier
    pub name: &'static str,
    /// Property value
    pub value: PropValue,
}

/// Value the host must set on an input socket that takes no argument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SocketDefault {
    /// Input socket index
    pub socket: usize,
    /// Value to set
    pub value: Value,
}

/// Immutable descriptor of one built-in node overload.
///
/// `key` names a [`BuiltinNode`] while the template sits in an instance
/// table. When the lowering compiler emits the template it substitutes the
/// host node identifier for the key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeTemplate {
    /// Catalog key, or host identifier once lowered
    pub key: &'static str,
    /// Input socket indices bound to call arguments, in argument order
    pub inputs: &'static [usize],
    /// Output socket indices that are call results, in result order
    pub outputs: &'static [usize],
    /// Extra construction properties
    pub props: &'static [Prop],
    /// Values pinned on unbound inputs; other unbound inputs keep host defaults
    pub defaults: &'static [SocketDefault],
}

impl NodeTemplate {
    /// Template without properties or pinned defaults.
    pub const fn new(key: &'static str, inputs: &'static [usize], outputs: &'static [usize]) -> Self {
        Self {
            key,
            inputs,
            outputs,
            props: &[],
            defaults: &[],
        }
    }

    /// Same template with construction properties.
    pub const fn with_props(self, props: &'static [Prop]) -> Self {
        Self { props, ..self }
    }

    /// Same template with pinned socket defaults.
    pub const fn with_defaults(self, defaults: &'static [SocketDefault]) -> Self {
        Self { defaults, ..self }
    }
}

/// Backend-agnostic callable signature registered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericFunction {
    /// Call name
    pub name: String,
    /// Parameter names and types
    pub params: Vec<(String, DataType)>,
    /// Output names and types
    pub outputs: Vec<(String, DataType)>,
}

impl GenericFunction {
    /// Create a function signature.
    pub fn new(
        name: impl Into<String>,
        params: Vec<(String, DataType)>,
        outputs: Vec<(String, DataType)>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            outputs,
        }
    }
}

/// What a resolved overload calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    /// Built-in graph node
    Node(NodeTemplate),
    /// Generic function from the host's library
    Function(Arc<GenericFunction>),
}

/// One signature of a possibly overloaded name.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionOverload {
    /// Name the overload was found under (after alias mapping)
    pub name: String,
    /// Parameter types, in argument order
    pub params: Vec<DataType>,
    /// Output names and types, in result order
    pub outputs: Vec<(String, DataType)>,
    /// Node template or generic function
    pub callable: Callable,
}

impl FunctionOverload {
    /// Types the arguments are coerced into.
    pub fn param_types(&self) -> &[DataType] {
        &self.params
    }

    /// Output names, in result order.
    pub fn output_names(&self) -> Vec<&str> {
        self.outputs.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Output types, in result order.
    pub fn output_types(&self) -> Vec<DataType> {
        self.outputs.iter().map(|(_, ty)| *ty).collect()
    }
}
