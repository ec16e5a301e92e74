//! Back-end capability contract.
//!
//! A back end describes one target domain of the host: which types its
//! sockets carry, how literal inputs are materialized, and which overload
//! tables its calls resolve against. Back ends are flat structs; each one
//! implements [`BackEnd`] on top of its own alias and instance tables.

mod geometry;
mod shader;

pub use geometry::GeometryNodes;
pub use shader::ShaderNodes;

use formula_ast::foundation::{DataType, Value};
use formula_ast::operation::Operation;
use formula_ast::template::NodeTemplate;

use crate::functions::FunctionLibrary;
use crate::resolver::{ResolveError, Resolution};

/// How a back end materializes vector inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorInputs {
    /// One scalar input per component, joined by a combine node
    Flatten,
    /// A single vector input
    Single,
}

/// Failure of [`BackEnd::coerce_value`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The type exceeds what the domain's sockets can carry.
    #[error("can't coerce type {ty} to a {domain} value")]
    Unsupported {
        /// Requested type
        ty: DataType,
        /// Domain label
        domain: &'static str,
    },
    /// The value would have to be narrowed.
    #[error("can't convert {from} to {to} implicitly")]
    Narrowing {
        /// Type of the value
        from: DataType,
        /// Requested type
        to: DataType,
    },
}

/// Combine node used when vector inputs are flattened, already carrying the
/// host node identifier.
pub const COMBINE_XYZ: NodeTemplate = NodeTemplate::new("ShaderNodeCombineXYZ", &[0, 1, 2], &[0]);

/// Polymorphic surface of a target domain.
pub trait BackEnd {
    /// Whether vector inputs are flattened into components.
    fn vector_inputs(&self) -> VectorInputs;

    /// Coerce a value into `ty` and then into the closest type the domain
    /// accepts.
    ///
    /// Fails when `ty` is outside the domain or the value would have to be
    /// narrowed; never truncates silently.
    fn coerce_value(&self, value: Value, ty: DataType) -> Result<(Value, DataType), TypeError>;

    /// Pick the overload a call resolves to.
    fn resolve_function(
        &self,
        name: &str,
        args: &[DataType],
        functions: &FunctionLibrary,
    ) -> Result<Resolution, ResolveError>;

    /// Operations that bind `value` of type `ty` to the variable `name`.
    ///
    /// `Value::Default` leaves the host's default in place.
    fn create_input(&self, name: &str, value: Value, ty: DataType) -> Vec<Operation> {
        let mut operations = Vec::new();
        match (self.vector_inputs(), ty, value.components()) {
            (VectorInputs::Flatten, DataType::Vec3, Some(components)) => {
                for component in components {
                    operations.push(Operation::push(component, DataType::Float));
                }
                operations.push(Operation::call(COMBINE_XYZ));
            }
            _ => operations.push(Operation::push(value, ty)),
        }
        operations.push(Operation::create_var(name));
        operations
    }
}

/// Whether the domain's sockets carry `ty` unchanged.
pub fn accepts<B: BackEnd + ?Sized>(backend: &B, ty: DataType) -> bool {
    matches!(backend.coerce_value(Value::Default, ty), Ok((_, coerced)) if coerced == ty)
}

/// Widen `value` into `ty`.
pub(crate) fn widen(value: Value, ty: DataType) -> Result<Value, TypeError> {
    value.convert(ty).ok_or(TypeError::Narrowing {
        from: value.natural_type(),
        to: ty,
    })
}
