use formula_ast::foundation::{DataType, Value};
use formula_nodes::{AliasTableId, InstanceTableId};

use super::{BackEnd, TypeError, VectorInputs, accepts, widen};
use crate::functions::FunctionLibrary;
use crate::resolver::{DomainTables, ResolveError, Resolution, resolve};

const TABLES: DomainTables = DomainTables {
    aliases: &[AliasTableId::Shader, AliasTableId::ShaderGeometry],
    instances: &[InstanceTableId::Shader, InstanceTableId::Common],
};

/// Shader node trees.
///
/// Sockets carry nothing above `Vec3`, and there are no boolean or integer
/// sockets: both are carried as floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderNodes;

impl ShaderNodes {
    /// Label used in diagnostics.
    pub const DOMAIN: &'static str = "shader nodes";
}

impl BackEnd for ShaderNodes {
    fn vector_inputs(&self) -> VectorInputs {
        VectorInputs::Flatten
    }

    fn coerce_value(&self, value: Value, ty: DataType) -> Result<(Value, DataType), TypeError> {
        if ty > DataType::Vec3 {
            return Err(TypeError::Unsupported {
                ty,
                domain: Self::DOMAIN,
            });
        }
        let value = widen(value, ty)?;
        if matches!(ty, DataType::Bool | DataType::Int) {
            return Ok((widen(value, DataType::Float)?, DataType::Float));
        }
        Ok((value, ty))
    }

    fn resolve_function(
        &self,
        name: &str,
        args: &[DataType],
        functions: &FunctionLibrary,
    ) -> Result<Resolution, ResolveError> {
        resolve(&TABLES, name, args, functions, |ty| accepts(self, ty))
    }
}
