use formula_ast::foundation::{DataType, Value};
use formula_nodes::{AliasTableId, InstanceTableId};

use super::{BackEnd, TypeError, VectorInputs, accepts, widen};
use crate::functions::FunctionLibrary;
use crate::resolver::{DomainTables, ResolveError, Resolution, resolve};

const TABLES: DomainTables = DomainTables {
    aliases: &[AliasTableId::Geometry, AliasTableId::ShaderGeometry],
    instances: &[InstanceTableId::Geometry, InstanceTableId::Common],
};

/// Geometry node trees. Every catalog type has a socket.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryNodes;

impl BackEnd for GeometryNodes {
    fn vector_inputs(&self) -> VectorInputs {
        VectorInputs::Single
    }

    fn coerce_value(&self, value: Value, ty: DataType) -> Result<(Value, DataType), TypeError> {
        Ok((widen(value, ty)?, ty))
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
