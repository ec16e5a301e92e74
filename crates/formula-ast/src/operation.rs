//! The flat operation stream handed to the host graph builder.
//!
//! Operations follow a stack machine: operands are pushed first, then a call
//! consumes them. Order is significant. Every top-level statement ends with
//! exactly one [`Operation::EndOfStatement`] so a consumer can resynchronize
//! statement by statement.

use serde::Serialize;
use std::fmt;

use crate::foundation::{DataType, Value};
use crate::template::NodeTemplate;

/// Operation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpKind {
    /// Push a literal
    PushValue,
    /// Load a variable
    GetVar,
    /// Bind the top of the stack to a variable
    CreateVar,
    /// Instantiate a built-in node, consuming its arguments
    CallBuiltin,
    /// Statement boundary
    EndOfStatement,
}

/// One instruction of the operation stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// Push a literal with its resolved type.
    PushValue {
        /// Literal payload
        value: Value,
        /// Resolved type of the payload
        ty: DataType,
    },
    /// Load the variable with this name.
    GetVar {
        /// Variable name
        name: String,
    },
    /// Bind the value on top of the stack to this name.
    CreateVar {
        /// Variable name
        name: String,
    },
    /// Instantiate a node; the template key is the host node identifier.
    CallBuiltin {
        /// Lowered node template
        node: NodeTemplate,
    },
    /// End of a top-level statement.
    EndOfStatement,
}

impl Operation {
    /// Push a typed literal.
    pub fn push(value: Value, ty: DataType) -> Self {
        Operation::PushValue { value, ty }
    }

    /// Load a variable.
    pub fn get_var(name: impl Into<String>) -> Self {
        Operation::GetVar { name: name.into() }
    }

    /// Bind a variable.
    pub fn create_var(name: impl Into<String>) -> Self {
        Operation::CreateVar { name: name.into() }
    }

    /// Instantiate a node.
    pub fn call(node: NodeTemplate) -> Self {
        Operation::CallBuiltin { node }
    }

    /// Tag of this operation.
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::PushValue { .. } => OpKind::PushValue,
            Operation::GetVar { .. } => OpKind::GetVar,
            Operation::CreateVar { .. } => OpKind::CreateVar,
            Operation::CallBuiltin { .. } => OpKind::CallBuiltin,
            Operation::EndOfStatement => OpKind::EndOfStatement,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::PushValue { value, ty } => write!(f, "PUSH_VALUE {value}: {ty}"),
            Operation::GetVar { name } => write!(f, "GET_VAR {name}"),
            Operation::CreateVar { name } => write!(f, "CREATE_VAR {name}"),
            Operation::CallBuiltin { node } => {
                write!(f, "CALL_BUILTIN {}", node.key)?;
                for prop in node.props {
                    write!(f, " {}={}", prop.name, prop.value)?;
                }
                Ok(())
            }
            Operation::EndOfStatement => write!(f, "END_OF_STATEMENT"),
        }
    }
}
