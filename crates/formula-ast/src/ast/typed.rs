//! Typed syntax tree produced by the type checker.
//!
//! Mirrors [`super::untyped`] node for node, with two exceptions: a negated
//! literal (`-2`) and a vector of three numeric literals each fold into a
//! single `Const`. Operators have become calls, every call carries the
//! overload the resolver picked, and constants carry values already coerced
//! into the type they are used at.

use serde::Serialize;

use crate::foundation::{DataType, Span, Value, format_types};
use crate::template::FunctionOverload;

/// Resolved type of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprType {
    /// A single value
    Single(DataType),
    /// Named outputs of a multi-output call, in result order
    Multi(Vec<(String, DataType)>),
}

impl ExprType {
    /// The single type, if this is not a multi-output result.
    pub fn single(&self) -> Option<DataType> {
        match self {
            ExprType::Single(ty) => Some(*ty),
            ExprType::Multi(_) => None,
        }
    }

    /// Whether checking this expression failed.
    pub fn is_unknown(&self) -> bool {
        matches!(self, ExprType::Single(DataType::Unknown))
    }

    /// Result type of a call with these outputs.
    pub fn from_outputs(outputs: &[(String, DataType)]) -> Self {
        match outputs {
            [(_, ty)] => ExprType::Single(*ty),
            _ => ExprType::Multi(outputs.to_vec()),
        }
    }
}

impl std::fmt::Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprType::Single(ty) => write!(f, "{ty}"),
            ExprType::Multi(outputs) => {
                let types: Vec<DataType> = outputs.iter().map(|(_, ty)| *ty).collect();
                f.write_str(&format_types(&types))
            }
        }
    }
}

/// Typed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TyExpr {
    /// Expression variant
    pub kind: TyExprKind,
    /// Resolved type
    pub ty: ExprType,
    /// Source location
    pub span: Span,
}

impl TyExpr {
    /// Create a typed expression.
    pub fn new(kind: TyExprKind, ty: ExprType, span: Span) -> Self {
        Self { kind, ty, span }
    }

    /// Placeholder for an expression whose checking failed.
    pub fn error(span: Span) -> Self {
        Self::new(TyExprKind::Error, ExprType::Single(DataType::Unknown), span)
    }
}

/// Typed expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum TyExprKind {
    /// Literal, already coerced into the expression type
    Const {
        /// Coerced payload
        value: Value,
    },
    /// Variable load
    Var {
        /// Variable name
        name: String,
        /// First read of a never-assigned name; lowering materializes a
        /// default input before the load
        needs_instantiation: bool,
    },
    /// Call of a resolved overload
    Call {
        /// Name as seen by the resolver, before alias mapping
        name: String,
        /// Selected overload
        overload: FunctionOverload,
        /// Checked arguments, coerced to the overload's parameter types
        args: Vec<TyExpr>,
    },
    /// Checking failed; a diagnostic has been recorded
    Error,
}

/// Typed top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TyStmt {
    /// Statement variant
    pub kind: TyStmtKind,
    /// Source location
    pub span: Span,
}

/// Typed statement variants.
#[derive(Debug, Clone, PartialEq)]
pub enum TyStmtKind {
    /// Bare expression
    Expr(TyExpr),
    /// Binding of `value` to one or more targets
    Assign {
        /// Target names
        targets: Vec<String>,
        /// Checked right-hand side
        value: TyExpr,
    },
}

/// Type-checked program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TyProgram {
    /// Statements in source order
    pub body: Vec<TyStmt>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_type_from_outputs() {
        let single = ExprType::from_outputs(&[("value".to_string(), DataType::Float)]);
        assert_eq!(single, ExprType::Single(DataType::Float));

        let multi = ExprType::from_outputs(&[
            ("generated".to_string(), DataType::Vec3),
            ("normal".to_string(), DataType::Vec3),
        ]);
        assert_eq!(multi.single(), None);
        assert_eq!(multi.to_string(), "(vec3, vec3)");
    }

    #[test]
    fn test_error_placeholder() {
        let expr = TyExpr::error(Span::zero(0));
        assert!(expr.ty.is_unknown());
        assert_eq!(expr.kind, TyExprKind::Error);
    }
}
