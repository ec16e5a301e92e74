//! Syntax trees.
//!
//! - [`untyped`]: parser output
//! - [`typed`]: type checker output, consumed by lowering

pub mod typed;
pub mod untyped;

pub use typed::{ExprType, TyExpr, TyExprKind, TyProgram, TyStmt, TyStmtKind};
pub use untyped::{BinaryOp, Expr, ExprKind, Program, Stmt, StmtKind, Target, UnaryOp};
