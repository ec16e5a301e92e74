// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Core data of the formula node compiler
//!
//! This crate contains the type catalog, literal values, node templates,
//! the operation stream, both syntax trees and the diagnostic types shared
//! by the lexer, parser, checker and lowering stages.

pub mod ast;
pub mod error;
pub mod foundation;
pub mod operation;
pub mod template;

// Re-export commonly used types
pub use error::{CompileError, DiagnosticFormatter, ErrorKind, Fatal};
pub use foundation::{DataType, SourceFile, SourceMap, Span, Value, format_types};
pub use operation::{OpKind, Operation};
pub use template::{
    BuiltinNode, Callable, FunctionOverload, GenericFunction, NodeTemplate, Prop, PropValue,
    Socket, SocketDefault,
};

pub use ast::*;
