// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! # Formula node compiler
//!
//! Compiles short math formulas into a flat operation stream that a host
//! graph builder turns into shader or geometry node trees.
//!
//! This crate is a facade over the pipeline crates:
//!
//! ```text
//! formula-ast      - foundation types, node templates, trees, diagnostics
//!     ↓
//! formula-lexer    - tokenization
//!     ↓
//! formula-parser   - recursive descent parser with statement recovery
//!     ↓
//! formula-nodes    - node catalog, instance and alias tables
//!     ↓
//! formula-resolve  - back ends, overload resolution, type checking
//!     ↓
//! formula (facade) - compile API and lowering
//! ```
//!
//! ## Usage
//!
//! ```
//! use formula::{Compiler, GeometryNodes, OpKind};
//!
//! let compilation = Compiler::new(GeometryNodes).compile("y = x * 2").unwrap();
//! assert!(compilation.succeeded());
//! assert_eq!(compilation.operations.last().map(|op| op.kind()), Some(OpKind::EndOfStatement));
//! ```

pub mod compile;

pub use compile::{Compilation, Compiler, format_errors, lex, lower};

// Re-export AST and foundation types
pub use formula_ast::{self as ast, *};

// Re-export lexer and parser
pub use formula_lexer::Token;
pub use formula_parser::{ParseError, parse_program};

// Re-export node tables
pub use formula_nodes::NodeRegistry;

// Re-export back ends and checking
pub use formula_resolve::{
    BackEnd, Checked, FunctionLibrary, GeometryNodes, ResolveError, Resolution, ShaderNodes,
    TypeError, VectorInputs, type_check,
};
