//! Foundation types shared by every stage: source spans, the type catalog
//! and literal values.

pub mod span;
pub mod types;
pub mod value;

pub use span::{SourceFile, SourceMap, Span};
pub use types::{DataType, format_types};
pub use value::Value;
