// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Back ends, overload resolution and type checking
//!
//! A [`BackEnd`] describes one target domain of the host (shader or geometry
//! node trees). The [`resolver`] picks one overload per call from the
//! domain's tables, and [`type_check`] turns a parsed program into a typed
//! one, collecting diagnostics along the way.

pub mod backend;
pub mod check;
pub mod functions;
pub mod resolver;

pub use backend::{BackEnd, COMBINE_XYZ, GeometryNodes, ShaderNodes, TypeError, VectorInputs, accepts};
pub use check::{Checked, type_check};
pub use functions::FunctionLibrary;
pub use resolver::{DomainTables, ResolveError, Resolution};
