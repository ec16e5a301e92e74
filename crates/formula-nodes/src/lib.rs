// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Built-in node tables
//!
//! - [`catalog`]: the host nodes and their sockets
//! - [`instances`]: overload sets of node templates per call name
//! - [`aliases`]: user-facing names mapped to instance keys
//! - [`registry`]: the process-wide lookup over all of them

pub mod aliases;
pub mod catalog;
pub mod instances;
pub mod registry;

pub use instances::Entry;
pub use registry::{AliasTableId, InstanceTableId, NodeRegistry, TemplateSignature};
