//! Generic functions registered by the host.

use formula_ast::template::GenericFunction;
use indexmap::IndexMap;
use std::sync::Arc;

/// Overload sets of generic functions, in registration order.
///
/// Searched after every node instance table of the active back end.
#[derive(Debug, Clone, Default)]
pub struct FunctionLibrary {
    functions: IndexMap<String, Vec<Arc<GenericFunction>>>,
}

impl FunctionLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an overload under its name.
    pub fn register(&mut self, function: GenericFunction) {
        self.functions
            .entry(function.name.clone())
            .or_default()
            .push(Arc::new(function));
    }

    /// Overloads registered under `name`.
    pub fn overloads(&self, name: &str) -> &[Arc<GenericFunction>] {
        self.functions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no function is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
