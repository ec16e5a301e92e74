//! Function and alias resolution.
//!
//! Given a call name and the already-resolved argument types, pick exactly
//! one overload:
//!
//! 1. Map the name through the domain's alias tables; the first table that
//!    knows the name wins.
//! 2. Collect candidates from the domain's instance tables in priority
//!    order, then from the generic function library. References to other
//!    keys are expanded in place.
//! 3. Drop candidates whose arity differs. Every remaining argument costs
//!    0 when its type matches the parameter, the number of catalog steps
//!    when it widens into it, and disqualifies the candidate when it cannot
//!    be coerced or the domain does not accept the parameter type.
//! 4. Keep the cheapest candidate. Candidates are scanned in priority and
//!    registration order and only a strictly cheaper one replaces the
//!    current pick, so on equal cost the earlier table, and within a table
//!    the first registered overload, wins.

use formula_ast::foundation::{DataType, format_types};
use formula_ast::template::{Callable, FunctionOverload, GenericFunction, NodeTemplate};
use formula_nodes::{AliasTableId, Entry, InstanceTableId, NodeRegistry};
use std::sync::Arc;

use crate::functions::FunctionLibrary;

/// Label of the generic function library in diagnostics.
pub const FUNCTIONS_LABEL: &str = "functions";

/// Reference chains longer than this are treated as cycles.
const MAX_REF_DEPTH: usize = 8;

/// Tables one back end resolves against, in priority order.
#[derive(Debug, Clone, Copy)]
pub struct DomainTables {
    /// Alias tables, first match wins
    pub aliases: &'static [AliasTableId],
    /// Instance tables, searched before generic functions
    pub instances: &'static [InstanceTableId],
}

impl DomainTables {
    /// Labels of every searched table, generic functions last.
    pub fn searched(&self) -> Vec<&'static str> {
        self.instances
            .iter()
            .map(|id| id.label())
            .chain(std::iter::once(FUNCTIONS_LABEL))
            .collect()
    }
}

/// One overload candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// Built-in node template
    Node(NodeTemplate),
    /// Generic function
    Function(Arc<GenericFunction>),
}

/// Selected overload of a call.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The overload, with parameter and output types
    pub overload: FunctionOverload,
    /// Total coercion cost of the arguments
    pub cost: u32,
    /// Label of the table the overload came from
    pub source: &'static str,
}

impl Resolution {
    /// Types the arguments must be coerced into.
    pub fn param_types(&self) -> &[DataType] {
        self.overload.param_types()
    }

    /// Output names, in result order.
    pub fn output_names(&self) -> Vec<&str> {
        self.overload.output_names()
    }
}

/// No overload matches a call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The name is not registered anywhere.
    #[error("unknown function '{name}' called with {}", format_types(args))]
    UnknownFunction {
        /// Call name as written
        name: String,
        /// Argument types
        args: Vec<DataType>,
        /// Labels of the searched tables
        searched: Vec<&'static str>,
    },
    /// Candidates exist but none accepts the arguments.
    #[error("no overload of '{name}' accepts {}", format_types(args))]
    NoMatchingOverload {
        /// Call name as written
        name: String,
        /// Argument types
        args: Vec<DataType>,
        /// Labels of the searched tables
        searched: Vec<&'static str>,
    },
}

impl ResolveError {
    /// Labels of the tables searched before giving up.
    pub fn searched(&self) -> &[&'static str] {
        match self {
            ResolveError::UnknownFunction { searched, .. }
            | ResolveError::NoMatchingOverload { searched, .. } => searched,
        }
    }
}

/// Resolve a call against a domain's tables.
///
/// `accepts` tells whether the domain has sockets of a type.
pub fn resolve(
    tables: &DomainTables,
    name: &str,
    args: &[DataType],
    functions: &FunctionLibrary,
    accepts: impl Fn(DataType) -> bool,
) -> Result<Resolution, ResolveError> {
    let registry = NodeRegistry::global();
    let key = tables
        .aliases
        .iter()
        .find_map(|&id| registry.alias(id, name))
        .unwrap_or(name);

    let mut candidates = Vec::new();
    expand(registry, tables.instances, key, 0, &mut candidates);
    candidates.extend(
        functions
            .overloads(key)
            .iter()
            .map(|f| (Candidate::Function(Arc::clone(f)), FUNCTIONS_LABEL)),
    );

    if candidates.is_empty() {
        return Err(ResolveError::UnknownFunction {
            name: name.to_string(),
            args: args.to_vec(),
            searched: tables.searched(),
        });
    }

    let mut best: Option<Resolution> = None;
    for (candidate, source) in candidates {
        let Some(overload) = overload_of(registry, key, candidate) else {
            tracing::warn!(call = name, "skipping candidate with an invalid template");
            continue;
        };
        let cost = call_cost(args, &overload.params, &accepts);
        tracing::trace!(
            call = name,
            source,
            params = %format_types(&overload.params),
            ?cost,
            "scored candidate"
        );
        let Some(cost) = cost else {
            continue;
        };
        if best.as_ref().is_none_or(|current| cost < current.cost) {
            best = Some(Resolution {
                overload,
                cost,
                source,
            });
        }
    }

    best.ok_or_else(|| ResolveError::NoMatchingOverload {
        name: name.to_string(),
        args: args.to_vec(),
        searched: tables.searched(),
    })
}

/// Expand the entries under `key` from every table, in priority order.
fn expand(
    registry: &NodeRegistry,
    tables: &[InstanceTableId],
    key: &str,
    depth: usize,
    out: &mut Vec<(Candidate, &'static str)>,
) {
    if depth > MAX_REF_DEPTH {
        tracing::warn!(key, "reference chain too deep, ignoring");
        return;
    }
    for &id in tables {
        let Some(entries) = registry.candidates(id, key) else {
            continue;
        };
        for entry in entries {
            match entry {
                Entry::Node(template) => out.push((Candidate::Node(*template), id.label())),
                Entry::Ref(target) => expand(registry, tables, target, depth + 1, out),
            }
        }
    }
}

fn overload_of(registry: &NodeRegistry, key: &str, candidate: Candidate) -> Option<FunctionOverload> {
    match candidate {
        Candidate::Node(template) => {
            let signature = registry.signature(&template)?;
            Some(FunctionOverload {
                name: key.to_string(),
                params: signature.params,
                outputs: signature.outputs,
                callable: Callable::Node(template),
            })
        }
        Candidate::Function(function) => Some(FunctionOverload {
            name: function.name.clone(),
            params: function.params.iter().map(|(_, ty)| *ty).collect(),
            outputs: function.outputs.clone(),
            callable: Callable::Function(function),
        }),
    }
}

/// Total coercion cost, `None` when the candidate is not admissible.
fn call_cost(args: &[DataType], params: &[DataType], accepts: &impl Fn(DataType) -> bool) -> Option<u32> {
    if args.len() != params.len() {
        return None;
    }
    args.iter().zip(params).try_fold(0u32, |total, (&arg, &param)| {
        if !accepts(param) {
            return None;
        }
        Some(total + arg.coercion_cost(param)?)
    })
}

#[cfg(test)]
mod tests;
