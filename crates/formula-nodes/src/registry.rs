//! Process-wide, read-only view over the static node tables.

use formula_ast::foundation::DataType;
use formula_ast::template::{BuiltinNode, NodeTemplate};
use indexmap::IndexMap;
use std::sync::OnceLock;

use crate::aliases::{AliasTable, GEOMETRY_ALIASES, SHADER_ALIASES, SHADER_GEO_ALIASES};
use crate::catalog::NODES;
use crate::instances::{Entry, GEOMETRY_INSTANCES, INSTANCES, InstanceTable, SHADER_INSTANCES};

/// Instance table selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceTableId {
    /// Shader-only overloads
    Shader,
    /// Geometry-only overloads
    Geometry,
    /// Domain-independent overloads
    Common,
}

impl InstanceTableId {
    /// Every instance table.
    pub const ALL: [InstanceTableId; 3] = [Self::Shader, Self::Geometry, Self::Common];

    /// Name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            InstanceTableId::Shader => "shader nodes",
            InstanceTableId::Geometry => "geometry nodes",
            InstanceTableId::Common => "nodes",
        }
    }

    fn table(self) -> InstanceTable {
        match self {
            InstanceTableId::Shader => SHADER_INSTANCES,
            InstanceTableId::Geometry => GEOMETRY_INSTANCES,
            InstanceTableId::Common => INSTANCES,
        }
    }
}

/// Alias table selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasTableId {
    /// Shader-only aliases
    Shader,
    /// Geometry-only aliases
    Geometry,
    /// Aliases shared by both domains
    ShaderGeometry,
}

impl AliasTableId {
    /// Every alias table.
    pub const ALL: [AliasTableId; 3] = [Self::Shader, Self::Geometry, Self::ShaderGeometry];

    fn table(self) -> AliasTable {
        match self {
            AliasTableId::Shader => SHADER_ALIASES,
            AliasTableId::Geometry => GEOMETRY_ALIASES,
            AliasTableId::ShaderGeometry => SHADER_GEO_ALIASES,
        }
    }
}

/// Parameter and output types of a template, read from its node's sockets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSignature {
    /// Types of the bound input sockets, in argument order
    pub params: Vec<DataType>,
    /// Names and types of the result sockets, in result order
    pub outputs: Vec<(String, DataType)>,
}

/// Node registry
///
/// Indexes the static catalog, instance tables and alias tables for lookup.
/// Nothing in the registry changes after it is built.
///
/// # Thread Safety
///
/// The registry is initialized lazily using `OnceLock`. After first access,
/// lookups are lock-free.
///
/// # Examples
///
/// ```
/// use formula_nodes::{InstanceTableId, NodeRegistry};
///
/// let registry = NodeRegistry::global();
/// assert_eq!(registry.host_name("math"), Some("ShaderNodeMath"));
/// assert!(registry.candidates(InstanceTableId::Common, "add").is_some());
/// ```
pub struct NodeRegistry {
    nodes: IndexMap<&'static str, &'static BuiltinNode>,
    instances: IndexMap<InstanceTableId, IndexMap<&'static str, &'static [Entry]>>,
    aliases: IndexMap<AliasTableId, IndexMap<&'static str, &'static str>>,
}

static NODE_REGISTRY: OnceLock<NodeRegistry> = OnceLock::new();

impl NodeRegistry {
    /// Get or initialize the global node registry.
    pub fn global() -> &'static NodeRegistry {
        NODE_REGISTRY.get_or_init(Self::initialize)
    }

    fn initialize() -> NodeRegistry {
        let nodes: IndexMap<_, _> = NODES.iter().map(|node| (node.key, node)).collect();
        let instances: IndexMap<_, _> = InstanceTableId::ALL
            .into_iter()
            .map(|id| (id, id.table().iter().copied().collect()))
            .collect();
        let aliases: IndexMap<_, _> = AliasTableId::ALL
            .into_iter()
            .map(|id| (id, id.table().iter().copied().collect()))
            .collect();

        tracing::debug!(
            nodes = nodes.len(),
            instance_tables = instances.len(),
            alias_tables = aliases.len(),
            "node registry initialized"
        );

        NodeRegistry {
            nodes,
            instances,
            aliases,
        }
    }

    /// Catalog entry for a node key.
    pub fn node(&self, key: &str) -> Option<&'static BuiltinNode> {
        self.nodes.get(key).copied()
    }

    /// Host node identifier for a node key.
    pub fn host_name(&self, key: &str) -> Option<&'static str> {
        self.node(key).map(|node| node.host_name)
    }

    /// Every catalog entry, in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &'static BuiltinNode> + '_ {
        self.nodes.values().copied()
    }

    /// Candidates registered under `name` in one instance table.
    pub fn candidates(&self, table: InstanceTableId, name: &str) -> Option<&'static [Entry]> {
        self.instances.get(&table)?.get(name).copied()
    }

    /// Alias target of `name` in one alias table.
    pub fn alias(&self, table: AliasTableId, name: &str) -> Option<&'static str> {
        self.aliases.get(&table)?.get(name).copied()
    }

    /// Parameter and output types of a template.
    ///
    /// `None` when the key is not in the catalog or a socket index is out of
    /// range.
    pub fn signature(&self, template: &NodeTemplate) -> Option<TemplateSignature> {
        let node = self.node(template.key)?;
        let params = template
            .inputs
            .iter()
            .map(|&idx| node.inputs.get(idx).map(|socket| socket.ty))
            .collect::<Option<Vec<_>>>()?;
        let outputs = template
            .outputs
            .iter()
            .map(|&idx| {
                node.outputs
                    .get(idx)
                    .map(|socket| (socket.name.to_string(), socket.ty))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(TemplateSignature { params, outputs })
    }

    /// Check the static tables for consistency.
    ///
    /// Returns one message per problem: unknown node keys, socket indices
    /// out of range, pinned defaults on bound or mistyped sockets, dangling
    /// references and aliases, and duplicate keys.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.nodes.len() != NODES.len() {
            problems.push("duplicate key in node catalog".to_string());
        }

        for id in InstanceTableId::ALL {
            let table = id.table();
            if self.instances.get(&id).map_or(0, IndexMap::len) != table.len() {
                problems.push(format!("duplicate key in {} table", id.label()));
            }
            for (name, entries) in table {
                if entries.is_empty() {
                    problems.push(format!("{}: '{}' has no candidates", id.label(), name));
                }
                for entry in entries.iter() {
                    match entry {
                        Entry::Node(template) => {
                            self.validate_template(template, &mut problems);
                        }
                        Entry::Ref(target) => {
                            if *target == *name || !self.is_instance_key(target) {
                                problems.push(format!(
                                    "{}: '{}' refers to unknown or self key '{}'",
                                    id.label(),
                                    name,
                                    target
                                ));
                            }
                        }
                    }
                }
            }
        }

        for id in AliasTableId::ALL {
            for (alias, target) in id.table() {
                if !self.is_instance_key(target) {
                    problems.push(format!("alias '{}' targets unknown key '{}'", alias, target));
                }
            }
        }

        problems
    }

    fn is_instance_key(&self, name: &str) -> bool {
        InstanceTableId::ALL
            .into_iter()
            .any(|id| self.candidates(id, name).is_some())
    }

    fn validate_template(&self, template: &NodeTemplate, problems: &mut Vec<String>) {
        let Some(node) = self.node(template.key) else {
            problems.push(format!("unknown node key '{}'", template.key));
            return;
        };
        if self.signature(template).is_none() {
            problems.push(format!("socket index out of range in '{}'", template.key));
        }
        for (pos, idx) in template.inputs.iter().enumerate() {
            if template.inputs[..pos].contains(idx) {
                problems.push(format!("input {} bound twice in '{}'", idx, template.key));
            }
        }
        for default in template.defaults {
            match node.inputs.get(default.socket) {
                None => problems.push(format!(
                    "default on missing socket {} in '{}'",
                    default.socket, template.key
                )),
                Some(socket) => {
                    if template.inputs.contains(&default.socket) {
                        problems.push(format!(
                            "default on bound socket '{}' in '{}'",
                            socket.name, template.key
                        ));
                    }
                    if default.value.convert(socket.ty).is_none() {
                        problems.push(format!(
                            "default {} does not fit socket '{}' in '{}'",
                            default.value, socket.name, template.key
                        ));
                    }
                }
            }
        }
    }
}
