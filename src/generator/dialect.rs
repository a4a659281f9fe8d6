use super::Language;
use super::context::{Argument, GenContext};
use super::walker::FlowWalker;
use crate::model::{FlowSaveInfo, FlowType, NodeSaveInfo, PropertyType};
use ahash::AHashMap;

/// How a dialect fixes the case of identifiers pulled from user-entered
/// display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCasing {
    /// Lower-case only.
    Lower,
    /// Lower-case and replace spaces with underscores.
    LowerUnderscore,
}

impl NameCasing {
    pub fn apply(&self, name: &str) -> String {
        let lowered = name.to_lowercase();
        match self {
            NameCasing::Lower => lowered,
            NameCasing::LowerUnderscore => lowered.replace(' ', "_"),
        }
    }
}

/// What the engine does with a top-level or nested structural node type.
pub enum StructuralRole {
    /// Graph-walked: children are emitted first, then the node's own file is
    /// assembled from its flows.
    Component,
    /// Not graph-walked: the node's flows become a capability-declaration
    /// block (one signature per IN/OUT flow).
    Capability,
    /// Not graph-walked: a fixed interface skeleton keyed purely by the node
    /// type, parameterized only by the node's fixed display name.
    Utility(fn(&str) -> String),
}

/// Renders one behaviour node type into target syntax.
///
/// Emitters are thin formatting shims: all traversal (transition following,
/// cross-reference resolution, argument threading) goes through the walker.
pub trait BehaviourEmitter: Send + Sync {
    fn node_type(&self) -> &str;

    fn emit(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String;
}

/// Everything that distinguishes one dialect backend from another. The
/// flow-walking algorithm itself is shared; a dialect only supplies tables
/// and formatting hooks.
pub struct DialectSpec {
    pub name: &'static str,
    pub language: Language,
    pub file_extension: &'static str,
    pub casing: NameCasing,
    /// Node type keys that open a flow graph.
    pub start_types: &'static [&'static str],
    pub structural: AHashMap<String, StructuralRole>,
    pub behaviour: AHashMap<String, Box<dyn BehaviourEmitter>>,
    /// Stringifies a declared property type into target syntax.
    pub type_syntax: fn(PropertyType) -> &'static str,
    /// Assembles a component file body (import header prepended by the engine).
    pub component_file: fn(&FlowWalker, &NodeSaveInfo, &mut GenContext) -> String,
    /// Assembles a capability-declaration file body.
    pub capability_file: fn(&FlowWalker, &NodeSaveInfo, &mut GenContext) -> String,
}

impl DialectSpec {
    pub fn register_emitter(&mut self, emitter: Box<dyn BehaviourEmitter>) {
        self.behaviour.insert(emitter.node_type().to_string(), emitter);
    }

    /// Identifier form of a node's display name under this dialect's casing.
    pub fn fix_case(&self, name: &str) -> String {
        self.casing.apply(name)
    }

    /// Generated file name for one structural node.
    pub fn file_name(&self, node: &NodeSaveInfo) -> String {
        format!(
            "{}.{}",
            self.fix_case(node.display_name()),
            self.file_extension
        )
    }

    /// Renders a flow's argument declarations, e.g. `"level, duration"`.
    pub fn argument_list(&self, flow: &FlowSaveInfo) -> String {
        flow.arguments
            .iter()
            .map(|a| self.fix_case(&a.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Role qualifier of an async wrapper's flow, assigned by positional index
/// among flows of the same direction. Order is declaration order in the save
/// file; reordering flows changes the roles.
pub fn async_role(flow_type: FlowType, index_within_direction: usize) -> &'static str {
    match (flow_type, index_within_direction) {
        (FlowType::In, 0) => "trigger",
        (FlowType::In, _) => "abort",
        (FlowType::Out, 0) => "return",
        (FlowType::Out, _) => "error",
        (FlowType::Unknown, _) => "",
    }
}

/// Two-space indentation step shared by both reference dialects.
pub fn pad(level: usize) -> String {
    "  ".repeat(level)
}
