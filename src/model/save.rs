use super::property::PropertyValue;
use super::types::FlowType;
use crate::library::{EventConfig, PropertiesConfig};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Editor viewport state. Persisted with the project but irrelevant to
/// generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasInfo {
    pub offset: (f64, f64),
    pub zoom: f64,
}

/// A labeled directed edge between two behaviour nodes within one flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionSaveInfo {
    pub id: String,
    /// Target node id within the same flow's node pool. May dangle; dangling
    /// edges are skipped during generation, never treated as fatal.
    pub dst_id: String,
    /// Free-text discriminator such as `"on error"`; empty for the normal edge.
    pub label: String,
    /// Event name for labeled `"on <event>"` edges.
    pub event: String,
    pub points: Vec<(f64, f64)>,
}

/// A named directed graph of behaviour nodes representing one capability of
/// its owning structural node.
///
/// `nodes` is a flat pool; `TransitionSaveInfo::dst_id` provides the edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSaveInfo {
    pub id: String,
    pub name: String,
    pub flow_type: FlowType,
    pub return_type: String,
    pub arguments: Vec<PropertiesConfig>,
    pub nodes: Vec<NodeSaveInfo>,
    /// Whether the flow is user-defined (editable) rather than auto-generated.
    pub modifiable: bool,
}

impl FlowSaveInfo {
    /// Looks a behaviour node up in this flow's pool.
    pub fn node(&self, id: &str) -> Option<&NodeSaveInfo> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Locates the flow's unique start node among the given start type keys.
    pub fn start_node(&self, start_types: &[&str]) -> Option<&NodeSaveInfo> {
        self.nodes
            .iter()
            .find(|n| start_types.contains(&n.node_id.as_str()))
    }
}

/// One persisted node: a structural node (owning children and flows) or a
/// behaviour node inside a flow's pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSaveInfo {
    /// Unique instance id, immutable after creation.
    pub id: String,
    /// The node type key, e.g. `"Generic::Component"` or `"Mission::Async task"`.
    pub node_id: String,
    pub position: (f64, f64),
    pub size: (f64, f64),
    pub scale: f64,
    pub fields: Vec<PropertiesConfig>,
    pub events: Vec<EventConfig>,
    pub properties: AHashMap<String, PropertyValue>,
    pub transitions: Vec<TransitionSaveInfo>,
    /// Empty for top-level structural roots.
    pub parent_id: String,
    pub children: Vec<NodeSaveInfo>,
    pub flows: Vec<FlowSaveInfo>,
}

impl NodeSaveInfo {
    pub fn new(id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_id: node_id.into(),
            scale: 1.0,
            ..Default::default()
        }
    }

    pub fn property(&self, id: &str) -> Option<&PropertyValue> {
        self.properties.get(id)
    }

    /// The user-facing name: the `name` property if set, the instance id
    /// otherwise.
    pub fn display_name(&self) -> &str {
        self.property("name")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn flow(&self, flow_id: &str) -> Option<&FlowSaveInfo> {
        self.flows.iter().find(|f| f.id == flow_id)
    }

    /// Flows of one direction, in declaration order. Declaration order is
    /// load-bearing: async role qualifiers are assigned positionally.
    pub fn flows_of_type(&self, flow_type: FlowType) -> impl Iterator<Item = &FlowSaveInfo> {
        self.flows.iter().filter(move |f| f.flow_type == flow_type)
    }
}

/// The project root. Exclusively owns the entire node forest; the generator
/// receives a shared reference and performs only reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveInfo {
    pub canvas_info: CanvasInfo,
    pub structural_nodes: Vec<NodeSaveInfo>,
    /// Unused duplicate listing retained for save-file compatibility.
    pub behavioural_nodes: Vec<NodeSaveInfo>,
}

impl SaveInfo {
    /// Linear scan of the full structural forest for a node by instance id.
    pub fn find_structural(&self, id: &str) -> Option<&NodeSaveInfo> {
        fn walk<'a>(nodes: &'a [NodeSaveInfo], id: &str) -> Option<&'a NodeSaveInfo> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = walk(&node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.structural_nodes, id)
    }

    /// Optional pre-generation validation pass: describes every dangling
    /// transition target and unresolvable component reference in the project.
    ///
    /// Generation itself never consults this; it skips such references with a
    /// warning and keeps going.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        self.validate_nodes(&self.structural_nodes, &mut problems);
        problems
    }

    fn validate_nodes(&self, nodes: &[NodeSaveInfo], problems: &mut Vec<String>) {
        for node in nodes {
            for flow in &node.flows {
                for behaviour in &flow.nodes {
                    for transition in &behaviour.transitions {
                        if flow.node(&transition.dst_id).is_none() {
                            problems.push(format!(
                                "Transition '{}' in flow '{}' points to missing node '{}'",
                                transition.id, flow.name, transition.dst_id
                            ));
                        }
                    }
                    if let Some(component) = behaviour.property("component") {
                        match component.component_ref() {
                            Some(reference) => {
                                match self.find_structural(&reference.data_id) {
                                    Some(callee) => {
                                        if callee.flow(&reference.option_data_id).is_none() {
                                            problems.push(format!(
                                                "Node '{}' references missing flow '{}' on '{}'",
                                                behaviour.id,
                                                reference.option_data_id,
                                                callee.display_name()
                                            ));
                                        }
                                    }
                                    None => problems.push(format!(
                                        "Node '{}' references missing component '{}'",
                                        behaviour.id, reference.data_id
                                    )),
                                }
                            }
                            None => problems.push(format!(
                                "Node '{}' has a component property that is not a reference",
                                behaviour.id
                            )),
                        }
                    }
                }
            }
            self.validate_nodes(&node.children, problems);
        }
    }
}
