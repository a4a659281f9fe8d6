//! Common test utilities for building save-data graphs.
use seisei::model::FlowType;
use seisei::prelude::*;

/// Creates a behaviour node of the given type.
#[allow(dead_code)]
pub fn behaviour(id: &str, node_type: &str) -> NodeSaveInfo {
    NodeSaveInfo::new(id, node_type)
}

/// Creates a structural node with a display name property.
#[allow(dead_code)]
pub fn structural(id: &str, node_type: &str, name: &str) -> NodeSaveInfo {
    let mut node = NodeSaveInfo::new(id, node_type);
    node.properties
        .insert("name".to_string(), PropertyValue::String(name.to_string()));
    node
}

/// Creates an unlabeled transition to the given destination.
#[allow(dead_code)]
pub fn transition(id: &str, dst_id: &str) -> TransitionSaveInfo {
    TransitionSaveInfo {
        id: id.to_string(),
        dst_id: dst_id.to_string(),
        ..Default::default()
    }
}

/// Creates a labeled transition to the given destination.
#[allow(dead_code)]
pub fn labeled_transition(id: &str, dst_id: &str, label: &str) -> TransitionSaveInfo {
    TransitionSaveInfo {
        id: id.to_string(),
        dst_id: dst_id.to_string(),
        label: label.to_string(),
        ..Default::default()
    }
}

/// Creates a flow with the given direction and behaviour node pool.
#[allow(dead_code)]
pub fn flow(id: &str, name: &str, flow_type: FlowType, nodes: Vec<NodeSaveInfo>) -> FlowSaveInfo {
    FlowSaveInfo {
        id: id.to_string(),
        name: name.to_string(),
        flow_type,
        return_type: "void".to_string(),
        modifiable: true,
        nodes,
        ..Default::default()
    }
}

/// Wraps top-level structural nodes into a project root.
#[allow(dead_code)]
pub fn save(structural_nodes: Vec<NodeSaveInfo>) -> SaveInfo {
    SaveInfo {
        structural_nodes,
        ..Default::default()
    }
}

/// The reference end-to-end scenario: a `Generic::Component` named "Light"
/// with a `Utilities::Siren` child named "Alarm" and one IN flow "Activate"
/// whose start node transitions unconditionally to an unbound End node.
#[allow(dead_code)]
pub fn light_alarm_save() -> SaveInfo {
    let mut start = behaviour("start", "Generic::Start");
    start.transitions.push(transition("t1", "end"));
    let end = behaviour("end", "Generic::End");

    let mut light = structural("light", "Generic::Component", "Light");
    light.children.push(structural(
        "alarm",
        "Utilities::Siren",
        "Alarm",
    ));
    light
        .flows
        .push(flow("f1", "Activate", FlowType::In, vec![start, end]));

    save(vec![light])
}
