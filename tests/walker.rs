//! Tests for the shared flow-walking algorithm and its edge policies.
mod common;
use common::*;
use seisei::generator::dialect::async_role;
use seisei::generator::{Argument, FlowWalker, GenContext, dezyne};
use seisei::model::FlowType;
use seisei::prelude::*;

fn walker_fixture() -> (SaveInfo, seisei::generator::DialectSpec) {
    (save(vec![]), dezyne::dialect())
}

fn condition_node(transitions: Vec<TransitionSaveInfo>) -> NodeSaveInfo {
    let mut node = behaviour("cond", "Generic::Condition");
    node.properties.insert(
        "condition".to_string(),
        PropertyValue::String("armed".to_string()),
    );
    node.transitions = transitions;
    node
}

#[test]
fn test_condition_with_no_transitions_renders_nothing() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let node = condition_node(vec![]);
    let flow = flow("f", "Check", FlowType::In, vec![node.clone()]);
    let output = walker.render_node(&node, &Argument::empty(), &flow, 0, &mut ctx);
    assert_eq!(output, "");
}

#[test]
fn test_condition_with_one_transition_renders_if_only() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let node = condition_node(vec![transition("t1", "err")]);
    let flow = flow(
        "f",
        "Check",
        FlowType::In,
        vec![node.clone(), behaviour("err", "Generic::Error")],
    );
    let output = walker.render_node(&node, &Argument::empty(), &flow, 0, &mut ctx);
    assert!(output.contains("if (armed) {"));
    assert!(output.contains("reply(false);"));
    assert!(!output.contains("else"));
}

#[test]
fn test_condition_with_two_transitions_renders_if_else() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let node = condition_node(vec![transition("t1", "err"), transition("t2", "err2")]);
    let flow = flow(
        "f",
        "Check",
        FlowType::In,
        vec![
            node.clone(),
            behaviour("err", "Generic::Error"),
            behaviour("err2", "Generic::Error"),
        ],
    );
    let output = walker.render_node(&node, &Argument::empty(), &flow, 0, &mut ctx);
    assert!(output.contains("if (armed) {"));
    assert!(output.contains("} else {"));
    assert_eq!(output.matches("reply(false);").count(), 2);
}

#[test]
fn test_bound_argument_becomes_condition_expression() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let node = condition_node(vec![transition("t1", "err")]);
    let flow = flow(
        "f",
        "Check",
        FlowType::In,
        vec![node.clone(), behaviour("err", "Generic::Error")],
    );
    let output = walker.render_node(&node, &Argument::bound("valid"), &flow, 0, &mut ctx);
    assert!(output.contains("if (valid) {"));
}

#[test]
fn test_dangling_transition_renders_empty() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let mut start = behaviour("start", "Generic::Start");
    start.transitions.push(transition("t1", "missing"));
    let flow = flow("f", "Broken", FlowType::In, vec![start]);

    let output = walker.walk_flow(&flow, 0, &mut ctx);
    assert_eq!(output, "");
}

#[test]
fn test_flow_without_start_node_renders_empty() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let flow = flow(
        "f",
        "Headless",
        FlowType::In,
        vec![behaviour("err", "Generic::Error")],
    );
    assert_eq!(walker.walk_flow(&flow, 0, &mut ctx), "");
}

#[test]
fn test_unlabeled_fan_out_renders_all_destinations_in_order() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let mut start = behaviour("start", "Generic::Start");
    start.transitions.push(transition("t1", "err"));
    start.transitions.push(transition("t2", "cond"));
    let flow = flow(
        "f",
        "FanOut",
        FlowType::In,
        vec![
            start.clone(),
            behaviour("err", "Generic::Error"),
            condition_node(vec![]),
        ],
    );

    let output = walker.walk_all(&start, &Argument::empty(), &flow, 0, &mut ctx);
    assert!(output.contains("reply(false);"));
    // The second successor is a condition with no transitions; it renders
    // nothing but must not suppress the first.
    assert_eq!(output.matches("reply").count(), 1);
}

#[test]
fn test_labeled_transitions_all_fire_exact_match() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let mut node = behaviour("task", "Generic::Action");
    node.transitions
        .push(labeled_transition("t1", "err", "on error"));
    node.transitions
        .push(labeled_transition("t2", "err2", "on error"));
    node.transitions
        .push(labeled_transition("t3", "err", "On Error"));
    let flow = flow(
        "f",
        "Labels",
        FlowType::In,
        vec![
            node.clone(),
            behaviour("err", "Generic::Error"),
            behaviour("err2", "Generic::Error"),
        ],
    );

    let output = walker.walk_labeled(&node, "on error", &Argument::empty(), &flow, 0, &mut ctx);
    // Both exact matches fire; the differently-cased label does not.
    assert_eq!(output.matches("reply(false);").count(), 2);
}

#[test]
fn test_cyclic_transitions_render_finitely() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let mut start = behaviour("start", "Generic::Start");
    start.transitions.push(transition("t0", "a"));
    let mut a = behaviour("a", "Generic::Condition");
    a.transitions.push(transition("t1", "b"));
    let mut b = behaviour("b", "Generic::Condition");
    b.transitions.push(transition("t2", "a"));
    let flow = flow("f", "Loop", FlowType::In, vec![start, a, b]);

    let output = walker.walk_flow(&flow, 0, &mut ctx);
    // Each condition renders once; the edge leading back into the cycle is
    // skipped instead of recursing.
    assert_eq!(output.matches("if (true) {").count(), 2);

    // The render stack unwinds fully, so a second walk behaves the same.
    assert_eq!(walker.walk_flow(&flow, 0, &mut ctx), output);
}

#[test]
fn test_action_resolves_component_reference() {
    let mut alarm = structural("alarm", "Utilities::Siren", "Alarm");
    alarm
        .flows
        .push(flow("f2", "Enable", FlowType::In, vec![]));
    let mut light = structural("light", "Generic::Component", "Light");
    light.children.push(alarm);
    let root = save(vec![light]);
    let dialect = dezyne::dialect();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let mut action = behaviour("act", "Generic::Action");
    action.properties.insert(
        "component".to_string(),
        PropertyValue::String(r#"{"data_id": "alarm", "option_data_id": "f2"}"#.to_string()),
    );
    let flow = flow("f1", "Activate", FlowType::In, vec![action.clone()]);

    let output = walker.render_node(&action, &Argument::empty(), &flow, 0, &mut ctx);
    assert!(output.contains("bool valid = alarm.enable();"));
}

#[test]
fn test_missing_callee_abandons_branch_only() {
    let root = save(vec![structural("light", "Generic::Component", "Light")]);
    let dialect = dezyne::dialect();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let mut action = behaviour("act", "Generic::Action");
    action.properties.insert(
        "component".to_string(),
        PropertyValue::String(r#"{"data_id": "ghost", "option_data_id": "f2"}"#.to_string()),
    );
    let flow = flow("f1", "Activate", FlowType::In, vec![action.clone()]);

    let output = walker.render_node(&action, &Argument::empty(), &flow, 0, &mut ctx);
    assert_eq!(output, "");
}

#[test]
fn test_unsupported_node_type_renders_nothing() {
    let (root, dialect) = walker_fixture();
    let walker = FlowWalker::new(&root, &dialect);
    let mut ctx = GenContext::new("generated");

    let node = behaviour("odd", "Generic::Teleport");
    let flow = flow("f", "Odd", FlowType::In, vec![node.clone()]);
    assert_eq!(
        walker.render_node(&node, &Argument::empty(), &flow, 0, &mut ctx),
        ""
    );
}

#[test]
fn test_async_role_assignment_by_position() {
    // Property check across 0..3 same-direction flow counts: only the first
    // flow of each direction gets the trigger/return role.
    for index in 0..3 {
        let in_role = async_role(FlowType::In, index);
        let out_role = async_role(FlowType::Out, index);
        if index == 0 {
            assert_eq!(in_role, "trigger");
            assert_eq!(out_role, "return");
        } else {
            assert_eq!(in_role, "abort");
            assert_eq!(out_role, "error");
        }
    }
    assert_eq!(async_role(FlowType::Unknown, 0), "");
}
