//! The Rozyne-like mission/task dialect.
//!
//! Shares the Dezyne file skeleton (imports, one file per top-level node,
//! `requires` lines) but adds mission control constructs: within, repeat,
//! strategy, async/sync tasks with role-qualified flow signatures. Names are
//! lower-cased with spaces replaced by underscores.

use super::Language;
use super::context::{Argument, GenContext};
use super::dialect::{
    BehaviourEmitter, DialectSpec, NameCasing, StructuralRole, async_role, pad,
};
use super::walker::FlowWalker;
use crate::model::{FlowSaveInfo, FlowType, NodeSaveInfo, PropertyType};
use ahash::AHashMap;

pub fn dialect() -> DialectSpec {
    let mut spec = DialectSpec {
        name: "Rozyne",
        language: Language::Rozyne,
        file_extension: "rzn",
        casing: NameCasing::LowerUnderscore,
        start_types: &["Mission::Start", "Generic::Start"],
        structural: AHashMap::new(),
        behaviour: AHashMap::new(),
        type_syntax,
        component_file,
        capability_file,
    };

    spec.structural
        .insert("Generic::Component".to_string(), StructuralRole::Component);
    spec.structural
        .insert("Mission::Mission".to_string(), StructuralRole::Component);
    spec.structural.insert(
        "Mission::Async task".to_string(),
        StructuralRole::Capability,
    );
    spec.structural
        .insert("Mission::Sync task".to_string(), StructuralRole::Capability);
    spec.structural.insert(
        "Utilities::Timer".to_string(),
        StructuralRole::Utility(timer_template),
    );
    spec.structural.insert(
        "Utilities::Authenticator".to_string(),
        StructuralRole::Utility(authenticator_template),
    );
    spec.structural.insert(
        "Utilities::Siren".to_string(),
        StructuralRole::Utility(siren_template),
    );
    spec.structural.insert(
        "Utilities::Presence sensor".to_string(),
        StructuralRole::Utility(presence_sensor_template),
    );

    spec.register_emitter(Box::new(EndEmitter));
    spec.register_emitter(Box::new(ErrorEmitter));
    spec.register_emitter(Box::new(ActionEmitter));
    spec.register_emitter(Box::new(ConditionEmitter));
    spec.register_emitter(Box::new(AsyncTaskEmitter));
    spec.register_emitter(Box::new(SyncTaskEmitter));
    spec.register_emitter(Box::new(WithinEmitter));
    spec.register_emitter(Box::new(RepeatEmitter));
    spec.register_emitter(Box::new(StrategyEmitter));

    spec
}

fn type_syntax(property_type: PropertyType) -> &'static str {
    match property_type {
        PropertyType::Boolean => "bool",
        PropertyType::Integer => "int",
        PropertyType::Real => "float",
        PropertyType::String => "string",
        _ => "void",
    }
}

/// Role qualifier for each flow of a node, in declaration order: positional
/// index within the flow's own direction decides trigger/abort/return/error.
fn flow_roles<'a>(node: &'a NodeSaveInfo) -> Vec<(&'static str, &'a FlowSaveInfo)> {
    let mut in_count = 0usize;
    let mut out_count = 0usize;
    node.flows
        .iter()
        .map(|flow| {
            let index = match flow.flow_type {
                FlowType::In => {
                    in_count += 1;
                    in_count - 1
                }
                FlowType::Out => {
                    out_count += 1;
                    out_count - 1
                }
                FlowType::Unknown => 0,
            };
            (async_role(flow.flow_type, index), flow)
        })
        .collect()
}

fn component_file(walker: &FlowWalker, node: &NodeSaveInfo, ctx: &mut GenContext) -> String {
    let spec = walker.dialect();
    let name = spec.fix_case(node.display_name());
    let qualifier = node
        .property("qualifier")
        .and_then(|p| p.as_str())
        .filter(|q| !q.is_empty())
        .unwrap_or("mission");

    let mut out = format!("{} component {}() {{\n", qualifier, name);
    for child in &node.children {
        let child_name = spec.fix_case(child.display_name());
        out.push_str(&format!(
            "{}requires i{} {};\n",
            pad(1),
            child_name,
            child_name
        ));
    }
    if !node.children.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!("{}strategy {{\n", pad(1)));
    for (role, flow) in flow_roles(node) {
        let header = format!(
            "{}: {}({})",
            role,
            spec.fix_case(&flow.name),
            spec.argument_list(flow)
        );
        let body = walker.walk_flow(flow, 3, ctx);
        if body.trim().is_empty() {
            out.push_str(&format!("{}{} {{ }}\n", pad(2), header));
        } else {
            out.push_str(&format!("{}{} {{\n{}{}}}\n", pad(2), header, body, pad(2)));
        }
    }
    out.push_str(&format!("{}}}\n}}\n", pad(1)));
    out
}

/// Declaration block for a task wrapper: one role-qualified signature per
/// flow, no graph walking.
fn capability_file(walker: &FlowWalker, node: &NodeSaveInfo, _ctx: &mut GenContext) -> String {
    let spec = walker.dialect();
    let name = spec.fix_case(node.display_name());

    let mut out = format!("async component {}() {{\n", name);
    for (role, flow) in flow_roles(node) {
        let arguments = flow
            .arguments
            .iter()
            .map(|a| {
                format!(
                    "{} {}",
                    (spec.type_syntax)(a.property_type),
                    spec.fix_case(&a.name)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{}{}: {}({});\n",
            pad(1),
            role,
            spec.fix_case(&flow.name),
            arguments
        ));
    }
    out.push_str("}\n");
    out
}

// --- Behaviour emitters ---

struct EndEmitter;
impl BehaviourEmitter for EndEmitter {
    fn node_type(&self) -> &str {
        "Mission::End"
    }

    fn emit(
        &self,
        _walker: &FlowWalker,
        _node: &NodeSaveInfo,
        arg: &Argument,
        _flow: &FlowSaveInfo,
        indent: usize,
        _ctx: &mut GenContext,
    ) -> String {
        match arg.name() {
            Some(name) => format!("{}return {};\n", pad(indent), name),
            None => String::new(),
        }
    }
}

struct ErrorEmitter;
impl BehaviourEmitter for ErrorEmitter {
    fn node_type(&self) -> &str {
        "Mission::Error"
    }

    fn emit(
        &self,
        _walker: &FlowWalker,
        _node: &NodeSaveInfo,
        arg: &Argument,
        _flow: &FlowSaveInfo,
        indent: usize,
        _ctx: &mut GenContext,
    ) -> String {
        match arg.name() {
            Some(name) => format!("{}error {};\n", pad(indent), name),
            None => format!("{}error;\n", pad(indent)),
        }
    }
}

struct ActionEmitter;
impl BehaviourEmitter for ActionEmitter {
    fn node_type(&self) -> &str {
        "Mission::Action"
    }

    fn emit(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        emit_call(walker, node, arg, flow, indent, ctx, "let valid = ")
    }
}

/// Synchronous task call: identical threading to an action, the callee just
/// blocks until completion.
struct SyncTaskEmitter;
impl BehaviourEmitter for SyncTaskEmitter {
    fn node_type(&self) -> &str {
        "Mission::Sync task"
    }

    fn emit(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        emit_call(walker, node, arg, flow, indent, ctx, "let valid = ")
    }
}

fn emit_call(
    walker: &FlowWalker,
    node: &NodeSaveInfo,
    arg: &Argument,
    flow: &FlowSaveInfo,
    indent: usize,
    ctx: &mut GenContext,
    binding: &str,
) -> String {
    let Some((callee, callee_flow)) = walker.resolve_callee(node) else {
        return String::new();
    };
    let spec = walker.dialect();

    let mut out = format!(
        "{}{}{}.{}({});\n",
        pad(indent),
        binding,
        spec.fix_case(callee.display_name()),
        spec.fix_case(&callee_flow.name),
        arg.as_expr()
    );
    out.push_str(&walker.walk_all(node, &Argument::bound("valid"), flow, indent, ctx));
    out
}

/// Asynchronous task call: awaits the callee, routing `"on error"` and
/// `"on abort"` labeled transitions into handler blocks, then continues down
/// the unlabeled edges with the bound result.
struct AsyncTaskEmitter;
impl BehaviourEmitter for AsyncTaskEmitter {
    fn node_type(&self) -> &str {
        "Mission::Async task"
    }

    fn emit(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        let Some((callee, callee_flow)) = walker.resolve_callee(node) else {
            return String::new();
        };
        let spec = walker.dialect();

        let mut out = format!(
            "{}await valid = {}.{}({})",
            pad(indent),
            spec.fix_case(callee.display_name()),
            spec.fix_case(&callee_flow.name),
            arg.as_expr()
        );

        let has_error = walker.has_labeled(node, "on error");
        let has_abort = walker.has_labeled(node, "on abort");
        if has_error || has_abort {
            out.push_str(" {\n");
            // The callee produced no value on these paths; handlers start
            // from an empty argument.
            let none = Argument::empty();
            if has_error {
                out.push_str(&format!("{}on error: {{\n", pad(indent + 1)));
                out.push_str(&walker.walk_labeled(node, "on error", &none, flow, indent + 2, ctx));
                out.push_str(&format!("{}}}\n", pad(indent + 1)));
            }
            if has_abort {
                out.push_str(&format!("{}on abort: {{\n", pad(indent + 1)));
                out.push_str(&walker.walk_labeled(node, "on abort", &none, flow, indent + 2, ctx));
                out.push_str(&format!("{}}}\n", pad(indent + 1)));
            }
            out.push_str(&format!("{}}}\n", pad(indent)));
        } else {
            out.push_str(";\n");
        }

        out.push_str(&walker.walk_unlabeled(node, &Argument::bound("valid"), flow, indent, ctx));
        out
    }
}

struct ConditionEmitter;
impl BehaviourEmitter for ConditionEmitter {
    fn node_type(&self) -> &str {
        "Mission::Condition"
    }

    fn emit(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        if node.transitions.is_empty() {
            return String::new();
        }

        let condition = arg
            .name()
            .map(str::to_string)
            .or_else(|| {
                node.property("condition")
                    .and_then(|p| p.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "true".to_string());

        let mut out = format!("{}if {} {{\n", pad(indent), condition);
        if let Some(then_target) = walker.nth_target(node, 0, flow) {
            out.push_str(&walker.render_node(then_target, &Argument::empty(), flow, indent + 1, ctx));
        }
        out.push_str(&format!("{}}}", pad(indent)));

        if node.transitions.len() >= 2 {
            out.push_str(" else {\n");
            if let Some(else_target) = walker.nth_target(node, 1, flow) {
                out.push_str(&walker.render_node(
                    else_target,
                    &Argument::empty(),
                    flow,
                    indent + 1,
                    ctx,
                ));
            }
            out.push_str(&format!("{}}}\n", pad(indent)));
        } else {
            out.push('\n');
        }
        out
    }
}

/// Timeout-guarded block wrapping the recursive walk of all successors.
struct WithinEmitter;
impl BehaviourEmitter for WithinEmitter {
    fn node_type(&self) -> &str {
        "Mission::Within"
    }

    fn emit(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        let timeout = node
            .property("timeout")
            .map(|p| p.to_string())
            .unwrap_or_else(|| "0".to_string());
        wrap_block(walker, node, arg, flow, indent, ctx, &format!("within {}", timeout))
    }
}

struct RepeatEmitter;
impl BehaviourEmitter for RepeatEmitter {
    fn node_type(&self) -> &str {
        "Mission::Repeat"
    }

    fn emit(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        let count = node
            .property("count")
            .map(|p| p.to_string())
            .unwrap_or_else(|| "1".to_string());
        wrap_block(walker, node, arg, flow, indent, ctx, &format!("repeat {}", count))
    }
}

struct StrategyEmitter;
impl BehaviourEmitter for StrategyEmitter {
    fn node_type(&self) -> &str {
        "Mission::Strategy"
    }

    fn emit(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        wrap_block(walker, node, arg, flow, indent, ctx, "strategy")
    }
}

fn wrap_block(
    walker: &FlowWalker,
    node: &NodeSaveInfo,
    arg: &Argument,
    flow: &FlowSaveInfo,
    indent: usize,
    ctx: &mut GenContext,
    keyword: &str,
) -> String {
    let body = walker.walk_all(node, arg, flow, indent + 1, ctx);
    format!("{}{} {{\n{}{}}}\n", pad(indent), keyword, body, pad(indent))
}

// --- Utility interface skeletons ---

fn timer_template(name: &str) -> String {
    format!(
        "async component {name}() {{\n  \
           trigger: create(int milliseconds);\n  \
           abort: cancel();\n  \
           return: timeout();\n\
         }}\n"
    )
}

fn authenticator_template(name: &str) -> String {
    format!(
        "async component {name}() {{\n  \
           trigger: authenticate(string code);\n  \
           return: granted();\n  \
           error: denied();\n\
         }}\n"
    )
}

fn siren_template(name: &str) -> String {
    format!(
        "component {name}() {{\n  \
           trigger: enable();\n  \
           abort: disable();\n\
         }}\n"
    )
}

fn presence_sensor_template(name: &str) -> String {
    format!(
        "async component {name}() {{\n  \
           trigger: activate();\n  \
           abort: deactivate();\n  \
           return: detected();\n\
         }}\n"
    )
}
