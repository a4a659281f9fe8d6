//! The Dezyne-like structural component dialect.
//!
//! Emits one `.dzn` file per top-level structural node: component files with
//! an import header, `requires` lines for direct children, and a behaviour
//! block assembled by the shared flow walker; utility leaf types emit fixed
//! interface skeletons.

use super::Language;
use super::context::{Argument, GenContext};
use super::dialect::{BehaviourEmitter, DialectSpec, NameCasing, StructuralRole, pad};
use super::walker::FlowWalker;
use crate::model::{FlowSaveInfo, FlowType, NodeSaveInfo, PropertyType};
use ahash::AHashMap;

pub fn dialect() -> DialectSpec {
    let mut spec = DialectSpec {
        name: "Dezyne",
        language: Language::Dezyne,
        file_extension: "dzn",
        casing: NameCasing::Lower,
        start_types: &["Generic::Start"],
        structural: AHashMap::new(),
        behaviour: AHashMap::new(),
        type_syntax,
        component_file,
        capability_file,
    };

    spec.structural
        .insert("Generic::Component".to_string(), StructuralRole::Component);
    spec.structural
        .insert("Generic::Interface".to_string(), StructuralRole::Capability);
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

    spec
}

fn type_syntax(property_type: PropertyType) -> &'static str {
    match property_type {
        PropertyType::Boolean => "bool",
        PropertyType::Integer => "int",
        PropertyType::Real => "real",
        PropertyType::String => "string",
        _ => "void",
    }
}

fn typed_arguments(spec: &DialectSpec, flow: &FlowSaveInfo) -> String {
    flow.arguments
        .iter()
        .map(|a| {
            format!(
                "{} {}",
                (spec.type_syntax)(a.property_type),
                spec.fix_case(&a.name)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn component_file(walker: &FlowWalker, node: &NodeSaveInfo, ctx: &mut GenContext) -> String {
    let spec = walker.dialect();
    let name = spec.fix_case(node.display_name());

    let mut out = format!("component {} {{\n", name);
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

    out.push_str(&format!("{}behaviour {{\n", pad(1)));
    for flow in &node.flows {
        let header = format!(
            "on {}.{}({})",
            name,
            spec.fix_case(&flow.name),
            spec.argument_list(flow)
        );
        let body = walker.walk_flow(flow, 3, ctx);
        if body.trim().is_empty() {
            out.push_str(&format!("{}{}: {{ }}\n", pad(2), header));
        } else {
            out.push_str(&format!("{}{}: {{\n{}{}}}\n", pad(2), header, body, pad(2)));
        }
    }
    out.push_str(&format!("{}}}\n}}\n", pad(1)));
    out
}

fn capability_file(walker: &FlowWalker, node: &NodeSaveInfo, _ctx: &mut GenContext) -> String {
    let spec = walker.dialect();
    let name = spec.fix_case(node.display_name());

    let mut out = format!("interface i{} {{\n", name);
    for flow in &node.flows {
        let direction = match flow.flow_type {
            FlowType::Out => "out",
            _ => "in",
        };
        out.push_str(&format!(
            "{}{} {} {}({});\n",
            pad(1),
            direction,
            (spec.type_syntax)(PropertyType::parse(&flow.return_type)),
            spec.fix_case(&flow.name),
            typed_arguments(spec, flow)
        ));
    }

    out.push_str(&format!("\n{}behaviour {{\n", pad(1)));
    for flow in node.flows_of_type(FlowType::In) {
        out.push_str(&format!(
            "{}on {}: {{ }}\n",
            pad(2),
            spec.fix_case(&flow.name)
        ));
    }
    out.push_str(&format!("{}}}\n}}\n", pad(1)));
    out
}

// --- Behaviour emitters ---

/// Terminal node: replies with the carried argument, or nothing at all when
/// no value is bound.
struct EndEmitter;
impl BehaviourEmitter for EndEmitter {
    fn node_type(&self) -> &str {
        "Generic::End"
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
            Some(name) => format!("{}reply({});\n", pad(indent), name),
            None => String::new(),
        }
    }
}

/// Terminal error node: always replies, with `false` standing in when no
/// value is bound.
struct ErrorEmitter;
impl BehaviourEmitter for ErrorEmitter {
    fn node_type(&self) -> &str {
        "Generic::Error"
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
        format!("{}reply({});\n", pad(indent), arg.name().unwrap_or("false"))
    }
}

/// Cross-reference call: resolves the callee component and flow, emits the
/// call bound to a fresh `valid` local, and threads that local onward.
struct ActionEmitter;
impl BehaviourEmitter for ActionEmitter {
    fn node_type(&self) -> &str {
        "Generic::Action"
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
            "{}bool valid = {}.{}({});\n",
            pad(indent),
            spec.fix_case(callee.display_name()),
            spec.fix_case(&callee_flow.name),
            arg.as_expr()
        );
        out.push_str(&walker.walk_all(node, &Argument::bound("valid"), flow, indent, ctx));
        out
    }
}

/// Binary branch: the first transition is the then-edge, the second (when
/// present) the else-edge. No transitions at all renders nothing.
struct ConditionEmitter;
impl BehaviourEmitter for ConditionEmitter {
    fn node_type(&self) -> &str {
        "Generic::Condition"
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

        let mut out = format!("{}if ({}) {{\n", pad(indent), condition);
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

// --- Utility interface skeletons ---
// Fixed text keyed purely by node type; only the display name varies.

fn timer_template(name: &str) -> String {
    format!(
        "interface i{name} {{\n  \
           in void create(int milliseconds);\n  \
           in void cancel();\n  \
           out void timeout();\n\n  \
           behaviour {{\n    \
             on create: {{ }}\n    \
             on cancel: {{ }}\n  \
           }}\n\
         }}\n"
    )
}

fn authenticator_template(name: &str) -> String {
    format!(
        "interface i{name} {{\n  \
           in void authenticate(string code);\n  \
           out void granted();\n  \
           out void denied();\n\n  \
           behaviour {{\n    \
             on authenticate: {{ }}\n  \
           }}\n\
         }}\n"
    )
}

fn siren_template(name: &str) -> String {
    format!(
        "interface i{name} {{\n  \
           in void enable();\n  \
           in void disable();\n\n  \
           behaviour {{\n    \
             on enable: {{ }}\n    \
             on disable: {{ }}\n  \
           }}\n\
         }}\n"
    )
}

fn presence_sensor_template(name: &str) -> String {
    format!(
        "interface i{name} {{\n  \
           in void activate();\n  \
           in void deactivate();\n  \
           out void detected();\n\n  \
           behaviour {{\n    \
             on activate: {{ }}\n    \
             on deactivate: {{ }}\n  \
           }}\n\
         }}\n"
    )
}
