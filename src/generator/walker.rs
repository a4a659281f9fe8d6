use super::context::{Argument, GenContext};
use super::dialect::DialectSpec;
use crate::model::{FlowSaveInfo, NodeSaveInfo, SaveInfo, TransitionSaveInfo};
use tracing::{debug, warn};

/// The shared flow traversal both dialect backends run on.
///
/// A walker borrows the save-data snapshot and the dialect tables for the
/// duration of one generation run; it performs only reads. Every "can't
/// resolve this" situation renders as an empty string plus a warning log,
/// leaving sibling subtrees unaffected.
pub struct FlowWalker<'a> {
    root: &'a SaveInfo,
    dialect: &'a DialectSpec,
}

impl<'a> FlowWalker<'a> {
    pub fn new(root: &'a SaveInfo, dialect: &'a DialectSpec) -> Self {
        Self { root, dialect }
    }

    pub fn root(&self) -> &'a SaveInfo {
        self.root
    }

    pub fn dialect(&self) -> &'a DialectSpec {
        self.dialect
    }

    /// Renders a flow's body: locates the unique start node and follows its
    /// transitions with a fresh empty argument. A flow without a start node
    /// renders as nothing.
    pub fn walk_flow(&self, flow: &FlowSaveInfo, indent: usize, ctx: &mut GenContext) -> String {
        match flow.start_node(self.dialect.start_types) {
            Some(start) => self.walk_all(start, &Argument::empty(), flow, indent, ctx),
            None => {
                warn!(flow = %flow.name, "flow has no start node, skipping");
                String::new()
            }
        }
    }

    /// Dispatches one behaviour node through the dialect's emitter table.
    /// Unsupported node types render as nothing.
    pub fn render_node(
        &self,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        let Some(emitter) = self.dialect.behaviour.get(&node.node_id) else {
            warn!(
                node = %node.id,
                node_type = %node.node_id,
                "unsupported behaviour node type, skipping subtree"
            );
            return String::new();
        };

        // Transitions may form a cycle; re-entering a node that is still
        // being rendered would recurse forever.
        if !ctx.enter_node(&node.id) {
            warn!(
                node = %node.id,
                flow = %flow.name,
                "transition cycle detected, skipping re-entry"
            );
            return String::new();
        }
        let output = emitter.emit(self, node, arg, flow, indent, ctx);
        ctx.leave_node();
        output
    }

    /// Follows every outgoing transition of `node` in list order, rendering
    /// each destination and concatenating the results. Fan-out into multiple
    /// unlabeled successors is intentional; all of them render.
    pub fn walk_all(
        &self,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        self.walk_filtered(node, arg, flow, indent, ctx, |_| true)
    }

    /// Follows only the unlabeled ("normal") transitions.
    pub fn walk_unlabeled(
        &self,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        self.walk_filtered(node, arg, flow, indent, ctx, |t| t.label.is_empty())
    }

    /// Follows the transitions whose label equals `label` exactly
    /// (case-sensitive). Every matching transition fires, in list order.
    pub fn walk_labeled(
        &self,
        node: &NodeSaveInfo,
        label: &str,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
    ) -> String {
        self.walk_filtered(node, arg, flow, indent, ctx, |t| t.label == label)
    }

    /// Whether `node` has at least one transition with exactly this label.
    pub fn has_labeled(&self, node: &NodeSaveInfo, label: &str) -> bool {
        node.transitions.iter().any(|t| t.label == label)
    }

    fn walk_filtered(
        &self,
        node: &NodeSaveInfo,
        arg: &Argument,
        flow: &FlowSaveInfo,
        indent: usize,
        ctx: &mut GenContext,
        keep: impl Fn(&TransitionSaveInfo) -> bool,
    ) -> String {
        let mut output = String::new();
        for transition in node.transitions.iter().filter(|t| keep(t)) {
            if let Some(target) = self.transition_target(transition, flow) {
                output.push_str(&self.render_node(target, arg, flow, indent, ctx));
            }
        }
        output
    }

    /// Resolves a transition's destination within the flow's node pool.
    /// Dangling destinations are tolerated: the edge is skipped with a log.
    pub fn transition_target<'f>(
        &self,
        transition: &TransitionSaveInfo,
        flow: &'f FlowSaveInfo,
    ) -> Option<&'f NodeSaveInfo> {
        let found = flow.node(&transition.dst_id);
        if found.is_none() {
            warn!(
                transition = %transition.id,
                dst = %transition.dst_id,
                flow = %flow.name,
                "dangling transition destination, skipping edge"
            );
        }
        found
    }

    /// Destination of the n-th outgoing transition, if present and resolvable.
    pub fn nth_target<'f>(
        &self,
        node: &NodeSaveInfo,
        index: usize,
        flow: &'f FlowSaveInfo,
    ) -> Option<&'f NodeSaveInfo> {
        node.transitions
            .get(index)
            .and_then(|t| self.transition_target(t, flow))
    }

    /// Resolves the cross-reference carried by a node's `component` property:
    /// the callee structural node (`data_id`) and the callee flow within it
    /// (`option_data_id`). A miss on either logs and abandons this branch.
    pub fn resolve_callee(
        &self,
        node: &NodeSaveInfo,
    ) -> Option<(&'a NodeSaveInfo, &'a FlowSaveInfo)> {
        let Some(reference) = node.property("component").and_then(|p| p.component_ref()) else {
            warn!(node = %node.id, "node carries no resolvable component reference, skipping");
            return None;
        };

        let Some(callee) = self.root.find_structural(&reference.data_id) else {
            warn!(
                node = %node.id,
                callee = %reference.data_id,
                "referenced component not found, abandoning branch"
            );
            return None;
        };

        let Some(callee_flow) = callee.flow(&reference.option_data_id) else {
            warn!(
                node = %node.id,
                callee = %callee.display_name(),
                flow = %reference.option_data_id,
                "referenced flow not found on component, abandoning branch"
            );
            return None;
        };

        debug!(
            node = %node.id,
            callee = %callee.display_name(),
            flow = %callee_flow.name,
            "resolved component reference"
        );
        Some((callee, callee_flow))
    }
}
