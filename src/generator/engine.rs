use super::context::GenContext;
use super::dialect::{DialectSpec, StructuralRole};
use super::walker::FlowWalker;
use super::{GeneratorPlugin, Language};
use crate::error::GenerateError;
use crate::model::{NodeSaveInfo, SaveInfo};
use itertools::Itertools;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A generator plugin driven entirely by a `DialectSpec`.
///
/// Both reference dialects are instances of this one engine; they differ only
/// in the tables and formatting hooks their spec carries.
pub struct DialectGenerator {
    dialect: DialectSpec,
    out_root: PathBuf,
}

impl DialectGenerator {
    pub fn new(dialect: DialectSpec) -> Self {
        Self {
            dialect,
            out_root: PathBuf::from("."),
        }
    }

    /// The Dezyne-like structural component dialect.
    pub fn dezyne() -> Self {
        Self::new(super::dezyne::dialect())
    }

    /// The Rozyne-like mission/task dialect.
    pub fn rozyne() -> Self {
        Self::new(super::rozyne::dialect())
    }

    /// Overrides the working directory under which `generated/` is created.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.out_root = root.into();
        self
    }

    pub fn dialect(&self) -> &DialectSpec {
        &self.dialect
    }

    /// Emits one structural node (and, for components, its subtree) into its
    /// own file. Returns the file content, or `None` for unsupported types.
    fn generate_structural(
        &self,
        walker: &FlowWalker,
        node: &NodeSaveInfo,
        ctx: &mut GenContext,
    ) -> Option<String> {
        let role = match self.dialect.structural.get(&node.node_id) {
            Some(role) => role,
            None => {
                warn!(
                    node = %node.id,
                    node_type = %node.node_id,
                    "unsupported structural node type, skipping"
                );
                return None;
            }
        };

        let content = match role {
            StructuralRole::Utility(template) => {
                template(&self.dialect.fix_case(node.display_name()))
            }
            StructuralRole::Capability => (self.dialect.capability_file)(walker, node, ctx),
            StructuralRole::Component => {
                // Children first, so their files exist and the import list is
                // complete before the parent's header is assembled.
                for child in &node.children {
                    if self.generate_structural(walker, child, ctx).is_some() {
                        ctx.add_import(&self.dialect.file_name(child));
                    }
                }
                let body = (self.dialect.component_file)(walker, node, ctx);
                self.prepend_imports(ctx, body)
            }
        };

        let file_name = self.dialect.file_name(node);
        debug!(file = %file_name, node = %node.display_name(), "emitting structural node");
        ctx.write_file(&file_name, &content);
        Some(content)
    }

    fn prepend_imports(&self, ctx: &GenContext, body: String) -> String {
        if ctx.imports().is_empty() {
            return body;
        }
        let header = ctx
            .imports()
            .iter()
            .map(|file| format!("import {};", file))
            .join("\n");
        format!("{}\n\n{}", header, body)
    }
}

impl GeneratorPlugin for DialectGenerator {
    fn generate_code(&self, root: &SaveInfo) -> Result<String, GenerateError> {
        let out_dir = self.out_root.join("generated");
        fs::create_dir_all(&out_dir).map_err(|e| GenerateError::OutputDirError {
            path: out_dir.display().to_string(),
            source: e,
        })?;

        let walker = FlowWalker::new(root, &self.dialect);
        let mut ctx = GenContext::new(&out_dir);
        let mut last_fragment = String::new();

        for top_level in &root.structural_nodes {
            // Fresh import list per top-level node; each iteration is fully
            // self-contained (its own file, its own imports).
            ctx.clear_imports();
            if let Some(content) = self.generate_structural(&walker, top_level, &mut ctx) {
                last_fragment = content;
            }
        }

        Ok(last_fragment)
    }

    fn supported_language(&self) -> Language {
        self.dialect.language
    }

    fn language_name(&self) -> &str {
        self.dialect.name
    }
}
