use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Single-slot carrier for "the most recently produced value".
///
/// Threaded explicitly through the recursive descent instead of living as
/// shared state on the generator: a node that produces a value (an action's
/// callee return, for instance) binds a fresh name here and hands it to its
/// continuation, where it becomes the input expression of the next node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argument {
    name: Option<String>,
}

impl Argument {
    pub fn empty() -> Self {
        Self { name: None }
    }

    pub fn bound(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The carried name, or `""` when nothing is bound.
    pub fn as_expr(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Mutable state scoped to one generation run, threaded through every
/// recursive call so the engine stays reentrant.
#[derive(Debug)]
pub struct GenContext {
    out_dir: PathBuf,
    /// Generated-file names accumulated while descending into a structural
    /// node's children. De-duplicated, insertion-ordered, cleared when a new
    /// top-level structural node begins.
    imports: Vec<String>,
    /// Behaviour node ids currently being rendered, innermost last. Guards
    /// against transition cycles re-entering a node.
    walk_stack: Vec<String>,
}

impl GenContext {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            imports: Vec::new(),
            walk_stack: Vec::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Records a generated file for the enclosing file's import header.
    /// Re-adding an already-listed file keeps its original position.
    pub fn add_import(&mut self, file_name: &str) {
        if !self.imports.iter().any(|i| i == file_name) {
            self.imports.push(file_name.to_string());
        }
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn clear_imports(&mut self) {
        self.imports.clear();
    }

    /// Marks a behaviour node as being rendered. Returns `false` when the
    /// node is already on the render stack, i.e. a transition cycle led back
    /// into it.
    pub fn enter_node(&mut self, node_id: &str) -> bool {
        if self.walk_stack.iter().any(|id| id == node_id) {
            return false;
        }
        self.walk_stack.push(node_id.to_string());
        true
    }

    /// Pops the innermost node after its rendering completed.
    pub fn leave_node(&mut self) {
        self.walk_stack.pop();
    }

    /// Truncate-and-write one generated file. An I/O failure skips just this
    /// file; sibling files still attempt generation.
    pub fn write_file(&self, file_name: &str, content: &str) {
        let path = self.out_dir.join(file_name);
        if let Err(e) = fs::write(&path, content) {
            warn!(file = %path.display(), error = %e, "skipping file that could not be written");
        }
    }
}
