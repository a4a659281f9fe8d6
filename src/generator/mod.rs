use crate::error::GenerateError;
use crate::model::SaveInfo;

pub mod context;
pub mod dezyne;
pub mod dialect;
pub mod engine;
pub mod rozyne;
pub mod walker;

pub use context::{Argument, GenContext};
pub use dialect::{DialectSpec, NameCasing, StructuralRole};
pub use engine::DialectGenerator;
pub use walker::FlowWalker;

/// Target languages a generator plugin can identify as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Cpp,
    Ros,
    Python,
    Json,
    Dezyne,
    Rozyne,
    Custom,
}

/// The contract every dialect backend implements.
///
/// `generate_code` is the sole side-effecting entry point: it may write one
/// file per top-level structural node under the output folder, and returns a
/// human-diagnostic fragment of the emitted source. It must be idempotent for
/// an unchanged `SaveInfo` snapshot and must never mutate its input.
pub trait GeneratorPlugin {
    fn generate_code(&self, root: &SaveInfo) -> Result<String, GenerateError>;

    /// Static identity used for plugin discovery and selection.
    fn supported_language(&self) -> Language;

    /// Display name of the target language.
    fn language_name(&self) -> &str;
}
