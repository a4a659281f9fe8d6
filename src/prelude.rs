//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the seisei crate: the save
//! data model, the library loader, and the generator plugin surface.

// Save data model
pub use crate::model::{
    FlowSaveInfo, FlowType, NodeSaveInfo, PropertyValue, SaveInfo, TransitionSaveInfo, decode_save,
    encode_save,
};

// Type registry
pub use crate::model::{ConnectorType, ControlType, LibraryType, PropertyType};

// Node library
pub use crate::library::{Library, NodeConfig, PropertiesConfig, parse_node_config};

// Generation
pub use crate::generator::{
    Argument, DialectGenerator, GenContext, GeneratorPlugin, Language,
};

// Error types
pub use crate::error::{ConfigError, GenerateError, SaveFormatError};
