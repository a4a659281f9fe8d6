use thiserror::Error;

/// Errors produced while loading and validating a node-library definition.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to parse node library JSON: {0}")]
    JsonParseError(String),

    #[error("Object must contain a type")]
    MissingType,

    #[error("Missing id/type attribute in property")]
    MissingIdOrType,

    #[error("Node library entry '{key}' is invalid: {message}")]
    InvalidEntry { key: String, message: String },
}

/// Errors that can abort a whole generation run.
///
/// Per-subtree problems (dangling transitions, missing callees, unknown node
/// types) are not represented here: those degrade to an empty rendering plus a
/// warning log, and generation of sibling subtrees continues.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirError {
        path: String,
        source: std::io::Error,
    },
}

/// Errors that can occur when decoding a binary save file.
#[derive(Error, Debug)]
pub enum SaveFormatError {
    #[error("Not a save file: bad magic bytes")]
    BadMagic,

    #[error("Unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("Save payload is malformed: {0}")]
    Corrupt(String),
}
