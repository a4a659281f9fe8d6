//! # Seisei - Flow-Graph Code Generation Engine
//!
//! **Seisei** turns the node graphs of a visual low-code editor into source
//! text. A project is a forest of structural nodes (components, interfaces,
//! utility leaves), each carrying named flows; a flow is a small directed
//! graph of typed behaviour nodes (actions, conditions, timers, async/sync
//! calls, loops) connected by labeled transitions. A generator plugin walks
//! those flow graphs and emits one file per top-level structural node in its
//! target dialect.
//!
//! ## Core Workflow
//!
//! 1.  **Load a node library**: parse the JSON library definitions into
//!     validated [`library::NodeConfig`] entries.
//! 2.  **Build or load a project**: an editor assembles a
//!     [`model::SaveInfo`] graph, or one is decoded from a binary save file
//!     with [`model::decode_save`].
//! 3.  **Pick a dialect**: every backend implements
//!     [`generator::GeneratorPlugin`]; the two reference dialects are
//!     [`generator::DialectGenerator::dezyne`] and
//!     [`generator::DialectGenerator::rozyne`], both running on one shared
//!     flow-walking engine parameterized by per-dialect tables.
//! 4.  **Generate**: `generate_code` walks the graph and writes
//!     `generated/<name>.<ext>` files. Generation is best-effort: dangling
//!     transitions, missing callees and unknown node types log a warning and
//!     render nothing, leaving sibling subtrees untouched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seisei::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("project.save")?;
//!     let save = decode_save(&bytes)?;
//!
//!     let generator = DialectGenerator::dezyne();
//!     let fragment = generator.generate_code(&save)?;
//!     println!("{}", fragment);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod generator;
pub mod library;
pub mod model;
pub mod prelude;
