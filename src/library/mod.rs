pub mod config;
pub mod loader;

pub use config::*;
pub use loader::*;
