pub mod codec;
pub mod property;
pub mod save;
pub mod types;

pub use codec::*;
pub use property::*;
pub use save::*;
pub use types::*;
