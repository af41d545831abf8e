mod memory_registry;
mod registry_error;
mod session_registry;

pub use memory_registry::*;
pub use registry_error::*;
pub use session_registry::*;
