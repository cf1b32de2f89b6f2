pub mod access;
pub mod allocator;
pub mod constants;
pub mod error;
pub mod memory;
pub mod process;
pub mod table;

// Re-export commonly used items for convenience
pub use access::{AccessKind, MemoryAccess};
pub use constants::*;
pub use error::VmError;
pub use memory::PhysicalMemory;
pub use table::VirtualAddress;
