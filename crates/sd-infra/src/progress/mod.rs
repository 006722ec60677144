//! Setup progress checkpoint repositories.

pub mod file;
pub mod memory;

pub use file::FileSetupProgressRepository;
pub use memory::MemorySetupProgressRepository;
