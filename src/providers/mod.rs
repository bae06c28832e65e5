pub mod file_gateway;
pub mod memory_gateway;
pub mod provider;

pub use file_gateway::FileGateway;
pub use memory_gateway::MemoryGateway;
pub use provider::NoteGateway;
