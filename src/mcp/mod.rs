pub mod adapter;
pub mod dto;
pub mod server;
pub mod tools;

pub use adapter::{ToolDescriptor, descriptors, dispatch};
pub use server::HaloMcpServer;
