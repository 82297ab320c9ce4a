pub mod command;
pub mod config;
pub mod halo;
pub mod mcp;
pub mod server;
pub mod service;

pub use config::HaloConfig;
pub use halo::{ApiError, HaloClient};
pub use service::HaloService;
