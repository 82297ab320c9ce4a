pub mod middleware;

pub use middleware::log_request;
