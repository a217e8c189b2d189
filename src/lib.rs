pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod resolver;

pub use api::{ApiClient, ApiError};
pub use config::Session;
pub use models::ServiceInstance;
