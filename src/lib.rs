pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod services;
pub mod types;

pub use error::GatewayError;
pub use gateway::{ApiRequest, Gateway};
