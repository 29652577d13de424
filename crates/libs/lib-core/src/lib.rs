//! # Core Library
//!
//! Configuration, error taxonomy and the service catalog shared by the gateway.

pub mod catalog;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use catalog::ServiceCatalog;
pub use config::{Config, Environment};
pub use error::{AppError, Result};
