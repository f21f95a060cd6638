pub mod browser;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod import_export;
pub mod metadata;
pub mod models;
pub mod operations;
pub mod server;
pub mod store;
pub mod tags;
pub mod utils;

// Re-export error types for convenience
pub use error::TiosaError;
