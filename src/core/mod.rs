//! # Core Module
//!
//! Configuration and the map catalog for the mapvote bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Catalog is loadable from a YAML file
//! - 1.0.0: Initial creation with config and built-in map pool

pub mod catalog;
pub mod config;

// Re-export commonly used items
pub use catalog::{CatalogError, MapCatalog, MapCategory};
pub use config::Config;
