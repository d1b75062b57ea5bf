//! Database connectors and utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config, resolve_database};
//!
//! let config = MongoConfig::new("mongodb://localhost:27017/catalog");
//! let client = connect_from_config(&config).await?;
//! let db = resolve_database(&client, &config, "catalog");
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
