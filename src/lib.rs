//! Flavor Town API.
//!
//! A small HTTP service with two fixed JSON endpoints, a blanket CORS policy
//! and API documentation serving:
//!
//! ```text
//! GET     /api/v1/test     {"message":"Flavor Town API is running! 🍦",...}
//! GET     /api/v1/health   {"status":"healthy","service":"flavor-town-api"}
//! GET     /docs            301 -> /docs/index.html
//! GET     /docs/*          static files from DOCS_DIR
//! GET     /swagger.json    generated OpenAPI document
//! GET     /swagger.yaml    generated OpenAPI document
//! OPTIONS *                204
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Routes, handlers, CORS and docs
//! - [`server`]: Listener binding and serve loop
//! - [`metrics`]: Request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result};
