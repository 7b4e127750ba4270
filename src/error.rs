//! Unified error types for the Flavor Town API.

use std::net::SocketAddr;

use thiserror::Error;

/// Unified error type for the API server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: SocketAddr,
        /// Underlying socket error.
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(std::io::Error),

    /// OpenAPI document could not be rendered.
    #[error("openapi rendering failed: {0}")]
    OpenApi(String),

    /// Metrics exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ApiError>;
