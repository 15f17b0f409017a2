//! Error types for bench-viz-core (WASM-compatible)

use thiserror::Error;

/// Result type alias for bench-viz-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that work in both native and WASM environments
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse benchmark records: {0}")]
    ParseError(String),

    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
