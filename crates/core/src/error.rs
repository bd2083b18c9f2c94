//! Error types for the sandbox.

use thiserror::Error;

/// Main error type for the sandbox.
#[derive(Error, Debug)]
pub enum Error {
    /// The light-collection pass found no light node in the scene
    #[error("Scene contains no light node")]
    MissingLight,

    /// A drawable or light shape failed during transform or draw
    #[error("Shape error: {0}")]
    Shape(String),

    /// Window creation or management errors
    #[error("Window error: {0}")]
    Window(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration files
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using the sandbox's Error type.
pub type Result<T> = std::result::Result<T, Error>;
