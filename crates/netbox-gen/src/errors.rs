//! Error types for the service generator.

use thiserror::Error;

/// Errors that can occur while generating a service file.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A template input is not usable
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to render the service template
    #[error("Failed to render template: {0}")]
    RenderError(String),

    /// Rendered code did not parse as Rust
    #[error("Generated code is invalid: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
