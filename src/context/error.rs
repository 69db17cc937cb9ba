//! Error types for context resolution and propagation.

use thiserror::Error;

/// Boxed error returned by individual parsers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building or running the context subsystem.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Static configuration is malformed. The component must not start.
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// A parser registration violates the registry contract.
    #[error("Contract violation: {0}")]
    Contract(String),

    /// The request handed to the registry is not a recognized inbound request.
    #[error("Argument must be of type \"{0}\"")]
    TypeMismatch(&'static str),

    /// A parser failed during a sweep.
    #[error("Parser \"{parser}\" failed: {source}")]
    Parse {
        parser: String,
        #[source]
        source: BoxError,
    },

    /// A context value cannot be carried in an HTTP header field.
    #[error("Value for header \"{name}\" is not header-safe")]
    InvalidHeader { name: String },

    /// The inbound HTTP request lacks what is needed to build a request URL.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for context operations.
pub type ContextResult<T> = Result<T, ContextError>;
