//! Error types shared by every devlog layer.

use thiserror::Error;

/// Errors surfaced while talking to the history API, rendering output, or
/// touching local preference storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DevlogError {
    /// The configured API base URL could not be parsed.
    #[error("API URL is invalid: {0}")]
    InvalidUrl(String),

    /// The API answered with a non-success status.
    #[error("API error: {message}")]
    Api {
        /// Status and response detail returned by the server.
        message: String,
    },

    /// The requested resource does not exist on the server.
    #[error("not found: {message}")]
    NotFound {
        /// Server detail naming the missing resource.
        message: String,
    },

    /// Networking failed while calling the API.
    #[error("network error talking to the API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("unexpected response payload: {message}")]
    Decode {
        /// Deserialisation error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Request parameters failed validation before any call was made.
    #[error("invalid query: {message}")]
    InvalidQuery {
        /// Description of the rejected parameter.
        message: String,
    },

    /// An export was requested for an empty data set.
    #[error("nothing to export: {message}")]
    EmptyExport {
        /// Which export had no rows.
        message: String,
    },

    /// Local preference storage failed.
    #[error("preference storage error: {message}")]
    Persistence {
        /// Error detail from the persistence layer.
        message: String,
    },
}

/// Wraps an I/O error in [`DevlogError::Io`].
#[must_use]
pub fn io_error(error: &std::io::Error) -> DevlogError {
    DevlogError::Io {
        message: error.to_string(),
    }
}
