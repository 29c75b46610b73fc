//! Error types for the clinic API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other unexpected responses land in `HttpError` with the raw
//! status code and body for debugging.
//!
//! The shape pipeline and the credential decoder have their own error types
//! (`ShapeError`, `CredentialsError`) since they never see a response.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the client `parse_*` and `build_*` methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, the requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors produced while loading API credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// A required key is absent from the decoded mapping.
    #[error("missing credential field `{0}`")]
    MissingField(&'static str),

    /// The credentials file could not be read.
    #[error("failed to read credentials from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced by the mock-type pipeline.
///
/// `path` fields use dotted notation with bracketed sequence indices,
/// e.g. `patients.get` or `tags[2]`. The root is `<root>`.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A node did not classify as callable, sequence, namespace or scalar.
    #[error("unsupported node `{type_name}` at {path}")]
    Unsupported { path: String, type_name: String },

    /// Nesting exceeded the walker's depth limit.
    #[error("shape nested deeper than {limit} levels at {path}")]
    TooDeep { path: String, limit: usize },

    /// The augmenter was handed something other than a namespace.
    #[error("expected a namespace at the shape root")]
    NotANamespace,

    /// The input already declares a `raw` key.
    #[error("shape already contains a `raw` key")]
    RawCollision,

    /// The final shape could not be serialized.
    #[error("failed to serialize shape: {0}")]
    Serialize(#[from] serde_json::Error),
}
