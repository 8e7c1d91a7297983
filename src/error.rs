//! Error types for relget.
//!
//! Every failure of the resolve/fetch protocol maps to exactly one variant so
//! callers can tell an infrastructure problem from a protocol answer.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be built (bad base URL, unusable token, ...).
    #[error("new request: {0}")]
    Request(String),

    /// DNS, connect, TLS or timeout failure while talking to the API.
    #[error("failed to do request: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-200 answer as classified by the transport.
    #[error("{0}")]
    Status(String),

    /// Non-200 answer to the release metadata lookup.
    #[error("find asset id ({status}): {message}")]
    MetadataFetch { status: u16, message: String },

    /// Release metadata body was not the expected JSON.
    #[error("unmarshal response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No asset in the release carries the requested name.
    #[error("asset not found: {name}")]
    AssetNotFound { name: String },

    /// Non-200 answer to the asset content request.
    #[error("failed to download release ({status}): {message}")]
    ContentFetch { status: u16, message: String },

    /// The destination sink rejected the asset bytes.
    #[error("failed to write file: {0}")]
    Write(#[source] std::io::Error),

    #[error("missing repository argument")]
    MissingReference,

    #[error("invalid repository argument: {0}")]
    InvalidReference(String),

    /// Local I/O outside the copy itself, e.g. creating the output file.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True for the distinguished name-lookup miss.
    pub fn is_asset_not_found(&self) -> bool {
        matches!(self, Error::AssetNotFound { .. })
    }
}
