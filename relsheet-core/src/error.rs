//! Error types for the fetch-transform-emit cycle

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Every way a run can fail
///
/// All variants are fatal. The CLI reports them identically, the split
/// exists so callers and tests can tell transport, decode and render
/// failures apart.
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// The request never produced a response (DNS, connect, TLS, body read)
    #[error("failed to fetch manifest from {endpoint}")]
    Request {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The fetch did not complete before the deadline
    #[error("fetching manifest from {endpoint} timed out after {}s", .timeout.as_secs())]
    Timeout { endpoint: String, timeout: Duration },

    /// The endpoint answered with a non-2xx status
    #[error("manifest endpoint {endpoint} returned {status}")]
    Status { endpoint: String, status: String },

    /// A local manifest could not be read
    #[error("failed to read manifest from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The body is not a JSON array of artifact records
    #[error("manifest is not a JSON array of artifact records")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// The ordered records could not be rendered
    #[error("failed to render {format} report")]
    Render {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The rendered report could not be written out
    #[error("failed to write report")]
    Write {
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be loaded
    #[error("failed to load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T, E = ReleaseError> = std::result::Result<T, E>;
