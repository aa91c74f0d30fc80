//! Error types for the docgrid library.

use std::io;
use thiserror::Error;

/// Result type alias for docgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing analysis responses.
///
/// Malformed block graphs (missing fields, dangling ids, duplicate cell
/// coordinates) are never reported through this enum; the extractors
/// tolerate them by defaulting and overwriting. Every variant here is a
/// condition the caller may want to act on differently.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing or serializing response JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The analysis service reported a transport or request error.
    #[error("Service error: {0}")]
    Service(String),

    /// The supplied credentials were rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Staging the document to object storage failed; no job was started.
    #[error("Document staging failed: {0}")]
    Staging(String),

    /// The analysis job reached the FAILED state.
    ///
    /// Carries the status message provided by the service, verbatim.
    #[error("Analysis job failed: {0}")]
    JobFailed(String),

    /// The polling budget was exhausted before the job reached a terminal
    /// state.
    #[error("Analysis job timed out after {attempts} status checks")]
    JobTimedOut {
        /// Number of status queries performed before giving up.
        attempts: u32,
    },

    /// The job succeeded but the returned pages contained no blocks.
    #[error("Analysis produced no result")]
    EmptyAnalysis,
}
