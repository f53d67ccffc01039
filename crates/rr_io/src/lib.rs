//! crates/rr_io/src/lib.rs
//! I/O crate for the report engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - `loader`: read the JSON input bundle and answer files.
//! - `canonical_json`: sorted-key compact JSON and all-or-nothing file writes.
//! - `hasher`: SHA-256 digests of written artifacts.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for rr_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (create_dir_all, rename, fsync, etc.)
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse or serialization errors, with the position serde_json reports.
    #[error("json error at {at}: {msg}")]
    Json { at: String, msg: String },

    /// Hashing-related errors (feature disabled, read failures).
    #[error("hash error: {0}")]
    Hash(String),

    /// Input is well-formed JSON but not a usable request.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        let at = if e.line() == 0 {
            "/".to_string()
        } else {
            format!("line {}, column {}", e.line(), e.column())
        };
        IoError::Json { at, msg: e.to_string() }
    }
}

pub mod canonical_json;
#[cfg(feature = "hash")]
pub mod hasher;
pub mod loader;

/// Compute SHA-256 hex of `bytes` or fail when hashing is compiled out.
pub fn try_sha256_hex(bytes: &[u8]) -> Result<String, IoError> {
    #[cfg(feature = "hash")]
    {
        Ok(crate::hasher::sha256_hex(bytes))
    }
    #[cfg(not(feature = "hash"))]
    {
        let _ = bytes;
        Err(IoError::Hash("hash feature disabled".into()))
    }
}

pub mod prelude {
    pub use crate::{try_sha256_hex, IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_bytes, write_atomic, write_canonical_file};
    #[cfg(feature = "hash")]
    pub use crate::hasher::{sha256_file, sha256_hex};
    pub use crate::loader::{load_answers, load_request, parse_request, ReportRequest};
}
