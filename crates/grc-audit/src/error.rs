//! Error types for GRC Audit
//!
//! Provides error handling for:
//! - Audit lookup and persistence
//! - Risk rating validation
//! - Configuration and document loading

use grc_scope::ScopeIdError;

/// Main audit error type
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// No audit with this id
    #[error("audit not found: {0}")]
    NotFound(String),

    /// An audit with this id already exists
    #[error("audit already exists: {0}")]
    AlreadyExists(String),

    /// Update based on an outdated copy of the audit
    #[error("stale revision for audit {id}: expected {expected}, found {actual}")]
    Conflict {
        /// Audit id
        id: String,
        /// Revision the caller edited
        expected: u64,
        /// Revision currently stored
        actual: u64,
    },

    /// Probability or impact out of range
    #[error("invalid risk rating: {0}")]
    InvalidRisk(String),

    /// Invalid configuration values
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed scope id
    #[error("scope error: {0}")]
    Scope(#[from] ScopeIdError),

    /// Document could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Document extension is neither YAML nor JSON
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Document content did not deserialize
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Source document
        path: String,
        /// Deserializer message
        message: String,
    },
}

impl AuditError {
    /// Check if reloading the audit and retrying can succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
