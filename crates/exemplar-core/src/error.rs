//! Error types and handling for exemplar-core operations.
//!
//! A build run distinguishes three failure classes:
//!
//! - **Fatal**: the examples directory is missing, the output cannot be
//!   written, or the configuration file is malformed. These abort the run.
//! - **Per-entry skip**: one example directory is unusable (no primary
//!   source, malformed numeric prefix). Reported as [`Error::InvalidExample`]
//!   and never propagated out of a batch build.
//! - **Degraded**: the section manifest is absent or malformed. The corpus
//!   falls back to a flat, order-sorted list.
//!
//! ```rust
//! use exemplar_core::Error;
//!
//! let err = Error::InvalidExample {
//!     id: "abc-hello".to_string(),
//!     reason: "missing numeric prefix".to_string(),
//! };
//! assert!(!err.is_fatal());
//! assert_eq!(err.category(), "invalid_example");
//! ```

use thiserror::Error;

/// The main error type for exemplar-core operations.
///
/// All public functions in exemplar-core return `Result<T, Error>`. Standard
/// library and serialization errors convert automatically.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading example files, listing directories, and writing the
    /// dataset or generated site.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in `exemplar.toml`
    /// - Unknown configuration keys
    /// - Empty comment or prompt marker
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    ///
    /// Used for a missing examples directory, dataset file, or an unknown
    /// example identifier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A single example directory cannot be compiled.
    ///
    /// This is the per-entry skip class: the batch logs it and continues.
    #[error("Invalid example '{id}': {reason}")]
    InvalidExample {
        /// Directory name of the offending example.
        id: String,
        /// Why the example was skipped.
        reason: String,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Create a per-entry skip error for the given example directory.
    pub fn invalid_example(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidExample {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error should abort a whole build run.
    ///
    /// Per-entry errors are never fatal; everything else is, because the
    /// remaining failures all concern directory-level I/O or configuration.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidExample { .. })
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for structured log fields and for mapping to CLI exit codes.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
            Self::InvalidExample { .. } => "invalid_example",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
