//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments, configuration, or input data |
//! | 3 | `NotFound` | Examples directory or dataset missing |
//! | 4 | `Io` | Reading or writing files failed |
//!
//! ```bash
//! exemplar build --examples-dir missing
//! case $? in
//!     0) echo "Built" ;;
//!     3) echo "No examples directory" ;;
//!     *) echo "Other error" ;;
//! esac
//! ```

use exemplar_core::Error as CoreError;
use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments, configuration, or input data (exit code 2).
    Usage = 2,

    /// Requested resource not found (exit code 3).
    NotFound = 3,

    /// File system failure (exit code 4).
    Io = 4,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Io => "i/o error",
        }
    }

    /// Category of a core library error.
    #[must_use]
    pub const fn from_core(err: &CoreError) -> Self {
        match err {
            CoreError::Io(_) => Self::Io,
            CoreError::NotFound(_) => Self::NotFound,
            CoreError::Config(_)
            | CoreError::Serialization(_)
            | CoreError::InvalidExample { .. } => Self::Usage,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Fallback for errors that are neither a [`CliError`] nor a core error.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("not found")
            || msg_lower.contains("no such")
            || msg_lower.contains("does not exist")
        {
            return Self::NotFound;
        }

        if msg_lower.contains("permission denied")
            || msg_lower.contains("io error")
            || msg_lower.contains("address in use")
        {
            return Self::Io;
        }

        if msg_lower.contains("invalid")
            || msg_lower.contains("configuration")
            || msg_lower.contains("empty")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` so context chains survive.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a not-found error.
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::new(ErrorCategory::from_core(&err), err)
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// A [`CliError`] anywhere in the chain wins, then a core error, then the
/// message heuristic.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return cli_err.exit_code();
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return ErrorCategory::from_core(core_err).exit_code();
        }
    }
    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}
