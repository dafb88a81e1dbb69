//! Typed application errors.
//!
//! Every failure the scaffold raises is an [`AppError`]: a human-readable
//! message tagged with an [`ErrorKind`] (which subsystem failed), an optional
//! machine-readable [`ErrorCode`], a structured detail map, and an optional
//! causing error. Errors are built at the raise site and immutable afterward;
//! the CLI entry point prints the message and exits non-zero.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type AppResult<T> = Result<T, AppError>;

/// Which subsystem an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration loading, parsing, or persistence.
    Config,
    /// A precondition check failed.
    Validation,
    /// Business-logic processing.
    Processing,
    /// Filesystem operations (existence, kind, permissions).
    FileOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "configuration error",
            ErrorKind::Validation => "validation error",
            ErrorKind::Processing => "processing error",
            ErrorKind::FileOperation => "file operation error",
        };
        f.write_str(name)
    }
}

/// Machine-readable error tags, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NullValue,
    EmptyValue,
    MinValue,
    MaxValue,
    MinLength,
    MaxLength,
    PatternMismatch,
    InvalidPattern,
    InvalidChoice,
    FileNotFound,
    NotAFile,
    DirectoryNotFound,
    NotADirectory,
    PathNotFound,
    PermissionDenied,
    DirectoryCreation,
    InvalidFileExtension,
    MutuallyExclusiveArgs,
    ConditionalRequired,
    ConfigParse,
    ConfigIo,
    LoggingInit,
}

impl ErrorCode {
    /// The wire-format tag for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NullValue => "NULL_VALUE_ERROR",
            ErrorCode::EmptyValue => "EMPTY_VALUE_ERROR",
            ErrorCode::MinValue => "MIN_VALUE_ERROR",
            ErrorCode::MaxValue => "MAX_VALUE_ERROR",
            ErrorCode::MinLength => "MIN_LENGTH_ERROR",
            ErrorCode::MaxLength => "MAX_LENGTH_ERROR",
            ErrorCode::PatternMismatch => "PATTERN_VALIDATION_ERROR",
            ErrorCode::InvalidPattern => "INVALID_PATTERN",
            ErrorCode::InvalidChoice => "CHOICE_VALIDATION_ERROR",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::NotAFile => "NOT_A_FILE",
            ErrorCode::DirectoryNotFound => "DIRECTORY_NOT_FOUND",
            ErrorCode::NotADirectory => "NOT_A_DIRECTORY",
            ErrorCode::PathNotFound => "PATH_NOT_FOUND",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::DirectoryCreation => "DIRECTORY_CREATION_ERROR",
            ErrorCode::InvalidFileExtension => "INVALID_FILE_EXTENSION",
            ErrorCode::MutuallyExclusiveArgs => "MUTUALLY_EXCLUSIVE_ARGS",
            ErrorCode::ConditionalRequired => "CONDITIONAL_REQUIRED_ERROR",
            ErrorCode::ConfigParse => "CONFIG_PARSE_ERROR",
            ErrorCode::ConfigIo => "CONFIG_IO_ERROR",
            ErrorCode::LoggingInit => "LOGGING_INIT_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The application error type.
///
/// Constructed through the kind constructors ([`AppError::config`],
/// [`AppError::validation`], [`AppError::processing`],
/// [`AppError::file_operation`]) and enriched with the builder methods:
///
/// ```
/// use appbase::error::{AppError, ErrorCode};
///
/// let err = AppError::validation("age is out of range")
///     .with_code(ErrorCode::MaxValue)
///     .with_detail("value", 130)
///     .with_detail("max_val", 120);
/// assert_eq!(err.code(), Some(ErrorCode::MaxValue));
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    code: Option<ErrorCode>,
    details: IndexMap<String, Value>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            details: IndexMap::new(),
            source: None,
        }
    }

    /// A configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// A validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// A processing error.
    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Processing, message)
    }

    /// A file operation error.
    pub fn file_operation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileOperation, message)
    }

    /// Attach a machine-readable error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach one structured context entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Attach the causing error.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn details(&self) -> &IndexMap<String, Value> {
        &self.details
    }
}
