//! Error types for the ingestor-core crate.
//!
//! Every stage maps its underlying fault (driver, filesystem, CSV, config) into a
//! single [`IngestionError`]. Callers catch one type no matter which stage failed,
//! and can still branch on [`ErrorKind`].

use std::fmt;
use std::panic::Location;

/// Boxed cause carried by an [`IngestionError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = IngestionError> = std::result::Result<T, E>;

/// Broad category of an ingestion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connectivity, authentication, or transport failure talking to the store.
    Network,
    /// Directory creation, permission, or disk space failure.
    Filesystem,
    /// Encoding or decoding of records failed.
    Serialization,
    /// Configuration or argument rejected before any work was done.
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Network => "network",
            ErrorKind::Filesystem => "filesystem",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Validation => "validation",
        };
        f.write_str(name)
    }
}

/// The single failure type surfaced by the ingestion pipeline.
///
/// Carries the failure kind, what the pipeline was doing, the source location
/// that wrapped the fault, and the underlying cause (via [`std::error::Error::source`]).
#[derive(Debug, thiserror::Error)]
#[error(
    "{kind} error while {context}: {message} (at {}:{})",
    .location.file(),
    .location.line()
)]
pub struct IngestionError {
    kind: ErrorKind,
    context: String,
    message: String,
    location: &'static Location<'static>,
    #[source]
    source: Option<BoxError>,
}

impl IngestionError {
    /// Build an error without an underlying cause.
    #[track_caller]
    pub fn new(kind: ErrorKind, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
            message: message.into(),
            location: Location::caller(),
            source: None,
        }
    }

    /// Wrap an underlying cause. The cause's display text becomes the message.
    #[track_caller]
    pub fn with_source(
        kind: ErrorKind,
        context: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        let source = source.into();
        Self {
            kind,
            context: context.into(),
            message: source.to_string(),
            location: Location::caller(),
            source: Some(source),
        }
    }

    #[track_caller]
    pub fn network(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::with_source(ErrorKind::Network, context, source)
    }

    #[track_caller]
    pub fn filesystem(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::with_source(ErrorKind::Filesystem, context, source)
    }

    #[track_caller]
    pub fn serialization(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::with_source(ErrorKind::Serialization, context, source)
    }

    #[track_caller]
    pub fn validation(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, context, message)
    }

    /// Classify a CSV failure: I/O faults are filesystem errors, the rest are encoding errors.
    #[track_caller]
    pub fn csv(context: impl Into<String>, err: csv::Error) -> Self {
        let kind = if err.is_io_error() {
            ErrorKind::Filesystem
        } else {
            ErrorKind::Serialization
        };
        Self::with_source(kind, context, err)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source location of the call site that wrapped the fault.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_cause_and_location() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let expected_line = line!() + 1;
        let err = IngestionError::filesystem("writing feature store file out/data.csv", io);
        let text = err.to_string();
        assert!(text.starts_with("filesystem error while writing feature store file"));
        assert!(text.contains("read-only volume"));
        assert!(text.contains("error.rs"));
        assert_eq!(err.location().line(), expected_line);
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::other("boom");
        let err = IngestionError::network("fetching documents", io);
        assert_eq!(err.kind(), ErrorKind::Network);
        let source = err.source().expect("cause should be attached");
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn test_validation_has_no_source() {
        let err = IngestionError::validation("checking split ratio", "ratio must be in (0, 1)");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "ratio must be in (0, 1)");
        assert_eq!(err.context(), "checking split ratio");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Serialization.to_string(), "serialization");
        assert_eq!(ErrorKind::Validation.to_string(), "validation");
    }
}
