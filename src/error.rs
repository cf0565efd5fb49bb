//! Error types for InterOp metric decoding.
//!
//! Every decoding error is fatal for the file being read: a corrupt or
//! unexpected-version metric file is reported immediately and no partial
//! record is ever substituted for missing fields. Fields that a format version
//! simply does not carry are not errors; they hold the documented absent
//! sentinels instead (see [`crate::metrics::ABSENT_COUNT`] and
//! [`crate::metrics::ABSENT_RATE`]).
//!
//! ## Error Categories
//!
//! - **Structural**: [`InterOpError::MalformedHeader`], the file cannot be interpreted
//! - **Version**: [`InterOpError::UnsupportedFormatVersion`] and
//!   [`InterOpError::UnsupportedRecordVersion`], no layout rule exists for the version
//! - **Length**: [`InterOpError::TruncatedRecord`] and [`InterOpError::TruncatedFile`]
//! - **Precondition**: [`InterOpError::MissingAdapterContext`], required auxiliary data omitted
//! - **I/O**: [`InterOpError::File`], the byte source could not be read
//!
//! ## Recovery
//!
//! ```rust
//! use interop_metrics::{InterOpError, MetricKind};
//!
//! let error = InterOpError::missing_adapter_context(MetricKind::Error, 6);
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::MetricKind;

/// Result type alias for InterOp operations.
pub type Result<T, E = InterOpError> = std::result::Result<T, E>;

/// Main error type for InterOp decoding.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InterOpError {
    #[error("Malformed metric file header: {reason}")]
    MalformedHeader { reason: String },

    #[error("{kind} metrics do not support format version {version} (supported: {supported:?})")]
    UnsupportedFormatVersion { kind: MetricKind, version: u8, supported: &'static [u8] },

    #[error("No {kind} record layout for version {version}")]
    UnsupportedRecordVersion { kind: MetricKind, version: u8 },

    #[error("Record truncated at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedRecord { offset: usize, needed: usize, available: usize },

    #[error("File truncated: {trailing_bytes} trailing bytes do not form a {record_length}-byte record")]
    TruncatedFile { record_length: usize, trailing_bytes: usize },

    #[error("{kind} metrics version {version} require an adapter sequence list")]
    MissingAdapterContext { kind: MetricKind, version: u8 },

    #[error("Invalid adapter context: {reason}")]
    AdapterContext { reason: String },

    #[error("Record schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    #[error("InterOp file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InterOpError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Decoding errors describe the bytes themselves and never change on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            InterOpError::File { source, .. } => matches!(
                source.kind(),
                std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::TimedOut
            ),
            InterOpError::MalformedHeader { .. }
            | InterOpError::UnsupportedFormatVersion { .. }
            | InterOpError::UnsupportedRecordVersion { .. }
            | InterOpError::TruncatedRecord { .. }
            | InterOpError::TruncatedFile { .. }
            | InterOpError::MissingAdapterContext { .. }
            | InterOpError::AdapterContext { .. }
            | InterOpError::SchemaMismatch { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            InterOpError::MalformedHeader { .. } => vec![
                "Check that the file matches the requested metric kind",
                "Verify the file was fully copied from the instrument",
                "Compare the declared record length with the metric version",
            ],
            InterOpError::UnsupportedFormatVersion { .. }
            | InterOpError::UnsupportedRecordVersion { .. } => vec![
                "Check the instrument control software version",
                "Update the library to a release supporting this version",
            ],
            InterOpError::TruncatedRecord { .. } | InterOpError::TruncatedFile { .. } => vec![
                "Wait for the run to finish writing metrics",
                "Re-copy the file from the instrument output folder",
                "Use the records decoded before the truncation point",
            ],
            InterOpError::MissingAdapterContext { .. } => vec![
                "Supply the run's adapter sequences in ReaderOptions",
                "Read adapter sequences from the run parameters before decoding",
            ],
            InterOpError::AdapterContext { .. } => vec![
                "Check the options document syntax",
                "List adapter sequences as a YAML sequence of strings",
            ],
            InterOpError::SchemaMismatch { .. } => vec![
                "Build one table per metric kind and format version",
                "Check that records come from a single metric file",
            ],
            InterOpError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
        }
    }

    /// Helper constructor for malformed header errors.
    pub fn malformed_header(reason: impl Into<String>) -> Self {
        InterOpError::MalformedHeader { reason: reason.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        InterOpError::File { path, source }
    }

    /// Helper constructor for truncated record reads.
    pub fn truncated_record(offset: usize, needed: usize, available: usize) -> Self {
        InterOpError::TruncatedRecord { offset, needed, available }
    }

    /// Helper constructor for a missing adapter list.
    pub fn missing_adapter_context(kind: MetricKind, version: u8) -> Self {
        InterOpError::MissingAdapterContext { kind, version }
    }

    /// Helper constructor for record schema mismatches.
    pub fn schema_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        InterOpError::SchemaMismatch { expected: expected.into(), found: found.into() }
    }
}

impl From<std::io::Error> for InterOpError {
    fn from(err: std::io::Error) -> Self {
        InterOpError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_errors_are_never_retryable(
                reason in ".*",
                offset in 0usize..0x10000usize,
                needed in 1usize..64usize,
                version in any::<u8>(),
            ) {
                let errors = [
                    InterOpError::malformed_header(reason.clone()),
                    InterOpError::truncated_record(offset, needed, needed - 1),
                    InterOpError::TruncatedFile { record_length: needed, trailing_bytes: offset },
                    InterOpError::UnsupportedRecordVersion { kind: MetricKind::Error, version },
                    InterOpError::missing_adapter_context(MetricKind::Error, version),
                ];

                for error in &errors {
                    prop_assert!(!error.is_retryable());
                    prop_assert!(!error.recovery_suggestions().is_empty());
                    prop_assert!(!error.to_string().is_empty());
                }
            }

            #[test]
            fn messages_carry_their_context(
                reason in "[a-z ]{1,40}",
                offset in 0usize..0x10000usize,
                version in any::<u8>(),
            ) {
                let header = InterOpError::malformed_header(reason.clone());
                prop_assert!(header.to_string().contains(&reason));

                let truncated = InterOpError::truncated_record(offset, 4, 2);
                prop_assert!(truncated.to_string().contains(&offset.to_string()));

                let unsupported = InterOpError::UnsupportedFormatVersion {
                    kind: MetricKind::Tile,
                    version,
                    supported: &[2],
                };
                prop_assert!(unsupported.to_string().contains(&version.to_string()));
            }
        }
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<InterOpError>();

        let error = InterOpError::malformed_header("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn io_errors_keep_their_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let error: InterOpError = io_err.into();

        match &error {
            InterOpError::File { source, .. } => assert_eq!(source.to_string(), "missing file"),
            other => panic!("Expected File error variant, got {:?}", other),
        }
        assert!(!error.is_retryable());
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn interrupted_reads_are_retryable() {
        let error = InterOpError::file_error(
            PathBuf::from("ErrorMetricsOut.bin"),
            std::io::Error::new(std::io::ErrorKind::Interrupted, "signal"),
        );
        assert!(error.is_retryable());
    }

    #[test]
    fn missing_adapter_message_names_version() {
        let error = InterOpError::missing_adapter_context(MetricKind::Error, 6);
        let message = error.to_string();
        assert!(message.contains("Error"));
        assert!(message.contains('6'));
    }
}
