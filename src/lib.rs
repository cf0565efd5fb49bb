//! Type-safe decoder for sequencing instrument InterOp metric files.
//!
//! InterOp files hold a homogeneous sequence of fixed-length little-endian
//! records, one metric family per file, laid out according to a format
//! version byte in the file header. This crate decodes them byte-exactly and
//! exposes every decoded record through one uniform tabular contract.
//!
//! # Features
//!
//! - **Versioned layouts**: every supported version decoded exactly, unknown versions rejected
//! - **Absent-field sentinels**: `-1` counts and NaN rates for fields a version does not carry
//! - **Lazy reading**: records decoded one at a time, complete records kept on truncation
//! - **Uniform read-out**: [`TabularMetric`] names, types and values for any metric kind
//!
//! # Data Flow
//!
//! ```text
//! bytes -> FileHeader (validate) -> RecordCursor (one record) -> MetricDecoder -> TabularMetric
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use interop_metrics::{InterOp, MetricKind, ReaderOptions, TabularMetric};
//!
//! #[tokio::main]
//! async fn main() -> interop_metrics::Result<()> {
//!     let options = ReaderOptions::new()
//!         .with_adapter_sequences(vec!["AGATCGGAAGAG".to_string(), "CTGTCTCTTATA".to_string()]);
//!     let reader = InterOp::open("InterOp/ErrorMetricsOut.bin", MetricKind::Error, options).await?;
//!
//!     for record in reader {
//!         let record = record?;
//!         println!("{:?} = {:?}", record.field_names(), record.values());
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod types;

// Decoding layers
pub mod binary;
pub mod metrics;
pub mod options;
pub mod reader;

#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Core exports
pub use error::*;
pub use types::*;

pub use binary::{FileHeader, RecordCursor};
pub use metrics::{
    ABSENT_COUNT, ABSENT_RATE, ErrorMetric, ExtractionMetric, MetricDecoder, MetricRecord,
    TileMetric,
};
pub use options::ReaderOptions;
pub use reader::{MetricReader, read_all};

use std::path::Path;
use tracing::debug;

/// Unified entry point for opening InterOp metric files.
///
/// # Examples
///
/// ```rust
/// use interop_metrics::{InterOp, MetricKind, ReaderOptions};
///
/// let bytes = vec![4u8, 12];
/// let reader = InterOp::from_bytes(bytes, MetricKind::Error, ReaderOptions::default())?;
/// assert_eq!(reader.record_count(), 0);
/// # Ok::<(), interop_metrics::InterOpError>(())
/// ```
pub struct InterOp;

impl InterOp {
    /// Read a metric file and prepare a lazy record reader.
    ///
    /// The file is read once up front; decoding then proceeds record by record
    /// without further I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or is not readable
    /// - The header is malformed or declares an unsupported version
    /// - Version 6 error metrics are opened without adapter sequences
    pub async fn open<P: AsRef<Path>>(
        path: P,
        kind: MetricKind,
        options: ReaderOptions,
    ) -> Result<MetricReader> {
        let path = path.as_ref().to_path_buf();
        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| InterOpError::file_error(path.clone(), e))?;
        debug!(path = %path.display(), bytes = data.len(), "Read InterOp file");

        MetricReader::from_bytes_with_path(data, path, kind, options)
    }

    /// Prepare a lazy record reader over bytes already in memory.
    pub fn from_bytes(
        data: impl Into<Vec<u8>>,
        kind: MetricKind,
        options: ReaderOptions,
    ) -> Result<MetricReader> {
        MetricReader::from_bytes(data, kind, options)
    }
}
