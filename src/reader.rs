//! Metric file reader.
//!
//! Parses the header once, then slices exactly one record length at a time
//! and hands each slice to the decoder for the file's metric kind. Records
//! are produced lazily and the sequence cannot be restarted.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use interop_metrics::{MetricKind, MetricReader, ReaderOptions, TabularMetric};
//!
//! fn dump() -> interop_metrics::Result<()> {
//!     let reader = MetricReader::open(
//!         "InterOp/ErrorMetricsOut.bin",
//!         MetricKind::Error,
//!         ReaderOptions::default(),
//!     )?;
//!     println!("File holds {} records", reader.record_count());
//!
//!     for record in reader {
//!         let record = record?;
//!         println!("{:?}", record.values());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Truncation
//!
//! When the bytes after the header are not a whole number of records, every
//! complete record is still yielded first; the reader then yields a single
//! [`InterOpError::TruncatedFile`] and ends.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::binary::{FileHeader, HEADER_SIZE, parse_header};
use crate::metrics::MetricRecord;
use crate::options::ReaderOptions;
use crate::types::{AdapterSequences, MetricKind};
use crate::{InterOpError, Result};

/// Lazy, finite reader over the records of one metric file.
#[derive(Debug)]
pub struct MetricReader {
    data: Vec<u8>,
    path: PathBuf,
    kind: MetricKind,
    header: FileHeader,
    adapters: Option<AdapterSequences>,
    current_position: usize,
    current_record: usize,
    total_records: usize,
    trailing_bytes: usize,
    max_records: Option<usize>,
    finished: bool,
}

impl MetricReader {
    /// Open a metric file from disk.
    pub fn open<P: AsRef<Path>>(path: P, kind: MetricKind, options: ReaderOptions) -> Result<Self> {
        let mut file = File::open(&path)
            .map_err(|e| InterOpError::file_error(path.as_ref().to_path_buf(), e))?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| InterOpError::file_error(path.as_ref().to_path_buf(), e))?;

        Self::from_bytes_with_path(data, path.as_ref().to_path_buf(), kind, options)
    }

    /// Create a reader over an in-memory byte source.
    pub fn from_bytes(
        data: impl Into<Vec<u8>>,
        kind: MetricKind,
        options: ReaderOptions,
    ) -> Result<Self> {
        Self::from_bytes_with_path(data.into(), PathBuf::from("<memory>"), kind, options)
    }

    pub(crate) fn from_bytes_with_path(
        data: Vec<u8>,
        path: PathBuf,
        kind: MetricKind,
        options: ReaderOptions,
    ) -> Result<Self> {
        let ReaderOptions { adapter_sequences: adapters, max_records } = options;

        let header = parse_header(&data, kind, adapters.as_ref())?;

        // Header validation guarantees a non-zero record length
        let record_length = header.record_len();
        let body_len = data.len() - HEADER_SIZE;
        let total_records = body_len / record_length;
        let trailing_bytes = body_len % record_length;

        info!(
            path = %path.display(),
            kind = %kind,
            version = header.version,
            records = total_records,
            "Opened InterOp metric file"
        );

        Ok(Self {
            data,
            path,
            kind,
            header,
            adapters,
            current_position: HEADER_SIZE,
            current_record: 0,
            total_records,
            trailing_bytes,
            max_records,
            finished: false,
        })
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn header(&self) -> FileHeader {
        self.header
    }

    /// Number of complete records after the header.
    pub fn record_count(&self) -> usize {
        self.total_records
    }

    /// Bytes left over after the last complete record.
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    /// Index of the next record to decode.
    pub fn current_record(&self) -> usize {
        self.current_record
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }

    pub fn adapter_sequences(&self) -> Option<&AdapterSequences> {
        self.adapters.as_ref()
    }

    fn record_limit(&self) -> usize {
        self.max_records.map_or(self.total_records, |max| max.min(self.total_records))
    }

    /// Decode the next record.
    ///
    /// Returns `Ok(None)` once the file is exhausted. A file with trailing
    /// bytes yields `Err(TruncatedFile)` once after its last complete record.
    pub fn read_next_record(&mut self) -> Result<Option<MetricRecord>> {
        if self.finished {
            return Ok(None);
        }

        if self.current_record >= self.record_limit() {
            self.finished = true;

            let capped = self.record_limit() < self.total_records;
            if self.trailing_bytes > 0 && !capped {
                warn!(
                    path = %self.path.display(),
                    trailing_bytes = self.trailing_bytes,
                    record_length = self.header.record_length,
                    "Metric file ends with a partial record"
                );
                return Err(InterOpError::TruncatedFile {
                    record_length: self.header.record_len(),
                    trailing_bytes: self.trailing_bytes,
                });
            }

            debug!(records = self.current_record, "Reached end of metric file");
            return Ok(None);
        }

        let start = self.current_position;
        let end = start + self.header.record_len();
        let record = self.data.get(start..end).ok_or_else(|| {
            InterOpError::truncated_record(start, self.header.record_len(), self.data.len() - start)
        })?;

        let decoded = match MetricRecord::decode(
            self.kind,
            self.header.version,
            record,
            self.adapters.as_ref(),
        ) {
            Ok(decoded) => decoded,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        self.current_record += 1;
        self.current_position = end;
        Ok(Some(decoded))
    }

    /// Decode every remaining record, failing on the first error.
    pub fn collect_records(self) -> Result<Vec<MetricRecord>> {
        self.collect()
    }

    /// Expose the remaining records as a stream for async consumers.
    ///
    /// Decoding stays synchronous; each poll decodes at most one record.
    pub fn into_stream(self) -> impl futures::Stream<Item = Result<MetricRecord>> {
        futures::stream::iter(self)
    }
}

impl Iterator for MetricReader {
    type Item = Result<MetricRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next_record().transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let remaining = self.record_limit().saturating_sub(self.current_record);
        let truncation = self.trailing_bytes > 0 && self.record_limit() == self.total_records;
        (0, Some(remaining + usize::from(truncation)))
    }
}

/// Read every record of an in-memory `kind` metric file.
///
/// Header problems are reported here, before any record is decoded.
pub fn read_all(
    data: impl Into<Vec<u8>>,
    kind: MetricKind,
    adapters: Option<AdapterSequences>,
) -> Result<MetricReader> {
    let options = ReaderOptions { adapter_sequences: adapters, ..ReaderOptions::default() };
    MetricReader::from_bytes(data, kind, options)
}
