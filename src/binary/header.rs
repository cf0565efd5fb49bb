//! InterOp file header parsing and validation.
//!
//! # Layout
//!
//! ```text
//! byte 0      format version (u8)
//! byte 1      record length in bytes (u8)
//! bytes 2..   concatenated fixed-length records
//! ```
//!
//! Both header bytes are plain unsigned bytes. The declared record length must
//! match exactly what the metric decoder expects for the declared version; a
//! mismatch means a corrupt file or an unknown variant and is never tolerated.

use tracing::debug;

use crate::types::{AdapterSequences, MetricKind};
use crate::{InterOpError, Result};

/// Size of the file preamble in bytes.
pub const HEADER_SIZE: usize = 2;

/// Parsed InterOp file preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FileHeader {
    /// Declared format version selecting the record layout
    pub version: u8,
    /// Declared length of every record in bytes
    pub record_length: u8,
}

impl FileHeader {
    /// Parse the two preamble bytes without interpreting them.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [version, record_length, ..] => {
                Ok(Self { version: *version, record_length: *record_length })
            }
            _ => Err(InterOpError::malformed_header(format!(
                "File holds {} bytes, the header needs {}",
                bytes.len(),
                HEADER_SIZE
            ))),
        }
    }

    /// Record length as a slice width.
    pub fn record_len(&self) -> usize {
        usize::from(self.record_length)
    }

    /// Check the header against the decoder registered for `kind`.
    pub fn validate(&self, kind: MetricKind, adapters: Option<&AdapterSequences>) -> Result<()> {
        if !kind.supports_version(self.version) {
            return Err(InterOpError::UnsupportedFormatVersion {
                kind,
                version: self.version,
                supported: kind.supported_versions(),
            });
        }

        if self.record_length == 0 {
            return Err(InterOpError::malformed_header("Declared record length is zero"));
        }

        let expected = kind.record_length(self.version, adapters)?;
        if expected != self.record_len() {
            return Err(InterOpError::malformed_header(format!(
                "{} version {} records are {} bytes, header declares {}",
                kind, self.version, expected, self.record_length
            )));
        }

        Ok(())
    }
}

/// Parse and validate the header of a `kind` metric file.
pub fn parse_header(
    bytes: &[u8],
    kind: MetricKind,
    adapters: Option<&AdapterSequences>,
) -> Result<FileHeader> {
    let header = FileHeader::parse(bytes)?;
    debug!(
        kind = %kind,
        version = header.version,
        record_length = header.record_length,
        "Parsed InterOp header"
    );
    header.validate(kind, adapters)?;
    Ok(header)
}
