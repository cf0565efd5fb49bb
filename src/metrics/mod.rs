//! Version-dispatched metric record decoders.
//!
//! Each metric family implements [`MetricDecoder`]: the set of format versions
//! it understands, the record length each version mandates, and a pure
//! `decode(version, cursor, adapters)` that is total over the supported
//! versions and fails for every other one. There is no fallback layout.
//!
//! Decoded records are wrapped in the tagged [`MetricRecord`] variant, whose
//! [`TabularMetric`] implementation is the single dispatch point from concrete
//! kind to the uniform tabular read-out.
//!
//! ## Absent fields
//!
//! A version that does not carry a field still populates it with a sentinel:
//! [`ABSENT_COUNT`] for integer counts and [`ABSENT_RATE`] for floating-point
//! rates and fractions. Callers can always tell "not in this version" from zero.

mod error;
mod extraction;
mod tile;

pub use error::ErrorMetric;
pub use extraction::{CifDateTime, ExtractionMetric};
pub use tile::{TileMetric, TileMetricCode};

use serde::Serialize;
use tracing::trace;

use crate::binary::RecordCursor;
use crate::types::{AdapterSequences, FieldType, MetricKind, MetricValue, TabularMetric};
use crate::{InterOpError, Result};

/// Sentinel held by count fields a format version does not populate.
pub const ABSENT_COUNT: i64 = -1;

/// Sentinel held by rate and fraction fields a format version does not populate.
pub const ABSENT_RATE: f32 = f32::NAN;

/// Per-family record layout knowledge.
pub trait MetricDecoder: Sized {
    const KIND: MetricKind;

    const SUPPORTED_VERSIONS: &'static [u8];

    /// Ordered tabular field names, fixed for the family.
    const FIELD_NAMES: &'static [&'static str];

    /// Field types parallel to `FIELD_NAMES`.
    const FIELD_TYPES: &'static [FieldType];

    /// Byte length of one record in `version`.
    fn record_length(version: u8, adapters: Option<&AdapterSequences>) -> Result<usize>;

    /// Decode one record laid out as `version`.
    fn decode(
        version: u8,
        cursor: &mut RecordCursor<'_>,
        adapters: Option<&AdapterSequences>,
    ) -> Result<Self>;
}

/// One decoded record of any metric family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum MetricRecord {
    Error(ErrorMetric),
    Tile(TileMetric),
    Extraction(ExtractionMetric),
}

impl MetricRecord {
    /// Decode one raw record of `kind` laid out as `version`.
    ///
    /// `record` must be exactly one record long; leftover bytes after the
    /// layout is consumed mean the buffer does not hold a `version` record.
    pub fn decode(
        kind: MetricKind,
        version: u8,
        record: &[u8],
        adapters: Option<&AdapterSequences>,
    ) -> Result<Self> {
        let mut cursor = RecordCursor::new(record);
        let decoded = match kind {
            MetricKind::Error => {
                MetricRecord::Error(ErrorMetric::decode(version, &mut cursor, adapters)?)
            }
            MetricKind::Tile => {
                MetricRecord::Tile(TileMetric::decode(version, &mut cursor, adapters)?)
            }
            MetricKind::Extraction => {
                MetricRecord::Extraction(ExtractionMetric::decode(version, &mut cursor, adapters)?)
            }
        };

        if !cursor.is_exhausted() {
            return Err(InterOpError::malformed_header(format!(
                "{} version {} record left {} of {} bytes unread",
                kind,
                version,
                cursor.remaining(),
                record.len()
            )));
        }

        trace!(kind = %kind, version, len = record.len(), "Decoded record");
        Ok(decoded)
    }

    pub fn as_error(&self) -> Option<&ErrorMetric> {
        match self {
            MetricRecord::Error(metric) => Some(metric),
            _ => None,
        }
    }

    pub fn as_tile(&self) -> Option<&TileMetric> {
        match self {
            MetricRecord::Tile(metric) => Some(metric),
            _ => None,
        }
    }

    pub fn as_extraction(&self) -> Option<&ExtractionMetric> {
        match self {
            MetricRecord::Extraction(metric) => Some(metric),
            _ => None,
        }
    }
}

impl TabularMetric for MetricRecord {
    fn metric_kind(&self) -> MetricKind {
        match self {
            MetricRecord::Error(_) => MetricKind::Error,
            MetricRecord::Tile(_) => MetricKind::Tile,
            MetricRecord::Extraction(_) => MetricKind::Extraction,
        }
    }

    fn format_version(&self) -> u8 {
        match self {
            MetricRecord::Error(metric) => metric.format_version(),
            MetricRecord::Tile(metric) => metric.format_version(),
            MetricRecord::Extraction(metric) => metric.format_version(),
        }
    }

    fn values(&self) -> Vec<MetricValue> {
        match self {
            MetricRecord::Error(metric) => metric.values(),
            MetricRecord::Tile(metric) => metric.values(),
            MetricRecord::Extraction(metric) => metric.values(),
        }
    }
}

/// Fixed record length lookup shared by families without variable trailers.
fn fixed_length(kind: MetricKind, version: u8, lengths: &[(u8, usize)]) -> Result<usize> {
    lengths
        .iter()
        .find(|(candidate, _)| *candidate == version)
        .map(|(_, length)| *length)
        .ok_or(InterOpError::UnsupportedRecordVersion { kind, version })
}

/// Float equality by bit pattern so NaN sentinels compare equal.
fn same_bits(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}
