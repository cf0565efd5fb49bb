//! Tile metrics (`TileMetricsOut.bin`).
//!
//! Version 2 stores one code/value pair per record:
//!
//! ```text
//! lane u16 | tile u16 | metric code u16 | value f32     (10 bytes)
//! ```

use serde::Serialize;

use super::{MetricDecoder, fixed_length, same_bits};
use crate::binary::RecordCursor;
use crate::types::{AdapterSequences, FieldType, MetricKind, MetricValue, TabularMetric};
use crate::{InterOpError, Result};

/// Meaning of a tile metric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TileMetricCode {
    ClusterDensity,
    ClusterDensityPf,
    ClusterCount,
    ClusterCountPf,
    /// Phasing for a 1-based read number
    Phasing { read: u32 },
    /// Prephasing for a 1-based read number
    Prephasing { read: u32 },
    /// Percent aligned for a 1-based read number
    PercentAligned { read: u32 },
    ControlLane,
    Other(u32),
}

impl TileMetricCode {
    pub fn from_code(code: u32) -> Self {
        match code {
            100 => TileMetricCode::ClusterDensity,
            101 => TileMetricCode::ClusterDensityPf,
            102 => TileMetricCode::ClusterCount,
            103 => TileMetricCode::ClusterCountPf,
            200..=299 if code % 2 == 0 => TileMetricCode::Phasing { read: (code - 200) / 2 + 1 },
            200..=299 => TileMetricCode::Prephasing { read: (code - 201) / 2 + 1 },
            300..=399 => TileMetricCode::PercentAligned { read: code - 300 + 1 },
            400 => TileMetricCode::ControlLane,
            other => TileMetricCode::Other(other),
        }
    }
}

/// Decoded tile metric record.
#[derive(Debug, Clone, Serialize)]
pub struct TileMetric {
    version: u8,
    lane: u32,
    tile: u32,
    code: u32,
    value: f32,
}

impl TileMetric {
    pub fn lane(&self) -> u32 {
        self.lane
    }

    pub fn tile(&self) -> u32 {
        self.tile
    }

    /// Raw metric code.
    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn metric(&self) -> TileMetricCode {
        TileMetricCode::from_code(self.code)
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

impl MetricDecoder for TileMetric {
    const KIND: MetricKind = MetricKind::Tile;

    const SUPPORTED_VERSIONS: &'static [u8] = &[2];

    const FIELD_NAMES: &'static [&'static str] = &["Lane", "Tile", "MetricCode", "MetricValue"];

    const FIELD_TYPES: &'static [FieldType] =
        &[FieldType::Integer, FieldType::Integer, FieldType::Integer, FieldType::Float];

    fn record_length(version: u8, _adapters: Option<&AdapterSequences>) -> Result<usize> {
        fixed_length(Self::KIND, version, &[(2, 10)])
    }

    fn decode(
        version: u8,
        cursor: &mut RecordCursor<'_>,
        _adapters: Option<&AdapterSequences>,
    ) -> Result<Self> {
        match version {
            2 => Ok(TileMetric {
                version,
                lane: cursor.read_u16()?,
                tile: cursor.read_u16()?,
                code: cursor.read_u16()?,
                value: cursor.read_f32()?,
            }),
            _ => Err(InterOpError::UnsupportedRecordVersion { kind: Self::KIND, version }),
        }
    }
}

impl TabularMetric for TileMetric {
    fn metric_kind(&self) -> MetricKind {
        Self::KIND
    }

    fn format_version(&self) -> u8 {
        self.version
    }

    fn values(&self) -> Vec<MetricValue> {
        vec![self.lane.into(), self.tile.into(), self.code.into(), self.value.into()]
    }
}

impl PartialEq for TileMetric {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.lane == other.lane
            && self.tile == other.tile
            && self.code == other.code
            && same_bits(&[self.value], &[other.value])
    }
}
