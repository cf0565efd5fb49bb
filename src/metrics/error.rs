//! Error-rate metrics (`ErrorMetricsOut.bin`).
//!
//! One record per lane, tile and cycle. All versions share the lane, tile,
//! cycle and error-rate prefix; the tile widens to 32 bits from version 4.
//!
//! ```text
//! version 3 (30 bytes)  lane u16 | tile u16 | cycle u16 | rate f32 | 5 x count u32
//! version 4 (12 bytes)  lane u16 | tile u32 | cycle u16 | rate f32
//! version 5 (16 bytes)  version 4 | adapter-trim fraction f32
//! version 6 (12 + 4n)   version 4 | n x adapter-trim fraction f32
//! ```
//!
//! In version 6, `n` is the length of the caller's adapter sequence list; the
//! record itself does not encode it.

use serde::Serialize;

use super::{ABSENT_COUNT, ABSENT_RATE, MetricDecoder, same_bits};
use crate::binary::RecordCursor;
use crate::types::{AdapterSequences, FieldType, MetricKind, MetricValue, TabularMetric};
use crate::{InterOpError, Result};

const PREFIX_V3_LENGTH: usize = 10;
const PREFIX_V4_LENGTH: usize = 12;
const ERROR_BUCKETS: usize = 5;

/// Decoded error-rate record.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMetric {
    version: u8,
    lane: u32,
    tile: u64,
    cycle: u32,
    error_rate: f32,
    /// Reads with 0..=4 errors; [`ABSENT_COUNT`] outside version 3
    error_counts: [i64; ERROR_BUCKETS],
    /// Single adapter-trim fraction; [`ABSENT_RATE`] outside version 5
    phix_adapter_rate: f32,
    /// Per-adapter trim fractions; empty outside version 6
    adapter_rates: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adapter_sequences: Option<AdapterSequences>,
}

impl ErrorMetric {
    pub fn lane(&self) -> u32 {
        self.lane
    }

    pub fn tile(&self) -> u64 {
        self.tile
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn error_rate(&self) -> f32 {
        self.error_rate
    }

    /// Reads with exactly `errors` mismatches (0..=4), or [`ABSENT_COUNT`].
    pub fn reads_with_errors(&self, errors: usize) -> Option<i64> {
        self.error_counts.get(errors).copied()
    }

    pub fn perfect_reads(&self) -> i64 {
        self.error_counts[0]
    }

    pub fn reads_one_error(&self) -> i64 {
        self.error_counts[1]
    }

    pub fn reads_two_errors(&self) -> i64 {
        self.error_counts[2]
    }

    pub fn reads_three_errors(&self) -> i64 {
        self.error_counts[3]
    }

    pub fn reads_four_errors(&self) -> i64 {
        self.error_counts[4]
    }

    /// Single adapter-trim fraction (version 5), or [`ABSENT_RATE`].
    pub fn phix_adapter_rate(&self) -> f32 {
        self.phix_adapter_rate
    }

    /// Number of per-adapter rates (version 6), zero otherwise.
    pub fn adapter_count(&self) -> usize {
        self.adapter_rates.len()
    }

    pub fn adapter_sequence(&self, index: usize) -> Option<&str> {
        self.adapter_sequences.as_ref()?.get(index)
    }

    pub fn adapter_rate(&self, index: usize) -> Option<f32> {
        self.adapter_rates.get(index).copied()
    }

    /// Per-adapter trim fractions, positionally aligned with the adapter list.
    pub fn adapter_rates(&self) -> &[f32] {
        &self.adapter_rates
    }

    /// Adapter sequences paired with their trim fraction.
    pub fn adapters(&self) -> impl Iterator<Item = (&str, f32)> {
        self.adapter_sequences
            .iter()
            .flat_map(|sequences| sequences.iter())
            .zip(self.adapter_rates.iter().copied())
    }
}

impl MetricDecoder for ErrorMetric {
    const KIND: MetricKind = MetricKind::Error;

    const SUPPORTED_VERSIONS: &'static [u8] = &[3, 4, 5, 6];

    const FIELD_NAMES: &'static [&'static str] = &[
        "Lane",
        "Tile",
        "Cycle",
        "ErrorRate",
        "PerfectReads",
        "ReadsOneError",
        "ReadsTwoErrors",
        "ReadsThreeErrors",
        "ReadsFourErrors",
        "PhiXAdapterRate",
    ];

    const FIELD_TYPES: &'static [FieldType] = &[
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Float,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Float,
    ];

    fn record_length(version: u8, adapters: Option<&AdapterSequences>) -> Result<usize> {
        match version {
            3 => Ok(PREFIX_V3_LENGTH + ERROR_BUCKETS * 4),
            4 => Ok(PREFIX_V4_LENGTH),
            5 => Ok(PREFIX_V4_LENGTH + 4),
            6 => {
                let adapters = adapters
                    .ok_or_else(|| InterOpError::missing_adapter_context(Self::KIND, version))?;
                Ok(PREFIX_V4_LENGTH + adapters.len() * 4)
            }
            _ => Err(InterOpError::UnsupportedRecordVersion { kind: Self::KIND, version }),
        }
    }

    fn decode(
        version: u8,
        cursor: &mut RecordCursor<'_>,
        adapters: Option<&AdapterSequences>,
    ) -> Result<Self> {
        // Reject unknown layouts before reading a single byte
        if !Self::SUPPORTED_VERSIONS.contains(&version) {
            return Err(InterOpError::UnsupportedRecordVersion { kind: Self::KIND, version });
        }
        if version == 6 && adapters.is_none() {
            return Err(InterOpError::missing_adapter_context(Self::KIND, version));
        }

        let lane = cursor.read_u16()?;
        let tile = if version > 3 { cursor.read_u32()? } else { u64::from(cursor.read_u16()?) };
        let cycle = cursor.read_u16()?;
        let error_rate = cursor.read_f32()?;

        let mut metric = ErrorMetric {
            version,
            lane,
            tile,
            cycle,
            error_rate,
            error_counts: [ABSENT_COUNT; ERROR_BUCKETS],
            phix_adapter_rate: ABSENT_RATE,
            adapter_rates: Vec::new(),
            adapter_sequences: None,
        };

        match (version, adapters) {
            (3, _) => {
                for count in metric.error_counts.iter_mut() {
                    // Widened u32, never negative
                    *count = cursor.read_u32()? as i64;
                }
            }
            (4, _) => {}
            (5, _) => metric.phix_adapter_rate = cursor.read_f32()?,
            (6, Some(adapters)) => {
                metric.adapter_rates = cursor.read_f32_array(adapters.len())?;
                metric.adapter_sequences = Some(adapters.clone());
            }
            _ => return Err(InterOpError::UnsupportedRecordVersion { kind: Self::KIND, version }),
        }

        Ok(metric)
    }
}

impl TabularMetric for ErrorMetric {
    fn metric_kind(&self) -> MetricKind {
        Self::KIND
    }

    fn format_version(&self) -> u8 {
        self.version
    }

    fn values(&self) -> Vec<MetricValue> {
        let mut values = Vec::with_capacity(Self::FIELD_NAMES.len());
        values.push(self.lane.into());
        values.push(self.tile.into());
        values.push(self.cycle.into());
        values.push(self.error_rate.into());
        values.extend(self.error_counts.iter().map(|count| MetricValue::Integer(*count)));
        values.push(self.phix_adapter_rate.into());
        values
    }
}

impl PartialEq for ErrorMetric {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.lane == other.lane
            && self.tile == other.tile
            && self.cycle == other.cycle
            && self.error_counts == other.error_counts
            && same_bits(
                &[self.error_rate, self.phix_adapter_rate],
                &[other.error_rate, other.phix_adapter_rate],
            )
            && same_bits(&self.adapter_rates, &other.adapter_rates)
            && self.adapter_sequences == other.adapter_sequences
    }
}

impl std::fmt::Display for ErrorMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}\t{:.2}", self.lane, self.tile, self.cycle, self.error_rate)?;
        for count in &self.error_counts {
            write!(f, "\t{}", count)?;
        }
        Ok(())
    }
}
