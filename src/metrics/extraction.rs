//! Extraction metrics (`ExtractionMetricsOut.bin`).
//!
//! ```text
//! version 2 (38 bytes)
//!   lane u16 | tile u16 | cycle u16
//!   4 x FWHM f32        (A, C, G, T)
//!   4 x intensity u16   (A, C, G, T)
//!   CIF date-time u64
//! ```

use serde::Serialize;

use super::{MetricDecoder, fixed_length, same_bits};
use crate::binary::RecordCursor;
use crate::types::{AdapterSequences, FieldType, MetricKind, MetricValue, TabularMetric};
use crate::{InterOpError, Result};

const CHANNELS: usize = 4;
const TICKS_MASK: u64 = 0x3FFF_FFFF_FFFF_FFFF;

/// Timestamp of the CIF file the record was extracted from.
///
/// The low 62 bits count 100ns ticks since 0001-01-01; the top two bits
/// carry the timestamp kind flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CifDateTime(u64);

impl CifDateTime {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn ticks(&self) -> i64 {
        // 62-bit mask always fits
        (self.0 & TICKS_MASK) as i64
    }

    pub fn kind_flag(&self) -> u8 {
        (self.0 >> 62) as u8
    }
}

/// Decoded extraction metric record.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMetric {
    version: u8,
    lane: u32,
    tile: u32,
    cycle: u32,
    fwhm: [f32; CHANNELS],
    intensities: [u32; CHANNELS],
    date_time: CifDateTime,
}

impl ExtractionMetric {
    pub fn lane(&self) -> u32 {
        self.lane
    }

    pub fn tile(&self) -> u32 {
        self.tile
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Focus quality per channel, in A, C, G, T order.
    pub fn fwhm(&self) -> [f32; CHANNELS] {
        self.fwhm
    }

    /// 90th percentile intensity per channel, in A, C, G, T order.
    pub fn intensities(&self) -> [u32; CHANNELS] {
        self.intensities
    }

    pub fn date_time(&self) -> CifDateTime {
        self.date_time
    }
}

impl MetricDecoder for ExtractionMetric {
    const KIND: MetricKind = MetricKind::Extraction;

    const SUPPORTED_VERSIONS: &'static [u8] = &[2];

    const FIELD_NAMES: &'static [&'static str] = &[
        "Lane",
        "Tile",
        "Cycle",
        "FwhmA",
        "FwhmC",
        "FwhmG",
        "FwhmT",
        "IntensityA",
        "IntensityC",
        "IntensityG",
        "IntensityT",
        "DateTimeTicks",
    ];

    const FIELD_TYPES: &'static [FieldType] = &[
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Float,
        FieldType::Float,
        FieldType::Float,
        FieldType::Float,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Integer,
        FieldType::Integer,
    ];

    fn record_length(version: u8, _adapters: Option<&AdapterSequences>) -> Result<usize> {
        fixed_length(Self::KIND, version, &[(2, 6 + CHANNELS * 4 + CHANNELS * 2 + 8)])
    }

    fn decode(
        version: u8,
        cursor: &mut RecordCursor<'_>,
        _adapters: Option<&AdapterSequences>,
    ) -> Result<Self> {
        if version != 2 {
            return Err(InterOpError::UnsupportedRecordVersion { kind: Self::KIND, version });
        }

        let lane = cursor.read_u16()?;
        let tile = cursor.read_u16()?;
        let cycle = cursor.read_u16()?;

        let mut fwhm = [0f32; CHANNELS];
        for value in fwhm.iter_mut() {
            *value = cursor.read_f32()?;
        }

        let mut intensities = [0u32; CHANNELS];
        for value in intensities.iter_mut() {
            *value = cursor.read_u16()?;
        }

        let date_time = CifDateTime::from_raw(cursor.read_u64()?);

        Ok(ExtractionMetric { version, lane, tile, cycle, fwhm, intensities, date_time })
    }
}

impl TabularMetric for ExtractionMetric {
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
        values.extend(self.fwhm.iter().map(|value| MetricValue::Float(*value)));
        values.extend(self.intensities.iter().map(|value| MetricValue::from(*value)));
        values.push(MetricValue::Integer(self.date_time.ticks()));
        values
    }
}

impl PartialEq for ExtractionMetric {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.lane == other.lane
            && self.tile == other.tile
            && self.cycle == other.cycle
            && same_bits(&self.fwhm, &other.fwhm)
            && self.intensities == other.intensities
            && self.date_time == other.date_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::extraction_v2_record;

    #[test]
    fn decodes_version_2_record() {
        let raw_time = (1u64 << 62) | 636_000_000_000_000_000;
        let bytes =
            extraction_v2_record(1, 1101, 12, [2.1, 2.2, 2.3, 2.4], [900, 800, 700, 65_535], raw_time);
        assert_eq!(bytes.len(), ExtractionMetric::record_length(2, None).unwrap());

        let metric = ExtractionMetric::decode(2, &mut RecordCursor::new(&bytes), None).unwrap();
        assert_eq!(metric.lane(), 1);
        assert_eq!(metric.tile(), 1101);
        assert_eq!(metric.cycle(), 12);
        assert_eq!(metric.fwhm(), [2.1, 2.2, 2.3, 2.4]);
        assert_eq!(metric.intensities(), [900, 800, 700, 65_535]);
        assert_eq!(metric.date_time().raw(), raw_time);
        assert_eq!(metric.date_time().ticks(), 636_000_000_000_000_000);
        assert_eq!(metric.date_time().kind_flag(), 1);
    }

    #[test]
    fn tabular_values_follow_field_order() {
        let bytes = extraction_v2_record(2, 1102, 3, [1.0; 4], [10, 20, 30, 40], 99);
        let metric = ExtractionMetric::decode(2, &mut RecordCursor::new(&bytes), None).unwrap();

        let values = metric.values();
        assert_eq!(values.len(), ExtractionMetric::FIELD_NAMES.len());
        assert_eq!(metric.value_of("IntensityG"), Some(MetricValue::Integer(30)));
        assert_eq!(metric.value_of("FwhmT"), Some(MetricValue::Float(1.0)));
        assert_eq!(metric.value_of("DateTimeTicks"), Some(MetricValue::Integer(99)));
    }

    #[test]
    fn other_versions_are_rejected() {
        let bytes = extraction_v2_record(2, 1102, 3, [1.0; 4], [10, 20, 30, 40], 99);
        assert!(ExtractionMetric::decode(3, &mut RecordCursor::new(&bytes), None).is_err());
        assert!(ExtractionMetric::record_length(3, None).is_err());
    }
}
