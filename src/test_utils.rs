//! Synthetic InterOp file builders for tests and benchmarks
//!
//! Instrument runs are too large to vendor as fixtures, so tests assemble
//! byte-exact records with these helpers instead.

#![cfg(any(test, feature = "benchmark"))]

/// Assembles a metric file from a header and raw records.
#[derive(Debug, Clone)]
pub struct MetricFileBuilder {
    bytes: Vec<u8>,
}

impl MetricFileBuilder {
    /// Start a file with the given header bytes.
    pub fn new(version: u8, record_length: u8) -> Self {
        Self { bytes: vec![version, record_length] }
    }

    /// Append one raw record. The length is not checked, so tests can build
    /// corrupt files on purpose.
    pub fn record(mut self, record: impl AsRef<[u8]>) -> Self {
        self.bytes.extend_from_slice(record.as_ref());
        self
    }

    /// Append `count` copies of a record.
    pub fn repeat(mut self, record: impl AsRef<[u8]>, count: usize) -> Self {
        for _ in 0..count {
            self.bytes.extend_from_slice(record.as_ref());
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Error metric record, version 3 layout (30 bytes).
pub fn error_v3_record(lane: u16, tile: u16, cycle: u16, rate: f32, counts: [u32; 5]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(30);
    bytes.extend_from_slice(&lane.to_le_bytes());
    bytes.extend_from_slice(&tile.to_le_bytes());
    bytes.extend_from_slice(&cycle.to_le_bytes());
    bytes.extend_from_slice(&rate.to_le_bytes());
    for count in counts {
        bytes.extend_from_slice(&count.to_le_bytes());
    }
    bytes
}

/// Error metric shared prefix for versions 4 and later (12 bytes).
pub fn error_v4_prefix(lane: u16, tile: u32, cycle: u16, rate: f32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(12);
    bytes.extend_from_slice(&lane.to_le_bytes());
    bytes.extend_from_slice(&tile.to_le_bytes());
    bytes.extend_from_slice(&cycle.to_le_bytes());
    bytes.extend_from_slice(&rate.to_le_bytes());
    bytes
}

/// Error metric record, version 6 layout with one trailing rate per adapter.
pub fn error_v6_record(lane: u16, tile: u32, cycle: u16, rate: f32, adapter_rates: &[f32]) -> Vec<u8> {
    let mut bytes = error_v4_prefix(lane, tile, cycle, rate);
    for adapter_rate in adapter_rates {
        bytes.extend_from_slice(&adapter_rate.to_le_bytes());
    }
    bytes
}

/// Tile metric record, version 2 layout (10 bytes).
pub fn tile_v2_record(lane: u16, tile: u16, code: u16, value: f32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(10);
    bytes.extend_from_slice(&lane.to_le_bytes());
    bytes.extend_from_slice(&tile.to_le_bytes());
    bytes.extend_from_slice(&code.to_le_bytes());
    bytes.extend_from_slice(&value.to_le_bytes());
    bytes
}

/// Extraction metric record, version 2 layout (38 bytes).
pub fn extraction_v2_record(
    lane: u16,
    tile: u16,
    cycle: u16,
    fwhm: [f32; 4],
    intensities: [u16; 4],
    date_time: u64,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(38);
    bytes.extend_from_slice(&lane.to_le_bytes());
    bytes.extend_from_slice(&tile.to_le_bytes());
    bytes.extend_from_slice(&cycle.to_le_bytes());
    for value in fwhm {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    for value in intensities {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes.extend_from_slice(&date_time.to_le_bytes());
    bytes
}

/// A version 3 error metric file with one record per cycle.
pub fn error_v3_file(cycles: u16) -> Vec<u8> {
    (1..=cycles)
        .fold(MetricFileBuilder::new(3, 30), |builder, cycle| {
            builder.record(error_v3_record(1, 1101, cycle, 0.01, [100, 5, 2, 1, 0]))
        })
        .build()
}
