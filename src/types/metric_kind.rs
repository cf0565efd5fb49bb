//! Metric family tags

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::metrics::{ErrorMetric, ExtractionMetric, MetricDecoder, TileMetric};
use crate::types::{AdapterSequences, FieldType};

/// Metric family stored in an InterOp file.
///
/// Each file holds records of exactly one kind. The kind selects the decoder
/// used for every record and fixes the tabular shape of the decoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Per-cycle alignment error rates (`ErrorMetricsOut.bin`)
    Error,
    /// Per-tile summary statistics (`TileMetricsOut.bin`)
    Tile,
    /// Per-cycle image extraction statistics (`ExtractionMetricsOut.bin`)
    Extraction,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Error, MetricKind::Tile, MetricKind::Extraction];

    /// Format versions the decoder for this kind understands.
    pub fn supported_versions(self) -> &'static [u8] {
        match self {
            MetricKind::Error => ErrorMetric::SUPPORTED_VERSIONS,
            MetricKind::Tile => TileMetric::SUPPORTED_VERSIONS,
            MetricKind::Extraction => ExtractionMetric::SUPPORTED_VERSIONS,
        }
    }

    pub fn supports_version(self, version: u8) -> bool {
        self.supported_versions().contains(&version)
    }

    /// Record byte length mandated for `version`.
    pub fn record_length(self, version: u8, adapters: Option<&AdapterSequences>) -> Result<usize> {
        match self {
            MetricKind::Error => ErrorMetric::record_length(version, adapters),
            MetricKind::Tile => TileMetric::record_length(version, adapters),
            MetricKind::Extraction => ExtractionMetric::record_length(version, adapters),
        }
    }

    /// Ordered tabular field names shared by every record of this kind.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            MetricKind::Error => ErrorMetric::FIELD_NAMES,
            MetricKind::Tile => TileMetric::FIELD_NAMES,
            MetricKind::Extraction => ExtractionMetric::FIELD_NAMES,
        }
    }

    /// Field types parallel to [`MetricKind::field_names`].
    pub fn field_types(self) -> &'static [FieldType] {
        match self {
            MetricKind::Error => ErrorMetric::FIELD_TYPES,
            MetricKind::Tile => TileMetric::FIELD_TYPES,
            MetricKind::Extraction => ExtractionMetric::FIELD_TYPES,
        }
    }

    /// Conventional file name written by the instrument.
    pub fn file_name(self) -> &'static str {
        match self {
            MetricKind::Error => "ErrorMetricsOut.bin",
            MetricKind::Tile => "TileMetricsOut.bin",
            MetricKind::Extraction => "ExtractionMetricsOut.bin",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MetricKind::Error => "Error",
            MetricKind::Tile => "Tile",
            MetricKind::Extraction => "Extraction",
        };
        f.write_str(name)
    }
}
