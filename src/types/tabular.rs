//! Uniform tabular read-out over decoded metric records.
//!
//! Downstream export, aggregation and filtering code consumes records only
//! through [`TabularMetric`]: three parallel sequences of field names, field
//! types and values. The shape is fixed per metric kind and never depends on
//! instance data, so consumers need no per-kind branching.

use serde::Serialize;

use super::{FieldType, MetricKind, MetricValue};
use crate::{InterOpError, Result};

/// Kind-independent view of one decoded record.
///
/// `field_names().len() == field_types().len() == values().len()` always holds.
pub trait TabularMetric {
    /// Metric family of the record.
    fn metric_kind(&self) -> MetricKind;

    /// Format version the record was decoded with.
    fn format_version(&self) -> u8;

    fn field_names(&self) -> &'static [&'static str] {
        self.metric_kind().field_names()
    }

    fn field_types(&self) -> &'static [FieldType] {
        self.metric_kind().field_types()
    }

    /// Field values in [`TabularMetric::field_names`] order, absent fields as sentinels.
    fn values(&self) -> Vec<MetricValue>;

    /// Look up one value by field name.
    fn value_of(&self, name: &str) -> Option<MetricValue> {
        let index = self.field_names().iter().position(|field| *field == name)?;
        self.values().get(index).copied()
    }
}

/// Rows of tabular values collected from records of one kind and version.
#[derive(Debug, Clone, Serialize)]
pub struct MetricTable {
    kind: MetricKind,
    version: Option<u8>,
    rows: Vec<Vec<MetricValue>>,
}

impl MetricTable {
    pub fn new(kind: MetricKind) -> Self {
        Self { kind, version: None, rows: Vec::new() }
    }

    /// Collect records of `kind` into a table.
    pub fn from_records<'a, T, I>(kind: MetricKind, records: I) -> Result<Self>
    where
        T: TabularMetric + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut table = Self::new(kind);
        for record in records {
            table.push(record)?;
        }
        Ok(table)
    }

    /// Append one record's values.
    ///
    /// The first record fixes the table's format version; later records of a
    /// different kind or version are rejected.
    pub fn push<T: TabularMetric + ?Sized>(&mut self, record: &T) -> Result<()> {
        if record.metric_kind() != self.kind {
            return Err(InterOpError::schema_mismatch(
                format!("{} metrics", self.kind),
                format!("{} metrics", record.metric_kind()),
            ));
        }

        match self.version {
            Some(version) if version != record.format_version() => {
                return Err(InterOpError::schema_mismatch(
                    format!("version {}", version),
                    format!("version {}", record.format_version()),
                ));
            }
            Some(_) => {}
            None => self.version = Some(record.format_version()),
        }

        self.rows.push(record.values());
        Ok(())
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Format version of the collected rows, if any were pushed.
    pub fn version(&self) -> Option<u8> {
        self.version
    }

    pub fn field_names(&self) -> &'static [&'static str] {
        self.kind.field_names()
    }

    pub fn field_types(&self) -> &'static [FieldType] {
        self.kind.field_types()
    }

    pub fn rows(&self) -> &[Vec<MetricValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one named column.
    pub fn column(&self, name: &str) -> Option<Vec<MetricValue>> {
        let index = self.field_names().iter().position(|field| *field == name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }
}
