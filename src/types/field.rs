//! Tabular field types and values

use serde::{Deserialize, Serialize};

/// Semantic kind of one tabular field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Integer,
    Float,
}

/// One numeric cell of the tabular read-out.
///
/// Absent fields keep their sentinel value (`-1` for counts, NaN for rates),
/// so equality compares floats by bit pattern: two NaN sentinels are equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum MetricValue {
    Integer(i64),
    Float(f32),
}

impl MetricValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            MetricValue::Integer(_) => FieldType::Integer,
            MetricValue::Float(_) => FieldType::Float,
        }
    }

    /// Widen to `f64` for generic aggregation.
    pub fn as_f64(&self) -> f64 {
        match *self {
            MetricValue::Integer(value) => value as f64,
            MetricValue::Float(value) => f64::from(value),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            MetricValue::Integer(value) => Some(value),
            MetricValue::Float(_) => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            MetricValue::Float(value) => Some(value),
            MetricValue::Integer(_) => None,
        }
    }

    /// True for the negative-count and NaN absent sentinels.
    pub fn is_absent(&self) -> bool {
        match *self {
            MetricValue::Integer(value) => value < 0,
            MetricValue::Float(value) => value.is_nan(),
        }
    }
}

impl PartialEq for MetricValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MetricValue::Integer(a), MetricValue::Integer(b)) => a == b,
            (MetricValue::Float(a), MetricValue::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl From<u32> for MetricValue {
    fn from(value: u32) -> Self {
        MetricValue::Integer(i64::from(value))
    }
}

impl From<u64> for MetricValue {
    // Widened 32-bit fields never exceed i64::MAX
    fn from(value: u64) -> Self {
        MetricValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Integer(value)
    }
}

impl From<f32> for MetricValue {
    fn from(value: f32) -> Self {
        MetricValue::Float(value)
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Integer(value) => write!(f, "{}", value),
            MetricValue::Float(value) => write!(f, "{}", value),
        }
    }
}
