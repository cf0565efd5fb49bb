//! Core types shared by decoders and consumers.
//!
//! - [`MetricKind`] tags the metric family of a file and dispatches to its decoder
//! - [`FieldType`] and [`MetricValue`] describe one tabular cell
//! - [`TabularMetric`] is the uniform read-out every decoded record exposes
//! - [`MetricTable`] collects tabular rows from many records of one kind
//! - [`AdapterSequences`] is the caller-supplied adapter context
//!
//! ## Usage Example
//!
//! ```rust
//! use interop_metrics::types::{FieldType, MetricKind};
//!
//! let names = MetricKind::Error.field_names();
//! let types = MetricKind::Error.field_types();
//! assert_eq!(names.len(), types.len());
//! assert_eq!(names[0], "Lane");
//! assert_eq!(types[3], FieldType::Float);
//! ```

mod adapters;
mod field;
mod metric_kind;
mod tabular;

pub use adapters::AdapterSequences;
pub use field::{FieldType, MetricValue};
pub use metric_kind::MetricKind;
pub use tabular::{MetricTable, TabularMetric};
