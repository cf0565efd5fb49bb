//! Reader configuration.
//!
//! Options can be built in code or loaded from a YAML document:
//!
//! ```rust
//! use interop_metrics::ReaderOptions;
//!
//! let options = ReaderOptions::from_yaml_str(
//!     "adapter_sequences:\n  - AGATCGGAAGAG\n  - CTGTCTCTTATA\nmax_records: 1000\n",
//! )?;
//! assert_eq!(options.adapter_sequences().map(|a| a.len()), Some(2));
//! assert_eq!(options.max_records, Some(1000));
//! # Ok::<(), interop_metrics::InterOpError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::types::AdapterSequences;
use crate::{InterOpError, Result};

/// Options applied when opening a metric file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderOptions {
    /// Adapter sequences for per-adapter error metrics (version 6)
    pub adapter_sequences: Option<AdapterSequences>,
    /// Stop after this many records; `None` reads the whole file
    pub max_records: Option<usize>,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_adapter_sequences(mut self, adapters: impl Into<AdapterSequences>) -> Self {
        self.adapter_sequences = Some(adapters.into());
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    pub fn adapter_sequences(&self) -> Option<&AdapterSequences> {
        self.adapter_sequences.as_ref()
    }

    /// Parse options from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml)
            .map_err(|e| InterOpError::AdapterContext { reason: e.to_string() })
    }
}
