//! Adapter sequence context for per-adapter error metrics

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ordered adapter sequences supplied by the caller.
///
/// The list is read-only once built and cheap to clone: decoded records hold
/// a shared handle rather than copies of the strings, so one context can be
/// shared across records and threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterSequences(Arc<[String]>);

impl AdapterSequences {
    pub fn new<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(sequences.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// True when both handles point at the same list.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<String>> for AdapterSequences {
    fn from(sequences: Vec<String>) -> Self {
        Self(sequences.into())
    }
}

impl<S: Into<String>> FromIterator<S> for AdapterSequences {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let adapters = AdapterSequences::new(["AGATCGGAAGAG", "CTGTCTCTTATA"]);
        let clone = adapters.clone();

        assert!(adapters.ptr_eq(&clone));
        assert_eq!(clone.len(), 2);
        assert_eq!(clone.get(1), Some("CTGTCTCTTATA"));
        assert_eq!(clone.get(2), None);
        assert_eq!(adapters.iter().collect::<Vec<_>>(), ["AGATCGGAAGAG", "CTGTCTCTTATA"]);
    }

    #[test]
    fn serializes_as_plain_sequence() {
        let adapters: AdapterSequences = ["AGATCGGAAGAG"].into_iter().collect();
        let yaml = serde_yaml_ng::to_string(&adapters).unwrap();
        let parsed: AdapterSequences = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, adapters);
        assert!(AdapterSequences::new(Vec::<String>::new()).is_empty());
    }
}
