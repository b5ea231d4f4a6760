// Keyword observation store — per-entity keyword frequencies.
//
// One JSON object maps each entity (a store) to its observed keywords and
// how often each was mentioned. The whole store is loaded into memory
// before any scoring or graph work begins; every downstream stage reads
// from this one snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Observed keyword → mention count for one entity.
pub type KeywordCounts = BTreeMap<String, u64>;

/// The full observation snapshot: entity → keyword → count.
///
/// Backed by ordered maps so iteration (and therefore floating-point
/// accumulation downstream) happens in a fixed order run to run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationStore {
    pub entities: BTreeMap<String, KeywordCounts>,
}

impl ObservationStore {
    /// Load the store from a JSON file shaped `{entity: {keyword: count}}`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading observation store {}", path.display()))?;
        let store: ObservationStore = serde_json::from_str(&raw)
            .with_context(|| format!("parsing observation store {}", path.display()))?;
        Ok(store)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of distinct keywords across all entities.
    pub fn distinct_keywords(&self) -> usize {
        let mut seen = std::collections::BTreeSet::new();
        for counts in self.entities.values() {
            seen.extend(counts.keys());
        }
        seen.len()
    }
}
