// Baseline vectors — per-archetype initial theme scores and counts.
//
// Each archetype starts every entity from the same seed vector (typically
// all zeros, but configurable). These are immutable configuration records
// passed explicitly into the aggregator; nothing mutates them during a run.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Seed score and count for one theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineEntry {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub count: f64,
}

/// The full seed vector for one archetype: theme → (score, count).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaselineVector {
    pub themes: BTreeMap<String, BaselineEntry>,
}

impl BaselineVector {
    /// A zeroed vector over the given themes.
    pub fn zeroed<'a>(themes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            themes: themes
                .into_iter()
                .map(|t| (t.to_string(), BaselineEntry::default()))
                .collect(),
        }
    }
}

/// All archetypes' baseline vectors, loaded from one JSON config file
/// shaped `{archetype: {theme: {score, count}}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaselineSet {
    pub archetypes: BTreeMap<String, BaselineVector>,
}

impl BaselineSet {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading baselines {}", path.display()))?;
        let set: BaselineSet = serde_json::from_str(&raw)
            .with_context(|| format!("parsing baselines {}", path.display()))?;
        Ok(set)
    }

    pub fn get(&self, archetype: &str) -> Option<&BaselineVector> {
        self.archetypes.get(archetype)
    }
}
