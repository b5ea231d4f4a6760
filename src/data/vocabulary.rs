// Theme vocabulary — the allow-list of keywords eligible for the network.
//
// The crawler emits far more keywords than the curated theme set; the
// network builder can optionally restrict itself to this list. Stored as
// a CSV with a `Keywords` column.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct VocabularyRecord {
    #[serde(rename = "Keywords")]
    keyword: String,
}

/// Load the allow-list from a CSV file with a `Keywords` column.
pub fn load_vocabulary(path: &Path) -> Result<BTreeSet<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening theme vocabulary {}", path.display()))?;

    let mut vocabulary = BTreeSet::new();
    for record in reader.deserialize::<VocabularyRecord>() {
        let record =
            record.with_context(|| format!("parsing theme vocabulary {}", path.display()))?;
        if !record.keyword.is_empty() {
            vocabulary.insert(record.keyword);
        }
    }
    Ok(vocabulary)
}
