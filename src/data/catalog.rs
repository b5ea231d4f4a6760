// Theme catalog — keyword → theme mappings for one archetype.
//
// Each archetype (chatty, study, extrovert, introvert) ships a CSV with
// columns Keyword, Theme, Score, Mood. A keyword may appear on several
// rows, fanning out to multiple themes; the catalog therefore maps each
// keyword to a *list* of mappings, never a single record. Rows with a
// missing or unparseable field are skipped and counted, not fatal — the
// crawler's output is messy and one bad row must not sink the batch.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Whether a keyword's contribution adds to or subtracts from a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Plus,
    Minus,
}

/// One (theme, weight, polarity) mapping attached to a keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeMapping {
    pub theme: String,
    pub weight: f64,
    pub polarity: Polarity,
}

/// Raw CSV row. Every field is optional so a malformed row deserializes
/// instead of erroring, letting us skip it with a warning.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(rename = "Keyword")]
    keyword: Option<String>,
    #[serde(rename = "Theme")]
    theme: Option<String>,
    #[serde(rename = "Score")]
    score: Option<f64>,
    #[serde(rename = "Mood")]
    mood: Option<String>,
}

/// Keyword → theme mappings for one archetype's scoring run.
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    entries: BTreeMap<String, Vec<ThemeMapping>>,
    /// Rows dropped during load for missing/invalid fields.
    pub skipped_rows: usize,
}

impl ThemeCatalog {
    /// Load a catalog CSV, skipping malformed rows.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("opening theme catalog {}", path.display()))?;

        let mut catalog = ThemeCatalog::default();
        for (i, record) in reader.deserialize::<CatalogRecord>().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!(row = i + 1, error = %e, "skipping unreadable catalog row");
                    catalog.skipped_rows += 1;
                    continue;
                }
            };
            match parse_record(record) {
                Some((keyword, mapping)) => catalog.insert(keyword, mapping),
                None => {
                    warn!(row = i + 1, "skipping catalog row with missing fields");
                    catalog.skipped_rows += 1;
                }
            }
        }
        Ok(catalog)
    }

    /// Build a catalog from in-memory mappings (used by tests and callers
    /// that source mappings from somewhere other than CSV).
    pub fn from_mappings(mappings: impl IntoIterator<Item = (String, ThemeMapping)>) -> Self {
        let mut catalog = ThemeCatalog::default();
        for (keyword, mapping) in mappings {
            catalog.insert(keyword, mapping);
        }
        catalog
    }

    pub fn insert(&mut self, keyword: String, mapping: ThemeMapping) {
        self.entries.entry(keyword).or_default().push(mapping);
    }

    /// All mappings fanned out from a keyword, if any.
    pub fn mappings(&self, keyword: &str) -> Option<&[ThemeMapping]> {
        self.entries.get(keyword).map(|v| v.as_slice())
    }

    pub fn keyword_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every theme named by at least one mapping.
    pub fn themes(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .flatten()
            .map(|m| m.theme.as_str())
            .collect()
    }
}

fn parse_record(record: CatalogRecord) -> Option<(String, ThemeMapping)> {
    let keyword = record.keyword.filter(|k| !k.is_empty())?;
    let theme = record.theme.filter(|t| !t.is_empty())?;
    let weight = record.score?;
    let polarity = match record.mood.as_deref() {
        Some("Plus") => Polarity::Plus,
        Some("Minus") => Polarity::Minus,
        _ => return None,
    };
    Some((
        keyword,
        ThemeMapping {
            theme,
            weight,
            polarity,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn catalog_from_csv(body: &str) -> ThemeCatalog {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{body}").unwrap();
        ThemeCatalog::from_path(file.path()).unwrap()
    }

    #[test]
    fn duplicate_keywords_fan_out() {
        let catalog = catalog_from_csv(
            "Keyword,Theme,Score,Mood\n\
             quiet,Focus,2.0,Plus\n\
             quiet,Social,1.0,Minus\n",
        );
        let mappings = catalog.mappings("quiet").unwrap();
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].theme, "Focus");
        assert_eq!(mappings[0].polarity, Polarity::Plus);
        assert_eq!(mappings[1].theme, "Social");
        assert_eq!(mappings[1].polarity, Polarity::Minus);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let catalog = catalog_from_csv(
            "Keyword,Theme,Score,Mood\n\
             quiet,Focus,2.0,Plus\n\
             noisy,,1.0,Minus\n\
             crowded,Social,,Plus\n\
             bright,Ambience,1.5,Sideways\n",
        );
        assert_eq!(catalog.keyword_count(), 1);
        assert_eq!(catalog.skipped_rows, 3);
    }

    #[test]
    fn themes_collects_across_fanout() {
        let catalog = catalog_from_csv(
            "Keyword,Theme,Score,Mood\n\
             quiet,Focus,2.0,Plus\n\
             quiet,Social,1.0,Minus\n\
             bright,Ambience,1.0,Plus\n",
        );
        let themes: Vec<&str> = catalog.themes().into_iter().collect();
        assert_eq!(themes, vec!["Ambience", "Focus", "Social"]);
    }
}
