// Log normalization — per-table bias constants and log scores.
//
// Final theme scores can be negative or zero, so a plain ln() would blow
// up. Per score table (one per archetype) and per theme, a bias constant
// is derived from the minimum score across all entities:
//
//   min < 0  →  b = abs(floor(min)) + 1
//   min = 0  →  b = 1
//   min > 0  →  b = 0
//
// which guarantees `final + b > 0` for every row that fed the minimum.
// The bias must come from the *complete* table — every entity's scores —
// before any row is transformed, so this stage consumes finished
// `ScoreTable`s only. Bias sets differ between tables; log scores from
// different tables are only comparable with their biases in hand, which
// is why the biases ride along in the result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::smooth::ScoreTable;

/// One normalized row: the smoothed score plus its log transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogScoreRow {
    #[serde(rename = "Dataset")]
    pub dataset: String,
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Theme")]
    pub theme: String,
    pub final_theme_score: f64,
    pub log_score: f64,
}

/// All log-normalized rows plus the per-(dataset, theme) bias constants
/// they were derived with.
#[derive(Debug, Clone, Default)]
pub struct NormalizedScores {
    pub rows: Vec<LogScoreRow>,
    pub biases: BTreeMap<String, BTreeMap<String, f64>>,
}

impl NormalizedScores {
    /// The bias used for a (dataset, theme), defaulting to 0 for themes
    /// that never appeared — the zero-entity edge case degrades to a
    /// defined value instead of failing.
    pub fn bias_for(&self, dataset: &str, theme: &str) -> f64 {
        self.biases
            .get(dataset)
            .and_then(|themes| themes.get(theme))
            .copied()
            .unwrap_or(0.0)
    }
}

/// The bias rule applied to a theme's minimum final score.
pub fn bias_for_minimum(min_val: f64) -> f64 {
    let floored = min_val.floor();
    if floored < 0.0 {
        floored.abs() + 1.0
    } else if floored == 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Derive the per-theme bias constants for one complete score table.
pub fn derive_biases(table: &ScoreTable) -> BTreeMap<String, f64> {
    let mut minimums: BTreeMap<String, f64> = BTreeMap::new();
    for row in &table.rows {
        minimums
            .entry(row.theme.clone())
            .and_modify(|m| *m = m.min(row.final_theme_score))
            .or_insert(row.final_theme_score);
    }
    minimums
        .into_iter()
        .map(|(theme, min_val)| (theme, bias_for_minimum(min_val)))
        .collect()
}

/// Log-normalize a set of score tables.
///
/// Biases are derived independently per table, then every row gets
/// `log_score = ln(final_theme_score + b[theme])`.
pub fn normalize(tables: &[ScoreTable]) -> NormalizedScores {
    let mut result = NormalizedScores::default();

    for table in tables {
        let biases = derive_biases(table);
        info!(dataset = %table.dataset, biases = ?biases, "derived log biases");
        result.biases.insert(table.dataset.clone(), biases);
    }

    for table in tables {
        for row in &table.rows {
            let b = result.bias_for(&table.dataset, &row.theme);
            result.rows.push(LogScoreRow {
                dataset: table.dataset.clone(),
                entity: row.entity.clone(),
                theme: row.theme.clone(),
                final_theme_score: row.final_theme_score,
                log_score: (row.final_theme_score + b).ln(),
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::smooth::ScoreRow;

    fn table(dataset: &str, rows: &[(&str, &str, f64)]) -> ScoreTable {
        ScoreTable {
            dataset: dataset.to_string(),
            rows: rows
                .iter()
                .map(|(entity, theme, score)| ScoreRow {
                    entity: entity.to_string(),
                    theme: theme.to_string(),
                    final_theme_score: *score,
                })
                .collect(),
        }
    }

    #[test]
    fn bias_rule_worked_examples() {
        // floor(-3.2) = -4 → abs = 4 → b = 5
        assert_eq!(bias_for_minimum(-3.2), 5.0);
        assert_eq!(bias_for_minimum(0.0), 1.0);
        assert_eq!(bias_for_minimum(7.0), 0.0);
        // floor(0.4) = 0 → b = 1
        assert_eq!(bias_for_minimum(0.4), 1.0);
    }

    #[test]
    fn biases_derived_per_theme_from_minimum() {
        let t = table(
            "chatty",
            &[
                ("E1", "Ambience", -3.2),
                ("E2", "Ambience", 4.0),
                ("E1", "Service", 7.0),
                ("E2", "Service", 9.5),
            ],
        );
        let biases = derive_biases(&t);
        assert_eq!(biases["Ambience"], 5.0);
        assert_eq!(biases["Service"], 0.0);
    }

    #[test]
    fn log_argument_is_strictly_positive() {
        let tables = vec![table(
            "chatty",
            &[
                ("E1", "Ambience", -3.2),
                ("E2", "Ambience", 0.0),
                ("E3", "Ambience", 12.75),
            ],
        )];
        let normalized = normalize(&tables);
        for row in &normalized.rows {
            let b = normalized.bias_for(&row.dataset, &row.theme);
            assert!(row.final_theme_score + b > 0.0);
            assert!(row.log_score.is_finite(), "row {row:?} produced non-finite log");
        }
    }

    #[test]
    fn biases_are_independent_per_table() {
        let tables = vec![
            table("chatty", &[("E1", "Ambience", -2.0)]),
            table("study", &[("E1", "Ambience", 5.0)]),
        ];
        let normalized = normalize(&tables);
        assert_eq!(normalized.bias_for("chatty", "Ambience"), 3.0);
        assert_eq!(normalized.bias_for("study", "Ambience"), 0.0);
    }

    #[test]
    fn absent_theme_defaults_to_zero_bias() {
        let normalized = normalize(&[table("chatty", &[("E1", "Ambience", 1.0)])]);
        assert_eq!(normalized.bias_for("chatty", "NoSuchTheme"), 0.0);
        assert_eq!(normalized.bias_for("ghost", "Ambience"), 0.0);
    }

    #[test]
    fn log_values_match_ln() {
        let normalized = normalize(&[table("chatty", &[("E1", "Ambience", 22.5)])]);
        let row = &normalized.rows[0];
        // min 22.5 > 0 → b = 0 → ln(22.5)
        assert!((row.log_score - 22.5f64.ln()).abs() < 1e-12);
    }
}
