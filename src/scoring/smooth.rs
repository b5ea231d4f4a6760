// Score smoothing — raw accumulators to final theme scores.
//
// Additive smoothing with the dataset-wide theme average as the prior:
//
//   final = round(((raw_score + global_avg) / (raw_count + 1)) * 10, 2)
//
// Low-sample entities get pulled toward the global average instead of
// producing extreme scores, and the +1 keeps the denominator at least 1,
// so an entity with zero observations for a theme still gets a defined
// score of round(global_avg * 10, 2).

use serde::{Deserialize, Serialize};

use super::aggregate::{RawScores, ThemeAccumulator};

/// One output row: an entity's smoothed score for one theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Theme")]
    pub theme: String,
    pub final_theme_score: f64,
}

/// All smoothed scores for one archetype dataset.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    /// The archetype this table was computed for; downstream the log
    /// normalizer derives its bias constants per table under this name.
    pub dataset: String,
    pub rows: Vec<ScoreRow>,
}

/// Round half away from zero to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// The smoothing formula for a single (entity, theme) accumulator.
pub fn smooth(raw: ThemeAccumulator, global_avg: f64) -> f64 {
    round2(((raw.score + global_avg) / (raw.count + 1.0)) * 10.0)
}

/// Smooth a complete aggregation result into a score table.
///
/// Requires the finished `RawScores` — the global average must already
/// cover every entity, which `aggregate` guarantees by construction.
pub fn smooth_table(dataset: &str, raw: &RawScores) -> ScoreTable {
    let mut rows = Vec::new();
    for (entity, themes) in &raw.entities {
        for (theme, &acc) in themes {
            let global_avg = raw.global_average.get(theme).copied().unwrap_or(0.0);
            rows.push(ScoreRow {
                entity: entity.clone(),
                theme: theme.clone(),
                final_theme_score: smooth(acc, global_avg),
            });
        }
    }
    ScoreTable {
        dataset: dataset.to_string(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_observations_yield_scaled_global_average() {
        let acc = ThemeAccumulator {
            score: 0.0,
            count: 0.0,
        };
        // round((0 + 5) / (0 + 1) * 10, 2) = 50.00
        assert_eq!(smooth(acc, 5.0), 50.0);
    }

    #[test]
    fn denominator_is_never_zero() {
        let acc = ThemeAccumulator {
            score: 3.0,
            count: 0.0,
        };
        assert!(smooth(acc, 0.0).is_finite());
        assert_eq!(smooth(acc, 0.0), 30.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let acc = ThemeAccumulator {
            score: 1.0,
            count: 2.0,
        };
        // (1 + 0) / 3 * 10 = 3.333... → 3.33
        assert_eq!(smooth(acc, 0.0), 3.33);
    }

    #[test]
    fn negative_scores_survive_smoothing() {
        let acc = ThemeAccumulator {
            score: -6.0,
            count: 3.0,
        };
        // (-6 + 2) / 4 * 10 = -10.0
        assert_eq!(smooth(acc, 2.0), -10.0);
    }

    #[test]
    fn round2_truncates_to_cents() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(-1.236), -1.24);
        assert_eq!(round2(22.5), 22.5);
    }
}
