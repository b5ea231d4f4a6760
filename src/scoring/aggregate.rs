// Raw theme aggregation — the first pass of the scoring pipeline.
//
// Walks every entity's observed keywords against one archetype's catalog,
// accumulating a signed weighted score and a raw count per theme. The same
// pass feeds the dataset-wide average of keyword-hit counts per theme,
// which the smoother later uses as a prior. The global average must be
// complete before any final score is computed, so this stage returns both
// together and the smoother consumes the finished result.

use std::collections::BTreeMap;

use crate::data::baseline::BaselineVector;
use crate::data::catalog::{Polarity, ThemeCatalog};
use crate::data::observations::ObservationStore;

/// Accumulated weighted score and raw count for one (entity, theme).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThemeAccumulator {
    pub score: f64,
    pub count: f64,
}

/// Per-entity theme accumulators.
pub type RawThemeScores = BTreeMap<String, ThemeAccumulator>;

/// Output of the aggregation pass for one archetype.
#[derive(Debug, Clone, Default)]
pub struct RawScores {
    /// entity → theme → accumulator, seeded from the baseline vector.
    pub entities: BTreeMap<String, RawThemeScores>,
    /// theme → average keyword-hit count across all entities.
    pub global_average: BTreeMap<String, f64>,
}

/// Run the aggregation pass.
///
/// Every entity starts from a copy of the baseline vector. Each observed
/// keyword with count > 0 that the catalog knows fans out to all of its
/// theme mappings: Plus adds `count * weight` to the theme score, Minus
/// subtracts it, and the raw count grows by `count` either way. Keyword
/// hits also feed the per-theme global average regardless of polarity or
/// weight. Entities with no catalog hits keep their baseline values.
pub fn aggregate(
    observations: &ObservationStore,
    catalog: &ThemeCatalog,
    baseline: &BaselineVector,
) -> RawScores {
    let mut entities = BTreeMap::new();
    // theme → (sum of hit counts, number of hits)
    let mut average_inputs: BTreeMap<String, (f64, u64)> = BTreeMap::new();

    for (entity, keywords) in &observations.entities {
        let mut accumulators: RawThemeScores = baseline
            .themes
            .iter()
            .map(|(theme, entry)| {
                (
                    theme.clone(),
                    ThemeAccumulator {
                        score: entry.score,
                        count: entry.count,
                    },
                )
            })
            .collect();

        for (keyword, &count) in keywords {
            if count == 0 {
                continue;
            }
            let Some(mappings) = catalog.mappings(keyword) else {
                continue;
            };
            for mapping in mappings {
                let acc = accumulators.entry(mapping.theme.clone()).or_default();
                let contribution = count as f64 * mapping.weight;
                match mapping.polarity {
                    Polarity::Plus => acc.score += contribution,
                    Polarity::Minus => acc.score -= contribution,
                }
                acc.count += count as f64;

                let slot = average_inputs.entry(mapping.theme.clone()).or_default();
                slot.0 += count as f64;
                slot.1 += 1;
            }
        }

        entities.insert(entity.clone(), accumulators);
    }

    let global_average = average_inputs
        .into_iter()
        .map(|(theme, (sum, n))| {
            let avg = if n == 0 { 0.0 } else { sum / n as f64 };
            (theme, avg)
        })
        .collect();

    RawScores {
        entities,
        global_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::ThemeMapping;
    use crate::data::observations::KeywordCounts;

    fn observations(data: &[(&str, &[(&str, u64)])]) -> ObservationStore {
        ObservationStore {
            entities: data
                .iter()
                .map(|(entity, keywords)| {
                    let counts: KeywordCounts = keywords
                        .iter()
                        .map(|(k, c)| (k.to_string(), *c))
                        .collect();
                    (entity.to_string(), counts)
                })
                .collect(),
        }
    }

    fn mapping(theme: &str, weight: f64, polarity: Polarity) -> ThemeMapping {
        ThemeMapping {
            theme: theme.to_string(),
            weight,
            polarity,
        }
    }

    #[test]
    fn plus_and_minus_polarities() {
        let obs = observations(&[("E1", &[("good", 2), ("bad", 3)])]);
        let catalog = ThemeCatalog::from_mappings([
            ("good".to_string(), mapping("Mood", 1.5, Polarity::Plus)),
            ("bad".to_string(), mapping("Mood", 1.0, Polarity::Minus)),
        ]);
        let baseline = BaselineVector::zeroed(["Mood"]);

        let raw = aggregate(&obs, &catalog, &baseline);
        let acc = raw.entities["E1"]["Mood"];
        // 2*1.5 - 3*1.0
        assert_eq!(acc.score, 0.0);
        assert_eq!(acc.count, 5.0);
    }

    #[test]
    fn keyword_fans_out_to_all_mapped_themes() {
        let obs = observations(&[("E1", &[("quiet", 4)])]);
        let catalog = ThemeCatalog::from_mappings([
            ("quiet".to_string(), mapping("Focus", 2.0, Polarity::Plus)),
            ("quiet".to_string(), mapping("Social", 1.0, Polarity::Minus)),
        ]);
        let baseline = BaselineVector::zeroed(["Focus", "Social"]);

        let raw = aggregate(&obs, &catalog, &baseline);
        assert_eq!(raw.entities["E1"]["Focus"].score, 8.0);
        assert_eq!(raw.entities["E1"]["Social"].score, -4.0);
        assert_eq!(raw.entities["E1"]["Focus"].count, 4.0);
        assert_eq!(raw.entities["E1"]["Social"].count, 4.0);
        // Both themes saw one hit of count 4
        assert_eq!(raw.global_average["Focus"], 4.0);
        assert_eq!(raw.global_average["Social"], 4.0);
    }

    #[test]
    fn global_average_spans_all_entities() {
        let obs = observations(&[("E1", &[("quiet", 2)]), ("E2", &[("quiet", 6)])]);
        let catalog = ThemeCatalog::from_mappings([(
            "quiet".to_string(),
            mapping("Focus", 1.0, Polarity::Plus),
        )]);
        let baseline = BaselineVector::zeroed(["Focus"]);

        let raw = aggregate(&obs, &catalog, &baseline);
        assert_eq!(raw.global_average["Focus"], 4.0);
    }

    #[test]
    fn entity_with_no_catalog_hits_keeps_baseline() {
        let obs = observations(&[("E1", &[("unmapped", 7)])]);
        let catalog = ThemeCatalog::from_mappings([(
            "quiet".to_string(),
            mapping("Focus", 1.0, Polarity::Plus),
        )]);
        let baseline = BaselineVector::zeroed(["Focus"]);

        let raw = aggregate(&obs, &catalog, &baseline);
        assert_eq!(raw.entities["E1"]["Focus"], ThemeAccumulator::default());
        assert!(raw.global_average.is_empty());
    }

    #[test]
    fn zero_count_observations_are_ignored() {
        let obs = observations(&[("E1", &[("quiet", 0)])]);
        let catalog = ThemeCatalog::from_mappings([(
            "quiet".to_string(),
            mapping("Focus", 1.0, Polarity::Plus),
        )]);
        let baseline = BaselineVector::zeroed(["Focus"]);

        let raw = aggregate(&obs, &catalog, &baseline);
        assert_eq!(raw.entities["E1"]["Focus"].count, 0.0);
        assert!(raw.global_average.is_empty());
    }

    #[test]
    fn nonzero_baseline_seeds_accumulators() {
        let obs = observations(&[("E1", &[("quiet", 1)])]);
        let catalog = ThemeCatalog::from_mappings([(
            "quiet".to_string(),
            mapping("Focus", 2.0, Polarity::Plus),
        )]);
        let baseline: BaselineVector =
            serde_json::from_str(r#"{"Focus": {"score": 10.0, "count": 3.0}}"#).unwrap();

        let raw = aggregate(&obs, &catalog, &baseline);
        assert_eq!(raw.entities["E1"]["Focus"].score, 12.0);
        assert_eq!(raw.entities["E1"]["Focus"].count, 4.0);
    }
}
