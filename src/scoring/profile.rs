// Entity profile lookup over normalized scores.
//
// Renderers ask for one entity's log scores in a fixed theme order (the
// axes of a radar chart). Missing (entity, theme) pairs return 0.0 —
// consumers expect a dense vector, never an error.

use crate::scoring::lognorm::NormalizedScores;

/// Look up one entity's log scores for an archetype, in `labels` order.
pub fn theme_profile(
    scores: &NormalizedScores,
    dataset: &str,
    entity: &str,
    labels: &[String],
) -> Vec<f64> {
    labels
        .iter()
        .map(|theme| {
            scores
                .rows
                .iter()
                .find(|row| {
                    row.dataset == dataset && row.entity == entity && &row.theme == theme
                })
                .map(|row| row.log_score)
                .unwrap_or(0.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::lognorm::LogScoreRow;

    fn row(dataset: &str, entity: &str, theme: &str, log_score: f64) -> LogScoreRow {
        LogScoreRow {
            dataset: dataset.to_string(),
            entity: entity.to_string(),
            theme: theme.to_string(),
            final_theme_score: 0.0,
            log_score,
        }
    }

    #[test]
    fn returns_scores_in_label_order_with_zero_default() {
        let scores = NormalizedScores {
            rows: vec![
                row("chatty", "E1", "Ambience", 1.5),
                row("chatty", "E1", "Service", 2.5),
                row("study", "E1", "Ambience", 9.9),
            ],
            biases: Default::default(),
        };
        let labels: Vec<String> = ["Service", "Ambience", "Privacy"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let profile = theme_profile(&scores, "chatty", "E1", &labels);
        assert_eq!(profile, vec![2.5, 1.5, 0.0]);
    }

    #[test]
    fn unknown_entity_is_all_zeros() {
        let scores = NormalizedScores {
            rows: vec![row("chatty", "E1", "Ambience", 1.5)],
            biases: Default::default(),
        };
        let labels = vec!["Ambience".to_string()];
        assert_eq!(theme_profile(&scores, "chatty", "Nobody", &labels), vec![0.0]);
    }
}
