// Staged scoring pipeline driver.
//
// Runs the stages in strict sequence per archetype dataset:
//
//   Aggregate → (global average complete) → Smooth → (biases complete) → Log
//
// Each stage consumes the previous stage's finished, immutable output.
// The barriers are structural: `smooth_table` takes a whole `RawScores`
// and `normalize` takes whole `ScoreTable`s, so out-of-order or partial
// reads cannot happen.

use tracing::info;

use crate::data::dataset::ArchetypeDataset;
use crate::data::observations::ObservationStore;

use super::aggregate::aggregate;
use super::lognorm::{normalize, NormalizedScores};
use super::smooth::{smooth_table, ScoreTable};

/// Everything the scoring pipeline produces for one run.
#[derive(Debug, Clone, Default)]
pub struct ScoreOutputs {
    /// One smoothed score table per archetype.
    pub tables: Vec<ScoreTable>,
    /// The merged, log-normalized rows with their bias constants.
    pub normalized: NormalizedScores,
}

/// Run the full scoring pipeline over all archetype datasets.
pub fn run(observations: &ObservationStore, datasets: &[ArchetypeDataset]) -> ScoreOutputs {
    let mut tables = Vec::with_capacity(datasets.len());

    for dataset in datasets {
        let raw = aggregate(observations, &dataset.catalog, &dataset.baseline);
        info!(
            archetype = %dataset.name,
            entities = raw.entities.len(),
            themes = raw.global_average.len(),
            "aggregated raw theme scores"
        );
        tables.push(smooth_table(&dataset.name, &raw));
    }

    let normalized = normalize(&tables);
    info!(
        tables = tables.len(),
        rows = normalized.rows.len(),
        "log-normalized score tables"
    );

    ScoreOutputs { tables, normalized }
}
