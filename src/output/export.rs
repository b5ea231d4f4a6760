// File exports — score tables as CSV, the network as JSON.
//
// These are the only artifacts a run leaves behind; everything else is
// ephemeral. Downstream collaborators (radar charts, the graph renderer)
// read these files, so their shapes are stable.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::network::builder::KeywordNetwork;
use crate::scoring::lognorm::NormalizedScores;
use crate::scoring::pipeline::ScoreOutputs;
use crate::scoring::smooth::ScoreTable;

/// Write one `<archetype>_theme_scores.csv` per table; returns the paths.
pub fn write_score_tables(outputs: &ScoreOutputs, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut paths = Vec::with_capacity(outputs.tables.len());
    for table in &outputs.tables {
        let path = out_dir.join(format!("{}_theme_scores.csv", table.dataset));
        write_table(table, &path)?;
        info!(path = %path.display(), rows = table.rows.len(), "wrote score table");
        paths.push(path);
    }
    Ok(paths)
}

fn write_table(table: &ScoreTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating score table {}", path.display()))?;
    for row in &table.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the merged log-score table, all archetypes in one file.
pub fn write_log_scores(normalized: &NormalizedScores, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let path = out_dir.join("log_scores.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating log score table {}", path.display()))?;
    for row in &normalized.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = normalized.rows.len(), "wrote log scores");
    Ok(path)
}

/// Write the network as pretty-printed JSON for the graph renderer.
pub fn write_network(network: &KeywordNetwork, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let path = out_dir.join("keyword_network.json");
    let file = fs::File::create(&path)
        .with_context(|| format!("creating network export {}", path.display()))?;
    serde_json::to_writer_pretty(file, network)?;
    info!(
        path = %path.display(),
        nodes = network.nodes.len(),
        edges = network.edges.len(),
        "wrote keyword network"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::smooth::ScoreRow;

    #[test]
    fn score_table_round_trips_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let table = ScoreTable {
            dataset: "chatty".to_string(),
            rows: vec![ScoreRow {
                entity: "E1".to_string(),
                theme: "Ambience".to_string(),
                final_theme_score: 22.5,
            }],
        };
        let outputs = ScoreOutputs {
            tables: vec![table],
            normalized: Default::default(),
        };

        let paths = write_score_tables(&outputs, dir.path()).unwrap();
        assert_eq!(paths.len(), 1);

        let mut reader = csv::Reader::from_path(&paths[0]).unwrap();
        let rows: Vec<ScoreRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity, "E1");
        assert_eq!(rows[0].final_theme_score, 22.5);
    }

    #[test]
    fn network_export_has_expected_shape() {
        let dir = tempfile::tempdir().unwrap();
        let network = KeywordNetwork::default();
        let path = write_network(&network, dir.path()).unwrap();

        let raw = fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for key in ["nodes", "edges", "top_connections", "connection_strengths"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
