// Archetype dataset discovery — pairing catalog files with baselines.
//
// The data directory holds one catalog CSV per archetype, named
// `<archetype>_theme_keywords.csv`. An archetype only runs if a baseline
// vector exists for it; catalog files with no matching baseline are
// skipped with a warning, mirroring how unknown file types were treated
// upstream of this core.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::baseline::{BaselineSet, BaselineVector};
use super::catalog::ThemeCatalog;

const CATALOG_SUFFIX: &str = "_theme_keywords.csv";

/// One archetype's scoring configuration: its catalog plus its baseline.
#[derive(Debug, Clone)]
pub struct ArchetypeDataset {
    pub name: String,
    pub catalog: ThemeCatalog,
    pub baseline: BaselineVector,
}

/// Scan a directory for archetype catalogs and pair each with its baseline.
///
/// Returns datasets sorted by archetype name so pipeline runs are ordered
/// deterministically.
pub fn discover_datasets(dir: &Path, baselines: &BaselineSet) -> Result<Vec<ArchetypeDataset>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading data directory {}", dir.display()))?;

    let mut datasets = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(archetype) = file_name.strip_suffix(CATALOG_SUFFIX) else {
            continue;
        };

        let Some(baseline) = baselines.get(archetype) else {
            warn!(archetype, "no baseline vector for catalog file, skipping");
            continue;
        };

        let catalog = ThemeCatalog::from_path(&path)?;
        info!(
            archetype,
            keywords = catalog.keyword_count(),
            skipped_rows = catalog.skipped_rows,
            "loaded theme catalog"
        );
        datasets.push(ArchetypeDataset {
            name: archetype.to_string(),
            catalog,
            baseline: baseline.clone(),
        });
    }

    datasets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(datasets)
}
