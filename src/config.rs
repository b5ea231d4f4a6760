use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Everything has a default; the .env file is loaded automatically at
/// startup via dotenvy. Numeric thresholds for the network build are CLI
/// flags, not env vars — they vary per invocation, paths don't.
pub struct Config {
    /// Directory holding the observation store, catalogs, and baselines.
    pub data_dir: PathBuf,
    /// Directory run artifacts are written into.
    pub out_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let data_dir = env::var("CREMA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let out_dir = env::var("CREMA_OUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./out"));
        Ok(Self { data_dir, out_dir })
    }

    /// The observation store JSON: `{entity: {keyword: count}}`.
    pub fn observations_path(&self) -> PathBuf {
        self.data_dir.join("store_keywords.json")
    }

    /// Per-archetype baseline vectors, one JSON config file.
    pub fn baselines_path(&self) -> PathBuf {
        self.data_dir.join("baselines.json")
    }

    /// Optional keyword allow-list for the network build.
    pub fn vocabulary_path(&self) -> PathBuf {
        self.data_dir.join("theme_vocabulary.csv")
    }

    /// Check that the data directory exists before a run.
    pub fn require_data_dir(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            anyhow::bail!(
                "Data directory {} not found. Set CREMA_DATA_DIR or create ./data.\n\
                 It should contain store_keywords.json, baselines.json, and\n\
                 one <archetype>_theme_keywords.csv per archetype.",
                self.data_dir.display()
            );
        }
        Ok(())
    }
}
