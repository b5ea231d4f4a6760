use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crema::config::Config;
use crema::data::baseline::BaselineSet;
use crema::data::dataset::discover_datasets;
use crema::data::observations::ObservationStore;
use crema::data::vocabulary::load_vocabulary;
use crema::network::builder::{build_network, NetworkConfig};
use crema::network::categories::CategoryRules;
use crema::output::{export, terminal};
use crema::scoring::pipeline;
use crema::scoring::profile::theme_profile;

/// Crema: theme affinity scoring and keyword networks for store reviews.
///
/// Turns crawled per-store keyword frequencies into smoothed, log-normalized
/// theme score tables and a weighted keyword co-occurrence graph.
#[derive(Parser)]
#[command(name = "crema", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scoring pipeline and write score tables
    Score,

    /// Build the keyword co-occurrence network and export it as JSON
    Network {
        /// Drop keyword pairs with accumulated strength below this
        #[arg(long, default_value = "0.0")]
        min_edge_weight: f64,

        /// Keep only the strongest N edges globally
        #[arg(long, default_value = "100")]
        max_edges: usize,

        /// Drop keywords mentioned fewer than this many times overall
        #[arg(long, default_value = "0")]
        min_node_value: u64,

        /// Rank each keyword's top neighbors over surviving edges only,
        /// instead of the full pre-truncation accumulator
        #[arg(long)]
        top_k_surviving_only: bool,

        /// Ignore the theme vocabulary allow-list and use every keyword
        #[arg(long)]
        all_keywords: bool,
    },

    /// Print one entity's per-theme log scores for an archetype
    Profile {
        /// The entity (store) to look up
        entity: String,

        /// The archetype whose themes to report
        #[arg(long)]
        archetype: String,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crema=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Score => {
            config.require_data_dir()?;
            let observations = ObservationStore::from_path(&config.observations_path())?;
            let baselines = BaselineSet::from_path(&config.baselines_path())?;
            let datasets = discover_datasets(&config.data_dir, &baselines)?;

            println!(
                "Scoring {} entities across {} archetypes...",
                observations.entity_count(),
                datasets.len()
            );

            let outputs = pipeline::run(&observations, &datasets);

            let table_paths = export::write_score_tables(&outputs, &config.out_dir)?;
            let log_path = export::write_log_scores(&outputs.normalized, &config.out_dir)?;

            terminal::display_score_summary(&outputs);
            for path in &table_paths {
                println!("  wrote {}", path.display());
            }
            println!("  wrote {}", log_path.display());
        }

        Commands::Network {
            min_edge_weight,
            max_edges,
            min_node_value,
            top_k_surviving_only,
            all_keywords,
        } => {
            config.require_data_dir()?;
            let observations = ObservationStore::from_path(&config.observations_path())?;

            // The allow-list is optional twice over: the flag skips it,
            // and a missing file just means no restriction.
            let vocabulary = if all_keywords {
                None
            } else {
                let path = config.vocabulary_path();
                if path.is_file() {
                    Some(load_vocabulary(&path)?)
                } else {
                    println!(
                        "{}",
                        format!("No vocabulary at {}; using all keywords.", path.display())
                            .dimmed()
                    );
                    None
                }
            };

            let network_config = NetworkConfig {
                min_edge_weight,
                max_edges,
                min_node_value,
                restrict_top_k_to_surviving_edges: top_k_surviving_only,
            };
            let network = build_network(
                &observations,
                vocabulary.as_ref(),
                &CategoryRules::default(),
                &network_config,
            );

            let path = export::write_network(&network, &config.out_dir)?;
            terminal::display_network_summary(&network);
            println!("  wrote {}", path.display());
        }

        Commands::Profile { entity, archetype } => {
            config.require_data_dir()?;
            let observations = ObservationStore::from_path(&config.observations_path())?;
            let baselines = BaselineSet::from_path(&config.baselines_path())?;

            let Some(baseline) = baselines.get(&archetype) else {
                anyhow::bail!(
                    "Unknown archetype '{archetype}'. Known: {}",
                    baselines
                        .archetypes
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            };
            let labels: Vec<String> = baseline.themes.keys().cloned().collect();

            let datasets = discover_datasets(&config.data_dir, &baselines)?;
            let outputs = pipeline::run(&observations, &datasets);

            let scores = theme_profile(&outputs.normalized, &archetype, &entity, &labels);
            terminal::display_profile(&entity, &archetype, &labels, &scores);
        }
    }

    Ok(())
}
