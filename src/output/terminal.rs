// Colored terminal output for run summaries.
//
// This module handles all terminal-specific formatting: colors, tables,
// alignment. Core modules never print; main.rs delegates here.

use colored::Colorize;

use crate::network::builder::KeywordNetwork;
use crate::scoring::pipeline::ScoreOutputs;

/// Summarize a scoring run: per-archetype row counts and bias constants.
pub fn display_score_summary(outputs: &ScoreOutputs) {
    if outputs.tables.is_empty() {
        println!("No archetype datasets found. Nothing was scored.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Theme Scores ({} archetypes) ===", outputs.tables.len()).bold()
    );

    for table in &outputs.tables {
        let entities = table
            .rows
            .iter()
            .map(|r| r.entity.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        println!(
            "\n  {} — {} entities, {} rows",
            table.dataset.bold(),
            entities,
            table.rows.len()
        );

        if let Some(biases) = outputs.normalized.biases.get(&table.dataset) {
            for (theme, b) in biases {
                let b_str = if *b > 0.0 {
                    format!("b = {b}").yellow().to_string()
                } else {
                    format!("b = {b}").dimmed().to_string()
                };
                println!("    {:<24} {}", theme, b_str);
            }
        }
    }
    println!();
}

/// Summarize a built network: counts and the strongest associations.
pub fn display_network_summary(network: &KeywordNetwork) {
    if network.nodes.is_empty() {
        println!("No keywords survived filtering. The network is empty.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Keyword Network ({} nodes, {} edges) ===",
            network.nodes.len(),
            network.edges.len()
        )
        .bold()
    );
    println!();

    println!(
        "  {:<22} {:<22} {:>8}",
        "Keyword".dimmed(),
        "Keyword".dimmed(),
        "Strength".dimmed()
    );
    println!("  {}", "-".repeat(54).dimmed());
    for edge in network.edges.iter().take(10) {
        println!("  {:<22} {:<22} {:>8.1}", edge.from, edge.to, edge.value);
    }
    println!();
}

/// Print one entity's theme profile as label/score pairs.
pub fn display_profile(entity: &str, archetype: &str, labels: &[String], scores: &[f64]) {
    println!(
        "\n{}",
        format!("=== {entity} ({archetype}) ===").bold()
    );
    for (label, score) in labels.iter().zip(scores) {
        let bar_len = (score * 8.0).round().max(0.0) as usize;
        println!(
            "  {:<24} {:>7.4}  {}",
            label,
            score,
            "#".repeat(bar_len).green()
        );
    }
    println!();
}
