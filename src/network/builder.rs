// Keyword co-occurrence network builder.
//
// Derives a weighted graph of keyword associations from the observation
// store. Node weight is global mention frequency; edge strength rewards
// keyword pairs that are both locally salient at an entity and globally
// significant, with global frequency normalized so ubiquitous keywords
// don't dominate:
//
//   strength += sqrt(norm[k1] * norm[k2] * count[e][k1] * count[e][k2])
//
// accumulated per unordered pair over every entity where both occur.
// The rendered edge list is truncated to the strongest `max_edges`
// globally, so low-degree nodes can lose all of their edges — that is a
// deliberate trade-off, not a bug. Per-keyword top-6 neighbor lists are
// ranked from the full pre-truncation accumulator by default; set
// `restrict_top_k_to_surviving_edges` to rank only over edges that
// survived truncation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::observations::ObservationStore;

use super::categories::{Category, CategoryRules};

/// Neighbors kept per keyword in the top-connections lists.
pub const TOP_NEIGHBORS: usize = 6;

/// Thresholds and switches for one network build.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Accumulated pair strength below this never becomes an edge.
    pub min_edge_weight: f64,
    /// Global cap on rendered edges (strongest first).
    pub max_edges: usize,
    /// Keywords with global frequency below this are dropped.
    pub min_node_value: u64,
    /// Rank top-6 neighbors over surviving edges only, instead of the
    /// full pre-truncation accumulator.
    pub restrict_top_k_to_surviving_edges: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            min_edge_weight: 0.0,
            max_edges: 100,
            min_node_value: 0,
            restrict_top_k_to_surviving_edges: false,
        }
    }
}

/// One keyword node, shaped for the rendering collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordNode {
    pub id: String,
    pub label: String,
    /// Global mention frequency across all entities.
    pub value: u64,
    pub title: String,
    pub category: Category,
    /// Visual size on a log scale: 15 + 5 * ln(1 + freq).
    pub size: f64,
}

/// One undirected edge; exactly one direction is stored per pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEdge {
    pub from: String,
    pub to: String,
    pub value: f64,
    pub title: String,
}

/// The complete network: nodes, truncated edges, and per-keyword
/// top-neighbor rankings with their strengths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordNetwork {
    pub nodes: Vec<KeywordNode>,
    pub edges: Vec<KeywordEdge>,
    pub top_connections: BTreeMap<String, Vec<String>>,
    pub connection_strengths: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Build the keyword network from the observation store.
///
/// `vocabulary`, when given, restricts eligible keywords to the allow-list.
/// An empty surviving keyword set produces an empty network, never an
/// error.
pub fn build_network(
    observations: &ObservationStore,
    vocabulary: Option<&BTreeSet<String>>,
    rules: &CategoryRules,
    config: &NetworkConfig,
) -> KeywordNetwork {
    // Global frequency per keyword, allow-list and floor applied.
    let mut frequencies: BTreeMap<String, u64> = BTreeMap::new();
    for counts in observations.entities.values() {
        for (keyword, &count) in counts {
            *frequencies.entry(keyword.clone()).or_default() += count;
        }
    }
    frequencies.retain(|keyword, &mut freq| {
        freq >= config.min_node_value
            && vocabulary.map(|v| v.contains(keyword)).unwrap_or(true)
    });

    if frequencies.is_empty() {
        info!("no keywords survived filtering, returning empty network");
        return KeywordNetwork::default();
    }

    let nodes: Vec<KeywordNode> = frequencies
        .iter()
        .map(|(keyword, &freq)| KeywordNode {
            id: keyword.clone(),
            label: keyword.clone(),
            value: freq,
            title: format!("{keyword}<br>total mentions: {freq}"),
            category: rules.categorize(keyword),
            size: 15.0 + 5.0 * (freq as f64).ln_1p(),
        })
        .collect();

    // Normalized frequency in (0, 1], damping globally ubiquitous keywords.
    let max_freq = frequencies.values().copied().max().unwrap_or(1) as f64;
    let normalized: BTreeMap<&str, f64> = frequencies
        .iter()
        .map(|(k, &f)| (k.as_str(), f as f64 / max_freq))
        .collect();

    // Symmetric accumulation: pair strengths keyed by the canonical
    // (lesser, greater) ordering, neighbor maps in both directions.
    let mut pair_strengths: BTreeMap<(String, String), f64> = BTreeMap::new();
    let mut neighbor_strengths: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for counts in observations.entities.values() {
        let present: Vec<(&str, u64)> = counts
            .iter()
            .filter(|(k, _)| frequencies.contains_key(k.as_str()))
            .map(|(k, &c)| (k.as_str(), c))
            .collect();

        for (i, &(k1, c1)) in present.iter().enumerate() {
            for &(k2, c2) in present.iter().skip(i + 1) {
                let strength =
                    (normalized[k1] * normalized[k2] * c1 as f64 * c2 as f64).sqrt();

                *pair_strengths
                    .entry((k1.to_string(), k2.to_string()))
                    .or_default() += strength;
                *neighbor_strengths
                    .entry(k1.to_string())
                    .or_default()
                    .entry(k2.to_string())
                    .or_default() += strength;
                *neighbor_strengths
                    .entry(k2.to_string())
                    .or_default()
                    .entry(k1.to_string())
                    .or_default() += strength;
            }
        }
    }

    // Threshold, sort by strength descending, keep the global top N.
    let mut edges: Vec<KeywordEdge> = pair_strengths
        .iter()
        .filter(|(_, &strength)| strength >= config.min_edge_weight)
        .map(|((from, to), &strength)| KeywordEdge {
            from: from.clone(),
            to: to.clone(),
            value: strength,
            title: format!("{from} ↔ {to}: {strength:.1}"),
        })
        .collect();
    edges.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (&a.from, &a.to).cmp(&(&b.from, &b.to)))
    });
    edges.truncate(config.max_edges);

    // Top-k neighbors per keyword. Ranked over the full accumulator by
    // default, which can disagree with the truncated edge list for
    // low-ranked keywords; the flag switches to the surviving edges.
    let surviving: BTreeSet<(&str, &str)> = edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect();

    let mut top_connections = BTreeMap::new();
    let mut connection_strengths = BTreeMap::new();

    for (keyword, neighbors) in &neighbor_strengths {
        let mut ranked: Vec<(&String, f64)> = neighbors
            .iter()
            .filter(|(neighbor, _)| {
                if !config.restrict_top_k_to_surviving_edges {
                    return true;
                }
                let pair = if keyword.as_str() < neighbor.as_str() {
                    (keyword.as_str(), neighbor.as_str())
                } else {
                    (neighbor.as_str(), keyword.as_str())
                };
                surviving.contains(&pair)
            })
            .map(|(neighbor, &strength)| (neighbor, strength))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked.truncate(TOP_NEIGHBORS);

        if ranked.is_empty() {
            continue;
        }
        top_connections.insert(
            keyword.clone(),
            ranked.iter().map(|(n, _)| (*n).clone()).collect(),
        );
        connection_strengths.insert(
            keyword.clone(),
            ranked.iter().map(|(n, s)| ((*n).clone(), *s)).collect(),
        );
    }

    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        "built keyword network"
    );

    KeywordNetwork {
        nodes,
        edges,
        top_connections,
        connection_strengths,
    }
}
