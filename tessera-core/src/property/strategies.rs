//! Strategy builders for component property tests.
//!
//! Each generator draws distinct vertex ids, picks edges according to a
//! [`GraphShape`], and packs the edges into relations the way a stored
//! relation table would present them: grouped by source, sometimes split
//! across several rows, sometimes with an empty related list.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{ElementId, Relation};

use super::types::{GraphFixture, GraphShape};

/// Minimum vertex count for generated graphs.
const MIN_NODES: usize = 1;
/// Maximum vertex count for generated graphs.
const MAX_NODES: usize = 48;
/// Maximum vertex count for dense graphs.
const DENSE_MAX_NODES: usize = 20;
/// Vertex ids are drawn from `-ID_SPAN..ID_SPAN`.
const ID_SPAN: i64 = 10_000;

/// Generates fixtures across every [`GraphShape`].
pub(super) fn graph_fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    (any::<GraphShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(shape, &mut rng)
    })
}

/// Generates a fixture for a specific shape.
pub(super) fn generate_fixture(shape: GraphShape, rng: &mut SmallRng) -> GraphFixture {
    let max_nodes = match shape {
        GraphShape::Dense => DENSE_MAX_NODES,
        _ => MAX_NODES,
    };
    let node_count = rng.gen_range(MIN_NODES..=max_nodes);
    let ids = distinct_ids(node_count, rng);
    let edges = match shape {
        GraphShape::Sparse => random_edges(node_count, rng),
        GraphShape::Dense => dense_edges(node_count, rng),
        GraphShape::Chains => chain_edges(node_count, rng),
        GraphShape::Stars => star_edges(node_count, rng),
        GraphShape::Isolated => Vec::new(),
        GraphShape::Repeated => repeated_edges(node_count, rng),
    };
    let relations = pack_relations(&ids, &edges, rng);
    GraphFixture {
        ids,
        relations,
        shape,
    }
}

/// Rewrites the relations as single edges in random orientation and order.
///
/// The result describes the same graph as `relations`.
pub(super) fn scramble_relations(relations: &[Relation], rng: &mut SmallRng) -> Vec<Relation> {
    let mut scrambled: Vec<Relation> = relations
        .iter()
        .flat_map(Relation::edges)
        .map(|(left, right)| {
            if rng.gen_bool(0.5) {
                Relation::new(left, [right])
            } else {
                Relation::new(right, [left])
            }
        })
        .collect();
    scrambled.shuffle(rng);
    scrambled
}

fn distinct_ids(count: usize, rng: &mut SmallRng) -> Vec<ElementId> {
    let mut seen = BTreeSet::new();
    let mut ids = Vec::with_capacity(count);
    while ids.len() < count {
        let raw = rng.gen_range(-ID_SPAN..ID_SPAN);
        if seen.insert(raw) {
            ids.push(ElementId::new(raw));
        }
    }
    ids
}

fn random_edges(node_count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let edge_count = rng.gen_range(0..=node_count);
    (0..edge_count)
        .map(|_| (rng.gen_range(0..node_count), rng.gen_range(0..node_count)))
        .collect()
}

fn dense_edges(node_count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let probability: f64 = rng.gen_range(0.3..=0.8);
    let mut edges = Vec::new();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if rng.gen_bool(probability) {
                edges.push((i, j));
            }
        }
    }
    edges
}

fn chain_edges(node_count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..node_count).collect();
    order.shuffle(rng);
    let chain_count = rng.gen_range(1..=node_count.min(4));
    let chain_len = node_count.div_ceil(chain_count);
    let mut edges: Vec<(usize, usize)> = order
        .chunks(chain_len)
        .flat_map(|chain| chain.windows(2).map(|pair| (pair[0], pair[1])))
        .collect();
    edges.shuffle(rng);
    edges
}

fn star_edges(node_count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let hub_count = rng.gen_range(1..=node_count.min(3));
    let mut edges = Vec::new();
    for leaf in hub_count..node_count {
        if rng.gen_bool(0.8) {
            edges.push((rng.gen_range(0..hub_count), leaf));
        }
    }
    edges
}

fn repeated_edges(node_count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let base = random_edges(node_count, rng);
    let mut edges = Vec::with_capacity(base.len() * 2 + 2);
    for &(left, right) in &base {
        edges.push((left, right));
        edges.push((right, left));
    }
    for _ in 0..rng.gen_range(0..=2) {
        let node = rng.gen_range(0..node_count);
        edges.push((node, node));
    }
    edges.shuffle(rng);
    edges
}

/// Groups edges by source, splitting some groups across several relations
/// and adding a few relations with no related ids.
fn pack_relations(
    ids: &[ElementId],
    edges: &[(usize, usize)],
    rng: &mut SmallRng,
) -> Vec<Relation> {
    let mut by_source: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &(source, target) in edges {
        by_source.entry(source).or_default().push(target);
    }

    let mut relations = Vec::new();
    for (source, targets) in by_source {
        let split = if targets.len() > 1 && rng.gen_bool(0.3) {
            rng.gen_range(1..targets.len())
        } else {
            targets.len()
        };
        let (head, tail) = targets.split_at(split);
        for chunk in [head, tail] {
            if !chunk.is_empty() {
                relations.push(Relation::new(
                    ids[source],
                    chunk.iter().map(|&target| ids[target]),
                ));
            }
        }
    }
    for &id in ids {
        if rng.gen_bool(0.1) {
            relations.push(Relation::new(id, []));
        }
    }
    relations.shuffle(rng);
    relations
}
