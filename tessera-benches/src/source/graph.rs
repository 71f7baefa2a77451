//! Seeded graph generators.

use std::fmt;
use std::iter;

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tessera_core::{DataSourceError, ElementId, Relation, RelationSource, VertexSource};

use super::SyntheticError;

/// How relations are laid over the vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphShape {
    /// Every vertex relates to `edges_per_vertex` vertices drawn uniformly,
    /// so most edges merge until one giant component remains.
    Sparse {
        /// Related ids per relation.
        edges_per_vertex: usize,
    },
    /// Disjoint paths of `chain_length` vertices, one edge per relation, in
    /// shuffled order. Produces deep trees before compression.
    Chains {
        /// Vertices per path.
        chain_length: usize,
    },
    /// A random spanning tree whose edges are delivered `repeats` times, so
    /// most unions find both ends already joined.
    Redundant {
        /// Times each tree edge is delivered.
        repeats: usize,
    },
}

impl fmt::Display for GraphShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sparse { edges_per_vertex } => write!(f, "sparse({edges_per_vertex})"),
            Self::Chains { chain_length } => write!(f, "chains({chain_length})"),
            Self::Redundant { repeats } => write!(f, "redundant({repeats})"),
        }
    }
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of vertices to register.
    pub vertex_count: usize,
    /// Relation layout.
    pub shape: GraphShape,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A vertex and relation source over a generated graph.
///
/// Vertex ids are `0..vertex_count` registered in shuffled order. Both
/// streams can be opened any number of times.
///
/// # Examples
///
/// ```
/// use tessera_benches::source::{GraphShape, SyntheticGraph, SyntheticGraphConfig};
///
/// let config = SyntheticGraphConfig {
///     vertex_count: 12,
///     shape: GraphShape::Chains { chain_length: 4 },
///     seed: 7,
/// };
/// let graph = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(graph.vertex_ids().len(), 12);
/// assert_eq!(graph.edge_count(), 9);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    vertices: Vec<ElementId>,
    relations: Vec<Relation>,
}

impl SyntheticGraph {
    /// Generates a graph eagerly from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroVertices`] for an empty graph,
    /// [`SyntheticError::ZeroParameter`] when a shape parameter is zero, and
    /// [`SyntheticError::Overflow`] when the ids do not fit in `i64`.
    pub fn generate(config: &SyntheticGraphConfig) -> Result<Self, SyntheticError> {
        if config.vertex_count == 0 {
            return Err(SyntheticError::ZeroVertices);
        }
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let vertices = shuffled_ids(config.vertex_count, &mut rng)?;
        let relations = match config.shape {
            GraphShape::Sparse { edges_per_vertex } => {
                let edges = positive(edges_per_vertex, "edges_per_vertex")?;
                sparse_relations(&vertices, edges, &mut rng)
            }
            GraphShape::Chains { chain_length } => {
                chain_relations(&vertices, positive(chain_length, "chain_length")?, &mut rng)
            }
            GraphShape::Redundant { repeats } => {
                redundant_relations(&vertices, positive(repeats, "repeats")?, &mut rng)
            }
        };
        Ok(Self {
            vertices,
            relations,
        })
    }

    /// Returns the vertex ids in registration order.
    #[must_use]
    pub fn vertex_ids(&self) -> &[ElementId] {
        &self.vertices
    }

    /// Returns the relations in stream order.
    #[must_use]
    pub fn relation_items(&self) -> &[Relation] {
        &self.relations
    }

    /// Returns the number of edges across all relations.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.relations
            .iter()
            .map(|relation| relation.related().len())
            .sum()
    }
}

const fn positive(value: usize, parameter: &'static str) -> Result<usize, SyntheticError> {
    if value == 0 {
        Err(SyntheticError::ZeroParameter { parameter })
    } else {
        Ok(value)
    }
}

fn shuffled_ids(count: usize, rng: &mut SmallRng) -> Result<Vec<ElementId>, SyntheticError> {
    let end = i64::try_from(count).map_err(|_| SyntheticError::Overflow {
        vertex_count: count,
    })?;
    let mut ids: Vec<ElementId> = (0..end).map(ElementId::new).collect();
    ids.shuffle(rng);
    Ok(ids)
}

fn sparse_relations(
    vertices: &[ElementId],
    edges_per_vertex: usize,
    rng: &mut SmallRng,
) -> Vec<Relation> {
    let mut relations = Vec::with_capacity(vertices.len());
    for &source in vertices {
        let mut related = Vec::with_capacity(edges_per_vertex);
        for _ in 0..edges_per_vertex {
            related.extend(vertices.choose(rng).copied());
        }
        relations.push(Relation::new(source, related));
    }
    relations
}

fn chain_relations(
    vertices: &[ElementId],
    chain_length: usize,
    rng: &mut SmallRng,
) -> Vec<Relation> {
    let mut relations = Vec::with_capacity(vertices.len());
    for chain in vertices.chunks(chain_length) {
        for pair in chain.windows(2) {
            if let [left, right] = *pair {
                relations.push(Relation::new(left, [right]));
            }
        }
    }
    relations.shuffle(rng);
    relations
}

fn redundant_relations(vertices: &[ElementId], repeats: usize, rng: &mut SmallRng) -> Vec<Relation> {
    let mut tree = Vec::with_capacity(vertices.len());
    for (index, &source) in vertices.iter().enumerate().skip(1) {
        let earlier = vertices.get(..index).unwrap_or_default();
        if let Some(&target) = earlier.choose(rng) {
            tree.push(Relation::new(source, [target]));
        }
    }
    let mut relations: Vec<Relation> = iter::repeat_n(tree, repeats).flatten().collect();
    relations.shuffle(rng);
    relations
}

impl VertexSource for SyntheticGraph {
    #[expect(
        clippy::unnecessary_literal_bound,
        reason = "VertexSource trait constrains the return type to &str"
    )]
    fn name(&self) -> &str {
        "synthetic"
    }

    fn vertices(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<ElementId, DataSourceError>>, DataSourceError> {
        Ok(self.vertices.iter().copied().map(Ok))
    }
}

impl RelationSource for SyntheticGraph {
    #[expect(
        clippy::unnecessary_literal_bound,
        reason = "RelationSource trait constrains the return type to &str"
    )]
    fn name(&self) -> &str {
        "synthetic"
    }

    fn relations(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<Relation, DataSourceError>>, DataSourceError> {
        Ok(self.relations.iter().cloned().map(Ok))
    }
}
