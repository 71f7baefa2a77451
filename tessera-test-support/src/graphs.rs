//! Reference graphs with hand-checked components.
//!
//! Graphs are expressed in raw `i64` ids so any crate can feed them to its
//! own sources and sinks.

/// A small graph together with the components a build must produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceGraph {
    /// Short name used in test case labels.
    pub name: &'static str,
    /// Vertex ids in registration order.
    pub vertices: Vec<i64>,
    /// `(source, related)` rows in stream order.
    pub relations: Vec<(i64, Vec<i64>)>,
    /// Expected components in emission order.
    pub components: Vec<Vec<i64>>,
}

/// Vertices `1..=9` with three components, one of them a singleton.
#[must_use]
pub fn mixed() -> ReferenceGraph {
    ReferenceGraph {
        name: "mixed",
        vertices: (1..=9).collect(),
        relations: vec![
            (3, vec![4, 7, 1]),
            (4, vec![9]),
            (3, vec![2, 1]),
            (6, vec![8]),
        ],
        components: vec![vec![1, 2, 3, 4, 7, 9], vec![5], vec![6, 8]],
    }
}

/// Vertices `1..=5` and no relations.
#[must_use]
pub fn isolated() -> ReferenceGraph {
    ReferenceGraph {
        name: "isolated",
        vertices: (1..=5).collect(),
        relations: Vec::new(),
        components: (1..=5).map(|id| vec![id]).collect(),
    }
}

/// The path `1-2-3-4` delivered as one edge per relation.
#[must_use]
pub fn chain() -> ReferenceGraph {
    ReferenceGraph {
        name: "chain",
        vertices: (1..=4).collect(),
        relations: vec![(1, vec![2]), (2, vec![3]), (3, vec![4])],
        components: vec![vec![1, 2, 3, 4]],
    }
}

/// Unordered, negative ids whose roots differ from their first members.
#[must_use]
pub fn unordered() -> ReferenceGraph {
    ReferenceGraph {
        name: "unordered",
        vertices: vec![40, -3, 12, 7, -8],
        relations: vec![(12, vec![40]), (-8, vec![]), (7, vec![-8, -8])],
        components: vec![vec![-3], vec![7, -8], vec![40, 12]],
    }
}

/// Every reference graph.
#[must_use]
pub fn all() -> Vec<ReferenceGraph> {
    vec![mixed(), isolated(), chain(), unordered()]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn components_cover_every_vertex_once() {
        for graph in all() {
            let vertices: BTreeSet<i64> = graph.vertices.iter().copied().collect();
            let members: Vec<i64> = graph.components.iter().flatten().copied().collect();
            let unique: BTreeSet<i64> = members.iter().copied().collect();
            assert_eq!(members.len(), unique.len(), "{}", graph.name);
            assert_eq!(vertices, unique, "{}", graph.name);
        }
    }
}
