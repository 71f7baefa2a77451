//! Breadth-first reference implementation of connected components.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{ElementId, Relation};

/// A partition in canonical form: members sorted, groups sorted.
pub(super) type Partition = Vec<Vec<i64>>;

/// Computes the components of the graph by breadth-first search.
pub(super) fn reference_partition(ids: &[ElementId], relations: &[Relation]) -> Partition {
    let mut adjacency: HashMap<ElementId, Vec<ElementId>> = HashMap::new();
    for (left, right) in relations.iter().flat_map(Relation::edges) {
        adjacency.entry(left).or_default().push(right);
        adjacency.entry(right).or_default().push(left);
    }

    let mut seen = HashSet::with_capacity(ids.len());
    let mut groups = Vec::new();
    for &start in ids {
        if !seen.insert(start) {
            continue;
        }
        let mut group = vec![start.get()];
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for &next in adjacency.get(&current).into_iter().flatten() {
                if seen.insert(next) {
                    group.push(next.get());
                    queue.push_back(next);
                }
            }
        }
        groups.push(group);
    }
    canonical(groups)
}

/// Sorts members and groups so partitions compare independently of order.
pub(super) fn canonical(mut groups: Vec<Vec<i64>>) -> Partition {
    for group in &mut groups {
        group.sort_unstable();
    }
    groups.sort_unstable();
    groups
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn oracle_matches_hand_computed_partition() {
        let ids: Vec<_> = (1..=9).map(ElementId::new).collect();
        let relations = crate::test_utils::scenario_a_relations();
        assert_eq!(
            reference_partition(&ids, &relations),
            vec![vec![1, 2, 3, 4, 7, 9], vec![5], vec![6, 8]]
        );
    }

    #[rstest]
    fn oracle_keeps_isolated_vertices() {
        let ids: Vec<_> = [3, 1, 2].map(ElementId::new).to_vec();
        assert_eq!(reference_partition(&ids, &[]), vec![vec![1], vec![2], vec![3]]);
    }
}
