//! Property runners for component extraction.
//!
//! Every runner builds the fixture through the public pipeline and returns a
//! [`TestCaseResult`] so it can serve both proptest and rstest callers.

use std::collections::HashMap;
use std::convert::Infallible;

use proptest::prop_assert_eq;
use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::{Component, DisjointSet, DuplicatePolicy, ElementId, Relation};

use super::oracle::{Partition, canonical, reference_partition};
use super::strategies::scramble_relations;
use super::types::GraphFixture;

/// Builds a forest from `ids` and `relations`, ready for extraction.
fn build_forest(ids: &[ElementId], relations: &[Relation]) -> Result<DisjointSet, TestCaseError> {
    let mut forest = DisjointSet::with_capacity(ids.len());
    forest
        .register_all(ids.iter().copied().map(Ok::<_, Infallible>), DuplicatePolicy::Reject)
        .map_err(|err| TestCaseError::fail(format!("registration failed: {err}")))?;
    forest
        .ingest_all(relations.iter().cloned().map(Ok::<_, Infallible>))
        .map_err(|err| TestCaseError::fail(format!("ingestion failed: {err}")))?;
    Ok(forest)
}

fn extract(ids: &[ElementId], relations: &[Relation]) -> Result<Vec<Component>, TestCaseError> {
    Ok(build_forest(ids, relations)?.components().collect())
}

fn partition_of(components: &[Component]) -> Partition {
    canonical(
        components
            .iter()
            .map(|component| component.members().iter().map(|id| id.get()).collect())
            .collect(),
    )
}

/// The output partitions the registered ids and agrees with the oracle.
pub(super) fn run_partition_property(fixture: &GraphFixture) -> TestCaseResult {
    let components = extract(&fixture.ids, &fixture.relations)?;

    let emitted: usize = components.iter().map(Component::len).sum();
    prop_assert_eq!(
        emitted,
        fixture.ids.len(),
        "shape={:?} edges={}",
        fixture.shape,
        fixture.edge_count()
    );
    for component in &components {
        if component.is_empty() {
            return Err(TestCaseError::fail("empty component emitted"));
        }
    }
    prop_assert_eq!(
        partition_of(&components),
        reference_partition(&fixture.ids, &fixture.relations),
        "shape={:?}",
        fixture.shape
    );
    Ok(())
}

/// Roots ascend, each root is a member, members follow registration order.
pub(super) fn run_ordering_property(fixture: &GraphFixture) -> TestCaseResult {
    let components = extract(&fixture.ids, &fixture.relations)?;
    let position: HashMap<ElementId, usize> = fixture
        .ids
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, index))
        .collect();

    for pair in components.windows(2) {
        if pair[0].root() >= pair[1].root() {
            return Err(TestCaseError::fail(format!(
                "roots out of order: {} then {}",
                pair[0].root(),
                pair[1].root()
            )));
        }
    }
    for component in &components {
        if !component.members().contains(&component.root()) {
            return Err(TestCaseError::fail(format!(
                "root {} is not a member of its component",
                component.root()
            )));
        }
        let ranks: Vec<usize> = component
            .members()
            .iter()
            .map(|id| position.get(id).copied().unwrap_or(usize::MAX))
            .collect();
        if ranks.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TestCaseError::fail(format!(
                "members of component {} are not in registration order",
                component.root()
            )));
        }
    }
    Ok(())
}

/// Applying every relation a second time changes nothing.
pub(super) fn run_idempotence_property(fixture: &GraphFixture) -> TestCaseResult {
    let once = extract(&fixture.ids, &fixture.relations)?;

    let mut forest = build_forest(&fixture.ids, &fixture.relations)?;
    let repeat = forest
        .ingest_all(fixture.relations.iter().cloned().map(Ok::<_, Infallible>))
        .map_err(|err| TestCaseError::fail(format!("second ingestion failed: {err}")))?;
    prop_assert_eq!(repeat.merges, 0);
    let twice: Vec<Component> = forest.components().collect();

    prop_assert_eq!(once, twice);
    Ok(())
}

/// Reordering and reorienting edges leaves the partition unchanged.
pub(super) fn run_order_independence_property(fixture: &GraphFixture, seed: u64) -> TestCaseResult {
    let mut rng = SmallRng::seed_from_u64(seed);
    let scrambled = scramble_relations(&fixture.relations, &mut rng);

    let original = extract(&fixture.ids, &fixture.relations)?;
    let reordered = extract(&fixture.ids, &scrambled)?;
    prop_assert_eq!(partition_of(&original), partition_of(&reordered));
    Ok(())
}

/// Identical input produces identical output, roots included.
pub(super) fn run_determinism_property(fixture: &GraphFixture) -> TestCaseResult {
    let first = extract(&fixture.ids, &fixture.relations)?;
    let second = extract(&fixture.ids, &fixture.relations)?;
    prop_assert_eq!(first, second);
    Ok(())
}

/// Every root's recorded size equals the number of elements under it.
pub(super) fn run_size_property(fixture: &GraphFixture) -> TestCaseResult {
    let mut forest = build_forest(&fixture.ids, &fixture.relations)?;

    let mut counted: HashMap<ElementId, usize> = HashMap::new();
    for &id in &fixture.ids {
        let root = forest
            .find(id)
            .map_err(|err| TestCaseError::fail(format!("find failed: {err}")))?;
        *counted.entry(root.id()).or_default() += 1;
    }
    prop_assert_eq!(counted.len(), forest.component_count());

    for &id in &fixture.ids {
        let record = forest
            .record(id)
            .map_err(|err| TestCaseError::fail(format!("record failed: {err}")))?;
        let expected = counted.get(&id).copied();
        prop_assert_eq!(record.size(), expected, "element {}", id);
        prop_assert_eq!(record.is_root(), expected.is_some(), "element {}", id);
    }
    Ok(())
}
