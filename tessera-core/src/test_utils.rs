//! Shared test utilities for `tessera-core`.

use std::convert::Infallible;

use tessera_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    builder::DuplicatePolicy,
    disjoint_set::DisjointSet,
    element::{ElementId, Relation},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `TESSERA_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Converts raw keys into ids.
pub(crate) fn ids(raw: impl IntoIterator<Item = i64>) -> Vec<ElementId> {
    raw.into_iter().map(ElementId::new).collect()
}

/// Wraps every item in `Ok` for the fallible stream APIs.
pub(crate) fn ok_stream<T>(
    items: impl IntoIterator<Item = T>,
) -> impl Iterator<Item = Result<T, Infallible>> {
    items.into_iter().map(Ok)
}

/// Creates a forest with every key in `raw` registered in order.
pub(crate) fn registered(raw: impl IntoIterator<Item = i64>) -> DisjointSet {
    let mut forest = DisjointSet::new();
    forest
        .register_all(ok_stream(ids(raw)), DuplicatePolicy::Reject)
        .expect("test vertices must be unique");
    forest
}

/// Relations of the reference scenario over vertices `1..=9`.
pub(crate) fn scenario_a_relations() -> Vec<Relation> {
    vec![
        Relation::from_raw(3, [4, 7, 1]),
        Relation::from_raw(4, [9]),
        Relation::from_raw(3, [2, 1]),
        Relation::from_raw(6, [8]),
    ]
}
