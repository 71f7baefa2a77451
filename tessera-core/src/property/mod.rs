//! Property-based tests for component extraction.
//!
//! Compares the union-find pipeline against a breadth-first oracle and checks
//! the partition, ordering, idempotence, order-independence, determinism,
//! and size invariants across randomly shaped graphs.

mod invariants;
mod oracle;
mod strategies;
mod types;
