//! Integration tests for the dataset store.
//!
//! 1. Store round trips and replace semantics
//! 2. Query correctness through the store
//! 3. Failure modes: missing paths, corruption, schema errors

mod failure_tests;
mod helpers;
mod query_tests;
mod store_tests;
