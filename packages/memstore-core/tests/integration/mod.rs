//! Integration test suite.
//!
//! 1. Cross-layout equivalence on generated data
//! 2. Benchmark workloads at reduced scale

pub mod cross_layout_tests;
pub mod helpers;
pub mod workload_tests;
