//! Property-based tests.

mod determinism_tests;
