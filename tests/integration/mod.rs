//! Integration tests for access-gate
//!
//! These tests drive the public API without reaching into internals.

pub mod config_tests;
pub mod engine_scenario_tests;
pub mod matrix_tests;
pub mod usage_tests;
