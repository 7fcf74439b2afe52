//! End-to-end tests driving the full schedule through the TestRoom harness.

mod region_growth_tests;
