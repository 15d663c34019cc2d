//! Unit tests for the access-control context.

mod policy_tests;
