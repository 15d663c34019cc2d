//! Unit tests for the activity context.
