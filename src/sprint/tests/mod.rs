//! Unit tests for the sprint lifecycle guard.
