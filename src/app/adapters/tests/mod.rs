//! Test suite for the filesystem adapters

pub mod filesystem_tests;
