//! Parser tests.
//!
//! Tests are organized into modules by category:
//! - `fixture`: A small tokenizer that builds token streams for the tests
//! - `parser`: Bodies, expressions, traversals, collections and recovery
//!   through the public entry points
//! - `properties`: Property tests for determinism and lossless decoding

#![allow(clippy::unwrap_used, clippy::expect_used)]
