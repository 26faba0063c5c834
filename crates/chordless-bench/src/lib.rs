//! Graph generators and benchmark utilities for chordless-cycle enumeration.
//!
//! This crate provides deterministic generation of test graphs with a known
//! mix of cycle structure for benchmarking and property-based testing of
//! `chordless-core`.

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, generate_graph};
