//! Library module for dbscribe-gen.
//!
//! This module exposes the CLI definition and the generation pipeline
//! for testing purposes. The binary entry point is in main.rs.

pub mod cli;
pub mod generate;
