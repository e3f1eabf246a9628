//! Core schema catalog and Go code generation for dbscribe.
//!
//! This crate provides the types, traits, and utilities shared by the
//! dbscribe binaries. It reads table and column metadata through
//! dialect-specific catalog adapters, classifies raw column types into
//! a small category set, and renders Go struct source from the result.
//!
//! # Security Guarantees
//! - No credentials stored or logged in any data structures
//! - All database operations are read-only catalog queries
//! - Zero external network dependencies beyond target databases
//!
//! # Architecture
//! The core library follows these patterns:
//! - Trait-object adapters for database access abstraction
//! - Factory pattern for adapter instantiation behind feature gates
//! - Pure, infallible rendering separated from filesystem writes

pub mod adapters;
pub mod config;
pub mod emitter;
pub mod error;
pub mod gotype;
pub mod logging;
pub mod models;
pub mod naming;
pub mod tags;

// Re-export commonly used types
pub use adapters::{CatalogAdapter, Vocabulary, create_adapter};
pub use config::{ConnectionParams, GenerationConfig};
pub use emitter::{GeneratedFile, render_table};
pub use error::{DbScribeError, Result};
pub use gotype::{FieldType, map_go_type};
pub use logging::init_logging;
pub use models::{Column, Dialect, Table, TableKind, TypeCategory};
pub use naming::NamingStyle;
pub use tags::{TagKind, TagSet, TagToggles, generate_tags};
