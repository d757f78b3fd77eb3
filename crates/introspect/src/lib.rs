//! # Relgraph Introspect
//!
//! Schema-fact boundary for the relationship graph analyzer.
//!
//! This crate defines the raw facts the analyzer consumes — table names
//! and foreign-key metadata — behind the [`SchemaIntrospector`] trait,
//! so that the graph layer never talks to a database directly. A
//! deterministic in-memory implementation ([`MemoryIntrospector`]) is
//! provided for tests and embedders; database-backed implementations
//! live outside this workspace.

mod error;
mod introspector;
mod memory;
mod types;

pub use error::{IntrospectError, Result};
pub use introspector::SchemaIntrospector;
pub use memory::MemoryIntrospector;
pub use types::ForeignKeyDescriptor;
