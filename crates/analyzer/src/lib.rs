//! # Relgraph Analyzer
//!
//! Relationship graph analysis over relational schema metadata.
//!
//! ## Features
//!
//! - **Relationship discovery** - outgoing and incoming foreign-key
//!   edges per table
//! - **Structural statistics** - density, degree averages, most
//!   central tables
//! - **Cluster detection** - connected groups of related tables
//! - **Path finding** - shortest join chain between two tables
//!
//! ## Architecture
//!
//! ```text
//! SchemaIntrospector (tables + foreign keys)
//!     │
//!     ├──> Graph Builder
//!     │      ├─ Outgoing edges from each table's own FKs
//!     │      └─ Incoming edges via a reverse index
//!     │
//!     ├──> Relationship Cache (per-table + whole-graph, generation-tagged)
//!     │
//!     └──> Schema Graph
//!            ├─ Statistics (density, degrees, central tables)
//!            ├─ Clusters (connected components, direction ignored)
//!            └─ Path Finder (BFS, deterministic neighbor order)
//! ```
//!
//! All graph-shape outcomes — empty relationship lists, empty paths,
//! no clusters — are normal return values; an error strictly means the
//! schema could not be read.

mod analyzer;
mod builder;
mod cache;
mod cluster;
mod error;
mod path;
mod stats;
mod types;

pub use analyzer::SchemaAnalyzer;
pub use error::{AnalyzerError, Result};
pub use types::{
    CentralTable, Cluster, Direction, GraphStatistics, RelatedTables, Relationship, SchemaGraph,
};
