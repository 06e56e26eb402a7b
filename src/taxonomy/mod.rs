//! Concept taxonomy: an invariant-preserving DAG of lexicon-anchored
//! concepts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     ConceptGraph                          │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────┐  │
//! │  │ Concept arena │ │  Relations   │ │ DiGraph backing  │  │
//! │  │ (value types) │ │ (id pairs)   │ │ (id adjacency)   │  │
//! │  └──────────────┘ └──────────────┘ └──────────────────┘  │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │ validates against
//!                      ┌──────┴──────┐
//!                      │   Lexicon   │  (read-only oracle)
//!                      └─────────────┘
//! ```
//!
//! Every mutation either fully commits or leaves the graph unchanged; the
//! four structural invariants (acyclicity, single root, transitive
//! reduction, label/sense uniqueness) hold continuously.

mod document;
mod graph;
mod types;

pub use document::{GraphDocument, LinkRecord, NodeRecord};
pub use graph::ConceptGraph;
pub use types::{Concept, ConceptId, Relation};
