//! Lexigraph: lexicon-anchored concept taxonomies.
//!
//! A concept is a set of mutually synonymous labels anchored to one
//! canonical noun sense in an external lexical knowledge base. Directed
//! generalization edges connect concepts into a single-rooted DAG that is
//! always its own transitive reduction; every mutation is validated
//! against those invariants and against the lexicon before it commits.

pub mod error;
pub mod lexicon;
pub mod taxonomy;

pub use error::{ConceptError, GraphError, LexiconError, LexigraphError, Result};
pub use lexicon::{Lexicon, MemoryLexicon, PartOfSpeech, Sense, SenseCandidate, SenseRecord};
pub use taxonomy::{
    Concept, ConceptGraph, ConceptId, GraphDocument, LinkRecord, NodeRecord, Relation,
};
