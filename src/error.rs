//! Error types for lexigraph operations.

use thiserror::Error;

use crate::lexicon::{Sense, SenseCandidate};

/// Main error type for lexigraph operations.
#[derive(Error, Debug)]
pub enum LexigraphError {
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("Concept error: {0}")]
    Concept(#[from] ConceptError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while resolving names and labels against the lexicon.
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Unknown sense: {0}")]
    UnknownSense(String),

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Label '{label}' has multiple senses:\n{}", format_candidates(.candidates))]
    AmbiguousLabel {
        label: String,
        candidates: Vec<SenseCandidate>,
    },
}

/// Errors raised while building or mutating a single concept.
#[derive(Error, Debug)]
pub enum ConceptError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("'{label}' is not a synonym of {sense}")]
    NotSynonymous { label: String, sense: Sense },
}

/// Errors raised while validating a graph mutation.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Duplicate label: '{0}' already belongs to a concept in the graph")]
    DuplicateLabel(String),

    #[error("Duplicate sense: {0} already anchors a concept in the graph")]
    DuplicateSense(Sense),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("{source_sense} is not a hypernym of {target_sense}")]
    NotAHypernym {
        source_sense: Sense,
        target_sense: Sense,
    },

    #[error("Redundant edge: a longer path from {source_sense} to {target_sense} already exists")]
    RedundantEdge {
        source_sense: Sense,
        target_sense: Sense,
    },

    #[error("Cycle detected: {target_sense} already reaches {source_sense}")]
    CycleDetected {
        source_sense: Sense,
        target_sense: Sense,
    },

    #[error("Adding the edge would leave {0} roots")]
    MultipleRoots(usize),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

fn format_candidates(candidates: &[SenseCandidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("  {}: {}", c.sense, c.synonyms.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for lexigraph operations.
pub type Result<T> = std::result::Result<T, LexigraphError>;
