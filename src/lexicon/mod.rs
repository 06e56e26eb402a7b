//! Lexical knowledge base abstraction.
//!
//! The graph never interprets senses itself; it consults an injected,
//! read-only oracle for sense lookup, synonym-set lookup, and hypernym-path
//! lookup. Shipping the oracle as a trait keeps the validation logic
//! deterministic under test: [`MemoryLexicon`] stands in for a live
//! knowledge base.

mod memory;
mod types;

pub use memory::{MemoryLexicon, SenseRecord};
pub use types::{PartOfSpeech, Sense, SenseCandidate};

use crate::error::Result;

/// Read-only oracle over a lexical knowledge base.
pub trait Lexicon: Send + Sync {
    /// Resolve a canonical sense name to a sense identifier.
    ///
    /// Fails with `UnknownSense` when the name does not denote a sense.
    fn sense_of(&self, name: &str) -> Result<Sense>;

    /// Every sense a surface label can denote. Empty when the label is
    /// unknown to the knowledge base.
    fn senses_of(&self, label: &str) -> Vec<Sense>;

    /// The part of speech of a sense.
    fn part_of_speech(&self, sense: &Sense) -> Result<PartOfSpeech>;

    /// Every synonym (lemma) the knowledge base records for a sense.
    fn synonyms(&self, sense: &Sense) -> Result<Vec<String>>;

    /// The path from the root hypernym down to `sense`, inclusive of
    /// `sense` itself.
    fn hypernym_path(&self, sense: &Sense) -> Result<Vec<Sense>>;
}
