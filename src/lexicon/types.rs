//! Sense identifiers and part-of-speech classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The canonical name of a single word sense in the lexical knowledge base.
///
/// Sense names follow the `word.pos.nn` convention (e.g. `dog.n.01`).
/// The value is opaque to the graph; only the lexicon interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sense(String);

impl Sense {
    /// Create a sense identifier from its canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The canonical name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a raw string follows the `word.pos.nn` sense-name
    /// syntax. Containment queries use this to decide whether a string
    /// should be matched against canonical senses or against labels.
    pub fn is_sense_syntax(s: &str) -> bool {
        s.split('.').count() == 3
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Sense {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Sense {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Part of speech of a word sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    /// A noun sense. The only part of speech concepts may anchor to.
    Noun,
    /// A verb sense.
    Verb,
    /// An adjective sense.
    Adjective,
    /// An adverb sense.
    Adverb,
    /// Anything else the knowledge base distinguishes.
    Other,
}

impl PartOfSpeech {
    /// Get a human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Other => "other",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One candidate sense for an ambiguous label, carried in the
/// `AmbiguousLabel` failure so the caller can retry with an explicit
/// canonical sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseCandidate {
    /// The candidate sense identifier.
    pub sense: Sense,
    /// Every synonym the lexicon records for this sense.
    pub synonyms: Vec<String>,
}
