//! Concept and relation value types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{ConceptError, LexiconError, Result};
use crate::lexicon::{Lexicon, PartOfSpeech, Sense, SenseCandidate};

/// Identity handle for a concept admitted to a
/// [`ConceptGraph`](crate::taxonomy::ConceptGraph).
///
/// Ids are assigned by the owning graph in admission order and never
/// reused. They index the backing adjacency structure only; equality of
/// ids says nothing about equality of concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub(crate) usize);

impl ConceptId {
    /// The arena index behind the handle.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of mutually synonymous labels anchored to one canonical noun
/// sense.
///
/// Labels are distinct and kept in insertion order so serialization stays
/// deterministic. Two concepts are equal when they carry the same label
/// set and the same canonical sense; hashing agrees with that, so identity
/// handles never leak into value comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    labels: Vec<String>,
    canonical_sense: Sense,
}

impl Concept {
    /// Create a concept from explicit labels and a canonical sense name.
    ///
    /// Duplicate labels collapse to their first occurrence. Fails with
    /// `InvalidArgument` when no labels remain, `UnknownSense` when the
    /// sense name does not resolve to a noun sense, and `NotSynonymous`
    /// when any label's sense set misses the canonical sense.
    pub fn create(
        labels: impl IntoIterator<Item = impl Into<String>>,
        sense_name: &str,
        lexicon: &dyn Lexicon,
    ) -> Result<Self> {
        let mut distinct: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !distinct.contains(&label) {
                distinct.push(label);
            }
        }
        if distinct.is_empty() {
            return Err(
                ConceptError::InvalidArgument("a concept needs at least one label".to_string())
                    .into(),
            );
        }

        let sense = lexicon.sense_of(sense_name)?;
        let pos = lexicon.part_of_speech(&sense)?;
        if pos != PartOfSpeech::Noun {
            return Err(LexiconError::UnknownSense(format!(
                "{sense_name} is a {pos} sense, not a noun sense"
            ))
            .into());
        }

        for label in &distinct {
            if !lexicon.senses_of(label).contains(&sense) {
                return Err(ConceptError::NotSynonymous {
                    label: label.clone(),
                    sense: sense.clone(),
                }
                .into());
            }
        }

        Ok(Self {
            labels: distinct,
            canonical_sense: sense,
        })
    }

    /// Resolve a single label to its unique sense.
    ///
    /// Fails with `UnknownLabel` when the lexicon has no sense for the
    /// label, and with `AmbiguousLabel` when it has more than one; the
    /// ambiguity payload lists every candidate sense with its synonyms so
    /// the caller can retry with an explicit [`Concept::create`].
    pub fn from_label(label: &str, lexicon: &dyn Lexicon) -> Result<Self> {
        let senses = lexicon.senses_of(label);
        if senses.is_empty() {
            return Err(LexiconError::UnknownLabel(label.to_string()).into());
        }
        if senses.len() == 1 {
            return Self::create([label], senses[0].as_str(), lexicon);
        }

        let mut candidates = Vec::with_capacity(senses.len());
        for sense in senses {
            let synonyms = lexicon.synonyms(&sense)?;
            candidates.push(SenseCandidate { sense, synonyms });
        }
        Err(LexiconError::AmbiguousLabel {
            label: label.to_string(),
            candidates,
        }
        .into())
    }

    /// Append a new synonym. A no-op when the label is already present;
    /// fails with `NotSynonymous` when the label's sense set misses this
    /// concept's canonical sense. This is the only mutator.
    pub fn add_label(&mut self, label: &str, lexicon: &dyn Lexicon) -> Result<()> {
        if self.has_label(label) {
            return Ok(());
        }
        if !lexicon.senses_of(label).contains(&self.canonical_sense) {
            return Err(ConceptError::NotSynonymous {
                label: label.to_string(),
                sense: self.canonical_sense.clone(),
            }
            .into());
        }
        self.labels.push(label.to_string());
        Ok(())
    }

    /// The labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The canonical sense this concept is anchored to.
    pub fn canonical_sense(&self) -> &Sense {
        &self.canonical_sense
    }

    /// True when `label` is one of this concept's synonyms.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Membership test dispatching on syntax: a `word.pos.nn` string is
    /// matched against the canonical sense, anything else against labels.
    pub fn contains(&self, term: &str) -> bool {
        if Sense::is_sense_syntax(term) {
            self.canonical_sense.as_str() == term
        } else {
            self.has_label(term)
        }
    }

    /// Re-check every label against the lexicon.
    ///
    /// Concepts built through [`Concept::create`] cannot be invalid; this
    /// is for records read back from an external document.
    pub fn validate(&self, lexicon: &dyn Lexicon) -> Result<()> {
        if lexicon.part_of_speech(&self.canonical_sense)? != PartOfSpeech::Noun {
            return Err(LexiconError::UnknownSense(format!(
                "{} is not a noun sense",
                self.canonical_sense
            ))
            .into());
        }
        for label in &self.labels {
            if !lexicon.senses_of(label).contains(&self.canonical_sense) {
                return Err(ConceptError::NotSynonymous {
                    label: label.clone(),
                    sense: self.canonical_sense.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl PartialEq for Concept {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_sense == other.canonical_sense
            && self.labels.len() == other.labels.len()
            && self.labels.iter().all(|l| other.labels.contains(l))
    }
}

impl Eq for Concept {}

impl Hash for Concept {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Labels compare as sets, so hash them order-insensitively.
        let mut sorted: Vec<&str> = self.labels.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.hash(state);
        self.canonical_sense.hash(state);
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({{{}}}, {})",
            self.labels.join(", "),
            self.canonical_sense
        )
    }
}

/// A directed generalization edge between two admitted concepts.
///
/// Construction performs no graph checks; validation happens when the
/// owning graph admits the relation. Two relations are equal when source,
/// target, and label all agree, including when both labels are absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// The generalizing endpoint.
    pub source: ConceptId,
    /// The specialized endpoint.
    pub target: ConceptId,
    /// Optional classification tag with no semantics beyond equality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Relation {
    /// Create an unlabeled relation.
    pub fn new(source: ConceptId, target: ConceptId) -> Self {
        Self {
            source,
            target,
            label: None,
        }
    }

    /// Create a labeled relation.
    pub fn with_label(source: ConceptId, target: ConceptId, label: impl Into<String>) -> Self {
        Self {
            source,
            target,
            label: Some(label.into()),
        }
    }

    /// True when the relation touches `id` at either endpoint.
    pub fn involves(&self, id: ConceptId) -> bool {
        self.source == id || self.target == id
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.source, self.target)
    }
}
