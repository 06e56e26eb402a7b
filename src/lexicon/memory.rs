//! In-memory lexicon backend.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

use super::{Lexicon, PartOfSpeech, Sense};

/// A single sense entry in the in-memory lexicon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenseRecord {
    /// Part of speech of the sense.
    pub part_of_speech: PartOfSpeech,
    /// Synonyms (lemmas) of the sense.
    pub synonyms: Vec<String>,
    /// Sense names from the root hypernym down to this sense, inclusive.
    #[serde(default)]
    pub hypernym_path: Vec<String>,
}

/// Deterministic in-memory lexicon.
///
/// Sense entries are keyed by canonical name in a sorted map so lookups
/// that scan (label resolution) return candidates in a stable order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLexicon {
    senses: BTreeMap<String, SenseRecord>,
}

impl MemoryLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a noun sense with its synonyms and hypernym path.
    ///
    /// The hypernym path runs root-first and should end with the sense
    /// itself; for a root sense it is just the sense's own name.
    pub fn with_noun(
        mut self,
        name: impl Into<String>,
        synonyms: impl IntoIterator<Item = impl Into<String>>,
        hypernym_path: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.insert(
            name,
            SenseRecord {
                part_of_speech: PartOfSpeech::Noun,
                synonyms: synonyms.into_iter().map(Into::into).collect(),
                hypernym_path: hypernym_path.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Add a sense of any part of speech.
    pub fn with_sense(mut self, name: impl Into<String>, record: SenseRecord) -> Self {
        self.insert(name, record);
        self
    }

    /// Insert a sense entry, replacing any previous entry with that name.
    pub fn insert(&mut self, name: impl Into<String>, record: SenseRecord) {
        self.senses.insert(name.into(), record);
    }

    /// Number of sense entries.
    pub fn len(&self) -> usize {
        self.senses.len()
    }

    /// True when the lexicon holds no entries.
    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }

    /// Load a lexicon from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon: MemoryLexicon = serde_json::from_str(&content)?;

        tracing::info!(
            senses = lexicon.senses.len(),
            path = %path.display(),
            "loaded lexicon"
        );

        Ok(lexicon)
    }

    fn record(&self, sense: &Sense) -> Result<&SenseRecord> {
        self.senses
            .get(sense.as_str())
            .ok_or_else(|| LexiconError::UnknownSense(sense.as_str().to_string()).into())
    }
}

impl Lexicon for MemoryLexicon {
    fn sense_of(&self, name: &str) -> Result<Sense> {
        if self.senses.contains_key(name) {
            Ok(Sense::new(name))
        } else {
            Err(LexiconError::UnknownSense(name.to_string()).into())
        }
    }

    fn senses_of(&self, label: &str) -> Vec<Sense> {
        self.senses
            .iter()
            .filter(|(_, record)| record.synonyms.iter().any(|s| s == label))
            .map(|(name, _)| Sense::new(name.as_str()))
            .collect()
    }

    fn part_of_speech(&self, sense: &Sense) -> Result<PartOfSpeech> {
        Ok(self.record(sense)?.part_of_speech)
    }

    fn synonyms(&self, sense: &Sense) -> Result<Vec<String>> {
        Ok(self.record(sense)?.synonyms.clone())
    }

    fn hypernym_path(&self, sense: &Sense) -> Result<Vec<Sense>> {
        Ok(self
            .record(sense)?
            .hypernym_path
            .iter()
            .map(|name| Sense::new(name.as_str()))
            .collect())
    }
}
