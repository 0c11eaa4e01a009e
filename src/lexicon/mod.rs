//! Lexical resource lookup: synonym, holonym, meronym and verb-sense
//! expansion.
//!
//! The resource is loaded once at startup and passed by reference into
//! the extractor components; there is no process-wide singleton. Lookups
//! are best-effort enrichment: every consumer must behave sensibly when
//! the resource is absent or a word is unknown.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Read-only lexical resource. Multi-word terms use spaces; callers that
/// carry an internal underscore separator normalize before lookup.
/// Implementations must be safe for concurrent reads.
pub trait Lexicon: Send + Sync {
    /// Synonym lemma forms across all senses of `word`.
    fn synonyms(&self, word: &str) -> BTreeSet<String>;

    /// "Whole-of" terms: part-holonyms across all senses of `word`.
    fn holonyms(&self, word: &str) -> BTreeSet<String>;

    /// "Part-of" terms: part-meronyms across all senses of `word`.
    fn meronyms(&self, word: &str) -> BTreeSet<String>;

    /// Synonym lemma forms across the verb senses of `verb`.
    fn verb_synonyms(&self, verb: &str) -> BTreeSet<String>;
}

/// Lexicon backed by a JSON file of pre-exported lookup tables, one map
/// per relation kind:
///
/// ```json
/// {
///   "synonyms":      {"Google": ["Google", "Alphabet subsidiary"]},
///   "holonyms":      {"Google": ["Alphabet"]},
///   "meronyms":      {},
///   "verb_synonyms": {"born": ["bear", "give_birth"]}
/// }
/// ```
///
/// Underscores in keys and values are normalized to spaces on load.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileLexicon {
    #[serde(default)]
    pub synonyms: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub holonyms: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub meronyms: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub verb_synonyms: BTreeMap<String, BTreeSet<String>>,
}

fn despace(term: &str) -> String {
    term.replace('_', " ")
}

fn normalize_table(
    table: BTreeMap<String, BTreeSet<String>>,
) -> BTreeMap<String, BTreeSet<String>> {
    table
        .into_iter()
        .map(|(key, values)| {
            let values = values.iter().map(|v| despace(v)).collect();
            (despace(&key), values)
        })
        .collect()
}

fn lookup(table: &BTreeMap<String, BTreeSet<String>>, word: &str) -> BTreeSet<String> {
    table.get(&despace(word)).cloned().unwrap_or_default()
}

impl FileLexicon {
    /// Load and normalize the lookup tables from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let raw: FileLexicon = serde_json::from_str(&contents)?;
        log::info!(
            "loaded lexicon from {}: {} synonym, {} holonym, {} meronym, {} verb entries",
            path.display(),
            raw.synonyms.len(),
            raw.holonyms.len(),
            raw.meronyms.len(),
            raw.verb_synonyms.len()
        );
        Ok(Self {
            synonyms: normalize_table(raw.synonyms),
            holonyms: normalize_table(raw.holonyms),
            meronyms: normalize_table(raw.meronyms),
            verb_synonyms: normalize_table(raw.verb_synonyms),
        })
    }
}

impl Lexicon for FileLexicon {
    fn synonyms(&self, word: &str) -> BTreeSet<String> {
        lookup(&self.synonyms, word)
    }

    fn holonyms(&self, word: &str) -> BTreeSet<String> {
        lookup(&self.holonyms, word)
    }

    fn meronyms(&self, word: &str) -> BTreeSet<String> {
        lookup(&self.meronyms, word)
    }

    fn verb_synonyms(&self, verb: &str) -> BTreeSet<String> {
        lookup(&self.verb_synonyms, verb)
    }
}
