//! Seed-verb expansion and triple filtering.

use std::collections::BTreeSet;

use crate::lexicon::Lexicon;
use crate::types::token::Token;
use crate::types::SvoTriple;

/// Keeps only the triples whose verb span matches a relation's expanded
/// surface-form set.
///
/// The set starts from the relation's hard-coded seed list and is
/// enlarged through the lexical resource's verb-sense synonyms. When the
/// resource is unavailable the filter degrades to exact seed matching;
/// lexical lookup is best-effort enrichment, never a hard requirement.
#[derive(Debug, Clone)]
pub struct VerbFilter {
    forms: BTreeSet<String>,
}

impl VerbFilter {
    pub fn new(seeds: &[String], lexicon: Option<&dyn Lexicon>) -> Self {
        let mut forms: BTreeSet<String> = seeds.iter().cloned().collect();
        if let Some(lexicon) = lexicon {
            for seed in seeds {
                for synonym in lexicon.verb_synonyms(seed) {
                    forms.insert(synonym.replace('_', " "));
                }
            }
        }
        Self { forms }
    }

    /// The expanded surface-form set.
    pub fn forms(&self) -> &BTreeSet<String> {
        &self.forms
    }

    /// A triple matches iff any of its verb span's surface texts or lemma
    /// forms is in the expanded set.
    pub fn matches(&self, tokens: &[Token], triple: &SvoTriple) -> bool {
        triple.verb.iter().any(|i| {
            tokens
                .get(i)
                .is_some_and(|t| self.forms.contains(&t.text) || self.forms.contains(&t.lemma))
        })
    }

    pub fn filter(&self, tokens: &[Token], triples: &[SvoTriple]) -> Vec<SvoTriple> {
        triples
            .iter()
            .filter(|t| self.matches(tokens, t))
            .cloned()
            .collect()
    }
}
