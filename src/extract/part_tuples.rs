//! Part-whole tuple extraction, independent of the SVO pipeline.

use std::collections::BTreeSet;

use crate::data::document::Entity;
use crate::lexicon::Lexicon;
use crate::types::PartTuple;

/// Extracts (part, whole) pairs from a sentence's named entities through
/// synonym/holonym/meronym lookup.
///
/// Candidate buckets are location-like and organization-like mentions;
/// the location bucket wins when both have enough members. Multi-word
/// mentions are joined with an underscore to form single lookup tokens.
pub struct PartTupleExtractor<'a> {
    lexicon: Option<&'a dyn Lexicon>,
    location_labels: &'a [String],
    organization_labels: &'a [String],
}

impl<'a> PartTupleExtractor<'a> {
    pub fn new(
        lexicon: Option<&'a dyn Lexicon>,
        location_labels: &'a [String],
        organization_labels: &'a [String],
    ) -> Self {
        Self {
            lexicon,
            location_labels,
            organization_labels,
        }
    }

    /// Extract part-whole pairs from one sentence's entity mentions.
    ///
    /// A part-whole relation needs at least two related entities in one
    /// sentence; anything less yields nothing, silently.
    pub fn extract(&self, entities: &[Entity]) -> Vec<PartTuple> {
        let loc_candidates = self.bucket(entities, self.location_labels);
        let org_candidates = self.bucket(entities, self.organization_labels);

        if loc_candidates.len() >= 2 {
            self.retrieve(&loc_candidates)
        } else if org_candidates.len() >= 2 {
            self.retrieve(&org_candidates)
        } else {
            Vec::new()
        }
    }

    /// Candidate mention texts carrying one of the accepted labels, in
    /// first-mention order, deduplicated.
    fn bucket(&self, entities: &[Entity], labels: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for entity in entities {
            if labels.iter().any(|l| *l == entity.label) && !out.contains(&entity.text) {
                out.push(entity.text.clone());
            }
        }
        out
    }

    fn retrieve(&self, candidates: &[String]) -> Vec<PartTuple> {
        let Some(lexicon) = self.lexicon else {
            return Vec::new();
        };

        // Synonyms of every candidate, then the union of part-holonyms
        // and part-meronyms over the whole synonym set.
        let mut synonyms: BTreeSet<String> = BTreeSet::new();
        for candidate in candidates {
            synonyms.extend(lexicon.synonyms(&lookup_key(candidate)));
        }
        let mut holonyms: BTreeSet<String> = BTreeSet::new();
        let mut meronyms: BTreeSet<String> = BTreeSet::new();
        for synonym in &synonyms {
            holonyms.extend(lexicon.holonyms(synonym));
            meronyms.extend(lexicon.meronyms(synonym));
        }

        // Intersect back against the original candidates, keeping
        // first-mention order for determinism.
        let parts: Vec<&String> = candidates.iter().filter(|c| meronyms.contains(*c)).collect();
        let wholes: Vec<&String> = candidates.iter().filter(|c| holonyms.contains(*c)).collect();

        // Positional alignment, truncating to the shorter list. This is a
        // heuristic, not a semantic match; which part pairs with which
        // whole is unspecified when the lists differ.
        parts
            .iter()
            .zip(wholes.iter())
            .map(|(part, whole)| PartTuple {
                part: (*part).clone(),
                whole: (*whole).clone(),
            })
            .collect()
    }
}

/// Single lookup token for a (possibly multi-word) entity mention.
fn lookup_key(mention: &str) -> String {
    mention.replace(' ', "_")
}
