use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::token::Token;

/// An ordered, deduplicated sequence of token indices forming an expanded
/// noun phrase or verb phrase. Indices are always sorted ascending by
/// sentence-local position; spans never cross sentence boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    indices: Vec<usize>,
}

impl Span {
    /// Build a span from arbitrary indices, sorting and deduplicating.
    pub fn from_indices(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    /// Build a span from an index set (already sorted and deduplicated).
    pub fn from_set(set: &BTreeSet<usize>) -> Self {
        Self {
            indices: set.iter().copied().collect(),
        }
    }

    /// First (lowest-index) token of the span.
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, i: usize) -> bool {
        self.indices.binary_search(&i).is_ok()
    }

    /// Render the span's surface text against its sentence's tokens.
    pub fn text(&self, tokens: &[Token]) -> String {
        self.indices
            .iter()
            .filter_map(|&i| tokens.get(i).map(|t| t.text.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A subject-verb-object triple reconstructed from one sentence's
/// dependency edges. Subject and object spans are non-empty by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvoTriple {
    pub subject: Span,
    pub verb: Span,
    pub object: Span,
}
