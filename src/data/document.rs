use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::template::RelationTemplate;
use crate::types::token::{DepRel, Token};

/// Annotation layer names, used in sequencing-error messages and input JSON.
pub const LAYER_TOKENS: &str = "tokens";
pub const LAYER_LEMMAS: &str = "lemmas";
pub const LAYER_POS_TAGS: &str = "pos_tags";
pub const LAYER_TAGS: &str = "tags";
pub const LAYER_ENT_TYPES: &str = "ent_types";
pub const LAYER_NAMED_ENTITIES: &str = "named_entities";
pub const LAYER_DEPENDENCIES: &str = "dependencies";

/// A named-entity mention with its token offsets within the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    /// First token of the mention (inclusive).
    #[serde(default)]
    pub start: usize,
    /// One past the last token of the mention.
    #[serde(default)]
    pub end: usize,
}

/// One dependency edge: the token's relation label and its governing head
/// index. Every token has exactly one edge; roots point to themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepEdge {
    pub dep: String,
    pub head: usize,
}

/// A sentence plus its annotation layers, one optional field per
/// upstream annotation stage. Layers accumulate additively as the
/// external annotation pipeline runs; finalized extraction templates
/// live alongside them. Raw triples stay in the engine's per-sentence
/// working state and never land on the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    #[serde(default)]
    pub tokens: Option<Vec<String>>,
    #[serde(default)]
    pub lemmas: Option<Vec<String>>,
    #[serde(default)]
    pub pos_tags: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Per-token named-entity labels; empty string or "O" for none.
    #[serde(default)]
    pub ent_types: Option<Vec<String>>,
    /// Span-level entity mentions.
    #[serde(default)]
    pub named_entities: Option<Vec<Entity>>,
    #[serde(default)]
    pub dependencies: Option<Vec<DepEdge>>,
    /// Finalized templates per relation name.
    #[serde(skip)]
    pub templates: BTreeMap<String, Vec<RelationTemplate>>,
}

impl Sentence {
    /// Create a bare sentence with no annotation layers.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: None,
            lemmas: None,
            pos_tags: None,
            tags: None,
            ent_types: None,
            named_entities: None,
            dependencies: None,
            templates: BTreeMap::new(),
        }
    }

    /// Names of the annotation layers present on this sentence.
    pub fn layers(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.tokens.is_some() {
            present.push(LAYER_TOKENS);
        }
        if self.lemmas.is_some() {
            present.push(LAYER_LEMMAS);
        }
        if self.pos_tags.is_some() {
            present.push(LAYER_POS_TAGS);
        }
        if self.tags.is_some() {
            present.push(LAYER_TAGS);
        }
        if self.ent_types.is_some() {
            present.push(LAYER_ENT_TYPES);
        }
        if self.named_entities.is_some() {
            present.push(LAYER_NAMED_ENTITIES);
        }
        if self.dependencies.is_some() {
            present.push(LAYER_DEPENDENCIES);
        }
        present
    }

    /// Check that a named annotation layer is present, on behalf of `stage`.
    pub fn require_layer(&self, stage: &str, layer: &str) -> Result<()> {
        let present = match layer {
            LAYER_TOKENS => self.tokens.is_some(),
            LAYER_LEMMAS => self.lemmas.is_some(),
            LAYER_POS_TAGS => self.pos_tags.is_some(),
            LAYER_TAGS => self.tags.is_some(),
            LAYER_ENT_TYPES => self.ent_types.is_some(),
            LAYER_NAMED_ENTITIES => self.named_entities.is_some(),
            LAYER_DEPENDENCIES => self.dependencies.is_some(),
            _ => false,
        };
        if present {
            Ok(())
        } else {
            Err(Error::sequence(stage, layer))
        }
    }

    /// Assemble the per-token view from the parallel annotation layers.
    ///
    /// Fails with a sequencing error naming the first missing layer. Layer
    /// length mismatches are tolerated up to the shortest layer, with a
    /// warning.
    pub fn assemble_tokens(&self, stage: &str) -> Result<Vec<Token>> {
        let missing = |layer: &str| Error::sequence(stage, layer);
        let words = self.tokens.as_ref().ok_or_else(|| missing(LAYER_TOKENS))?;
        let lemmas = self.lemmas.as_ref().ok_or_else(|| missing(LAYER_LEMMAS))?;
        let pos_tags = self
            .pos_tags
            .as_ref()
            .ok_or_else(|| missing(LAYER_POS_TAGS))?;
        let tags = self.tags.as_ref().ok_or_else(|| missing(LAYER_TAGS))?;
        let ent_types = self
            .ent_types
            .as_ref()
            .ok_or_else(|| missing(LAYER_ENT_TYPES))?;
        let deps = self
            .dependencies
            .as_ref()
            .ok_or_else(|| missing(LAYER_DEPENDENCIES))?;

        let n = words
            .len()
            .min(lemmas.len())
            .min(pos_tags.len())
            .min(tags.len())
            .min(ent_types.len())
            .min(deps.len());
        if n < words.len() {
            log::warn!(
                "sentence {:?}: annotation layers disagree on length, truncating to {}",
                self.text,
                n
            );
        }

        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let ent = ent_types[i].trim();
            let head = if deps[i].head < n { deps[i].head } else { i };
            out.push(Token {
                i,
                text: words[i].clone(),
                lemma: lemmas[i].clone(),
                pos: pos_tags[i].clone(),
                tag: tags[i].clone(),
                ent_type: if ent.is_empty() || ent == "O" {
                    None
                } else {
                    Some(ent.to_string())
                },
                dep: DepRel::from_label(&deps[i].dep),
                head,
            });
        }
        Ok(out)
    }

    /// Finalized templates for one relation, if any were emitted.
    pub fn templates_for(&self, relation: &str) -> &[RelationTemplate] {
        self.templates.get(relation).map_or(&[], |v| v.as_slice())
    }
}

/// Document contents of one annotated text file: name, raw text, and the
/// ordered sentence annotations. Created by the ingestion parser, mutated
/// additively by extraction stages, consumed by the result writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    /// Set once every extraction stage has run over the document.
    #[serde(default)]
    pub processed: bool,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            paragraphs: Vec::new(),
            processed: false,
            sentences: Vec::new(),
        }
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_layer_missing() {
        let sent = Sentence::new("The boy killed the cat.");
        let err = sent.require_layer("svo", LAYER_DEPENDENCIES).unwrap_err();
        match err {
            Error::PipelineSequence { stage, layer } => {
                assert_eq!(stage, "svo");
                assert_eq!(layer, LAYER_DEPENDENCIES);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_layers_accumulate() {
        let mut sent = Sentence::new("Hello world.");
        assert!(sent.layers().is_empty());
        sent.tokens = Some(vec!["Hello".into(), "world".into(), ".".into()]);
        assert_eq!(sent.layers(), vec![LAYER_TOKENS]);
    }

    #[test]
    fn test_assemble_tokens_marks_entities() {
        let mut sent = Sentence::new("Apple grew.");
        sent.tokens = Some(vec!["Apple".into(), "grew".into(), ".".into()]);
        sent.lemmas = Some(vec!["Apple".into(), "grow".into(), ".".into()]);
        sent.pos_tags = Some(vec!["PROPN".into(), "VERB".into(), "PUNCT".into()]);
        sent.tags = Some(vec!["NNP".into(), "VBD".into(), ".".into()]);
        sent.ent_types = Some(vec!["ORG".into(), "O".into(), "".into()]);
        sent.dependencies = Some(vec![
            DepEdge { dep: "nsubj".into(), head: 1 },
            DepEdge { dep: "ROOT".into(), head: 1 },
            DepEdge { dep: "punct".into(), head: 1 },
        ]);
        let tokens = sent.assemble_tokens("test").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].ent_type.as_deref(), Some("ORG"));
        assert_eq!(tokens[1].ent_type, None);
        assert!(tokens[1].is_verb());
        assert_eq!(tokens[1].head, 1);
    }
}
