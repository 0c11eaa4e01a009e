use serde::{Deserialize, Serialize};

/// Coarse POS tag identifying verbs in the universal tagset.
pub const POS_VERB: &str = "VERB";

/// Coarse POS tags counted as noun-like by the sentence-completeness gate.
pub const NOUN_LIKE_POS: [&str; 2] = ["NOUN", "PROPN"];

/// Fine-grained tag for prepositions, used by the entity-based BORN rules.
pub const TAG_PREPOSITION: &str = "IN";

/// Dependency relation labels the extractor consumes.
///
/// The label vocabulary is closed; anything outside it maps to [`DepRel::Other`]
/// and is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepRel {
    /// Nominal subject of an active verb.
    Nsubj,
    /// Nominal subject of a passive verb.
    NsubjPass,
    /// Clausal subject of an active verb.
    Csubj,
    /// Clausal subject of a passive verb.
    CsubjPass,
    /// Direct object.
    Dobj,
    /// Prepositional object.
    Pobj,
    /// Agent of a passive verb ("founded *by* X").
    Agent,
    /// Open clausal complement.
    Xcomp,
    /// Auxiliary.
    Aux,
    /// Passive auxiliary.
    AuxPass,
    /// Negation modifier.
    Neg,
    /// Conjunct coordinated via "and"/"or".
    Conj,
    /// Compound noun modifier.
    Compound,
    /// Prepositional modifier.
    Prep,
    /// Sentence root.
    Root,
    /// Any label the extractor does not act on.
    Other,
}

impl DepRel {
    /// Map a surface dependency label to the closed vocabulary.
    pub fn from_label(label: &str) -> Self {
        match label {
            "nsubj" => DepRel::Nsubj,
            "nsubjpass" => DepRel::NsubjPass,
            "csubj" => DepRel::Csubj,
            "csubjpass" => DepRel::CsubjPass,
            "dobj" => DepRel::Dobj,
            "pobj" => DepRel::Pobj,
            "agent" => DepRel::Agent,
            "xcomp" => DepRel::Xcomp,
            "aux" => DepRel::Aux,
            "auxpass" => DepRel::AuxPass,
            "neg" => DepRel::Neg,
            "conj" => DepRel::Conj,
            "compound" => DepRel::Compound,
            "prep" => DepRel::Prep,
            "ROOT" | "root" => DepRel::Root,
            _ => DepRel::Other,
        }
    }

    /// Nominal subject of an active or passive verb.
    pub fn is_nominal_subject(self) -> bool {
        matches!(self, DepRel::Nsubj | DepRel::NsubjPass)
    }

    /// Clausal subject of an active or passive verb.
    pub fn is_clausal_subject(self) -> bool {
        matches!(self, DepRel::Csubj | DepRel::CsubjPass)
    }

    /// Auxiliary/negation modifiers pulled into expanded verb spans.
    pub fn is_verb_modifier(self) -> bool {
        matches!(self, DepRel::Aux | DepRel::AuxPass | DepRel::Neg)
    }
}

/// One token of an annotated sentence, assembled from the sentence's
/// parallel annotation layers. Tokens never outlive their sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Sentence-local index; the sole ordering key for spans.
    pub i: usize,
    /// Surface text.
    pub text: String,
    /// Lemma form.
    pub lemma: String,
    /// Coarse POS tag (universal tagset).
    pub pos: String,
    /// Fine-grained tag (Penn Treebank style).
    pub tag: String,
    /// Named-entity label, if the token is inside an entity mention.
    pub ent_type: Option<String>,
    /// Dependency relation to the governing head.
    #[serde(skip, default = "default_dep")]
    pub dep: DepRel,
    /// Index of the governing head token; equals `i` for roots.
    pub head: usize,
}

fn default_dep() -> DepRel {
    DepRel::Other
}

impl Token {
    pub fn is_verb(&self) -> bool {
        self.pos == POS_VERB
    }

    pub fn is_noun_like(&self) -> bool {
        NOUN_LIKE_POS.contains(&self.pos.as_str())
    }

    /// Entity label check against an accepted set of labels.
    pub fn has_entity_in(&self, accepted: &[String]) -> bool {
        match &self.ent_type {
            Some(label) => accepted.iter().any(|a| a == label),
            None => false,
        }
    }
}
