pub mod entity_rules;
pub mod part_tuples;
pub mod svo;
pub mod verb_filter;

pub use entity_rules::{born_mentions, EntityMention};
pub use part_tuples::PartTupleExtractor;
pub use svo::{expand_noun, expand_verb, svo_triples};
pub use verb_filter::VerbFilter;
