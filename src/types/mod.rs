pub mod span;
pub mod template;
pub mod token;

pub use span::{Span, SvoTriple};
pub use template::{PartTuple, RelationTemplate, Slot, UNSET_PLACEHOLDER};
pub use token::{DepRel, Token, POS_VERB, TAG_PREPOSITION};
