//! templie: rule-based relation template extraction.
//!
//! Extracts typed relation templates (BORN, ACQUIRE, PART-OF) from
//! documents annotated by an external linguistic pipeline. The core is a
//! deterministic rule engine over dependency parses: an SVO triple
//! builder, a lexicon-expanded verb filter, a template post-processor
//! with date normalization, and an independent part-whole extractor.

pub mod data;
pub mod digraph;
pub mod engine;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod postprocess;
pub mod results;
pub mod types;

pub use data::{DepEdge, Document, DocumentParser, Entity, Sentence};
pub use digraph::DepGraph;
pub use engine::{ExtractionConfig, ExtractionEngine, RelationSpec, PART_RELATION};
pub use error::{Error, Result};
pub use lexicon::{FileLexicon, Lexicon};
pub use results::DocumentResult;
pub use types::{PartTuple, RelationTemplate, Slot, Span, SvoTriple, Token};
