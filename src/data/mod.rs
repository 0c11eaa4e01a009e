pub mod document;
pub mod parser;

pub use document::{DepEdge, Document, Entity, Sentence};
pub use parser::DocumentParser;
