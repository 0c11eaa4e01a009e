pub mod extraction_results;

pub use extraction_results::{DocumentResult, RelationResult, TemplateInstance};
