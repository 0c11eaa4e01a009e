//! Extraction engine.
//!
//! - `config`: relation configuration (seed verbs, entity-type slots)
//! - `stages`: the `Stage` trait and the concrete extraction stages
//! - `core`: the `ExtractionEngine` driving stages over documents

pub mod config;
pub mod core;
pub mod stages;

pub use config::{ExtractionConfig, PartWholeSpec, RelationSpec, PART_RELATION};
pub use core::ExtractionEngine;
pub use stages::{PartWholeStage, RelationStage, SentenceContext, Stage};
