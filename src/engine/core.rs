//! The extraction engine: ordered stages applied per sentence.

use std::sync::Arc;

use crate::data::document::Document;
use crate::engine::config::ExtractionConfig;
use crate::engine::stages::{PartWholeStage, RelationStage, SentenceContext, Stage};
use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use crate::types::token::Token;

/// Minimum noun-like tokens for a sentence to be worth extracting from;
/// a relation needs a second participant.
const MIN_NOUN_LIKE: usize = 2;

/// Rule-based relation extraction over annotated documents.
///
/// Constructed once per process from a validated configuration and an
/// optional lexical resource; stateless across documents, safe to share
/// between threads. The ordered stage list is fixed at construction: one
/// stage per configured verb relation, then part-whole extraction.
pub struct ExtractionEngine {
    config: ExtractionConfig,
    stages: Vec<Box<dyn Stage>>,
}

impl ExtractionEngine {
    pub fn new(config: ExtractionConfig, lexicon: Option<Arc<dyn Lexicon>>) -> Result<Self> {
        config.validate()?;
        let mut stages: Vec<Box<dyn Stage>> = Vec::new();
        for spec in &config.relations {
            stages.push(Box::new(RelationStage::new(
                spec.clone(),
                lexicon.as_deref(),
            )));
        }
        stages.push(Box::new(PartWholeStage::new(
            config.part_whole.clone(),
            lexicon,
        )));
        Ok(Self { config, stages })
    }

    /// Engine with the compiled-in default configuration and no lexicon.
    pub fn with_defaults() -> Self {
        Self::new(ExtractionConfig::default(), None).expect("default config is valid")
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Run every extraction stage over every sentence of the document.
    ///
    /// The sequencing contract is checked up front: if any sentence lacks
    /// an annotation layer a stage needs, the whole document fails with a
    /// `PipelineSequence` error and no partial extraction is kept.
    /// Sentence-level extraction misses are silent.
    pub fn process_document(&self, doc: &mut Document) -> Result<()> {
        if doc.processed {
            return Err(Error::invalid_input(format!(
                "document '{}' has already been processed",
                doc.name
            )));
        }
        for sentence in &doc.sentences {
            for stage in &self.stages {
                for layer in stage.required_layers() {
                    sentence.require_layer(stage.name(), layer)?;
                }
            }
        }

        let mut skipped = 0usize;
        for sentence in &mut doc.sentences {
            // Tokens, graph and raw triples are built once per sentence
            // and shared by every relation stage.
            let ctx = SentenceContext::build(sentence, "svo")?;
            if !is_extraction_worthy(&ctx.tokens) {
                skipped += 1;
                continue;
            }
            for stage in &self.stages {
                stage.apply(sentence, &ctx)?;
            }
        }
        if skipped > 0 {
            log::debug!(
                "document '{}': skipped {}/{} incomplete sentences",
                doc.name,
                skipped,
                doc.sentences.len()
            );
        }
        doc.processed = true;
        Ok(())
    }

    /// Process a batch of documents, skipping (and logging) individual
    /// failures. Returns the number of successfully processed documents.
    /// An empty batch is rejected as invalid input.
    pub fn process_batch(&self, docs: &mut [Document]) -> Result<usize> {
        if docs.is_empty() {
            return Err(Error::invalid_input("empty document batch"));
        }
        let mut processed = 0usize;
        for doc in docs.iter_mut() {
            match self.process_document(doc) {
                Ok(()) => processed += 1,
                Err(err) => log::error!("document '{}' failed: {}", doc.name, err),
            }
        }
        Ok(processed)
    }
}

/// A sentence with fewer than two noun-like tokens cannot relate two
/// participants; it is filtered before any extraction runs.
fn is_extraction_worthy(tokens: &[Token]) -> bool {
    tokens.iter().filter(|t| t.is_noun_like()).count() >= MIN_NOUN_LIKE
}
