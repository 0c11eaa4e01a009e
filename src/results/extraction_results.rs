use serde::Serialize;

use crate::data::document::Document;
use crate::error::Result;

/// One emitted template paired with the sentence it came from.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInstance {
    pub sentence: String,
    pub arguments: Vec<String>,
}

/// All instances of one relation across a document, in sentence order.
#[derive(Debug, Clone, Serialize)]
pub struct RelationResult {
    pub template: String,
    pub instances: Vec<TemplateInstance>,
}

/// Extraction output for one document, relations in configuration order.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    pub document: String,
    pub extraction: Vec<RelationResult>,
}

impl DocumentResult {
    /// Collect a processed document's templates into the output shape.
    /// Relations with no hits still appear, with empty instance lists,
    /// so the output shape is stable across documents.
    pub fn from_document(doc: &Document, relation_order: &[String]) -> Self {
        let extraction = relation_order
            .iter()
            .map(|relation| {
                let mut instances = Vec::new();
                for sentence in &doc.sentences {
                    for template in sentence.templates_for(relation) {
                        instances.push(TemplateInstance {
                            sentence: sentence.text.clone(),
                            arguments: template.argument_strings(),
                        });
                    }
                }
                RelationResult {
                    template: relation.to_uppercase(),
                    instances,
                }
            })
            .collect();
        Self {
            document: doc.name.clone(),
            extraction,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Total number of emitted templates across all relations.
    pub fn template_count(&self) -> usize {
        self.extraction.iter().map(|r| r.instances.len()).sum()
    }
}
