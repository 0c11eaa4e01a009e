use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::data::document::Document;
use crate::error::{Error, Result};

/// Parser for annotated documents stored as JSON or gzipped JSON.
///
/// The annotation pipeline itself (segmentation, tagging, NER, parsing)
/// runs externally; this parser only ingests its output. Missing
/// annotation layers are not rejected here — they surface as sequencing
/// errors when the extraction engine runs.
pub struct DocumentParser;

impl DocumentParser {
    /// Load a single document, or every `.json`/`.json.gz` document in a
    /// directory, in file-name order.
    pub fn load_path(path: &Path) -> Result<Vec<Document>> {
        if path.is_dir() {
            let mut files: Vec<_> = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| Self::is_document_file(p))
                .collect();
            files.sort();
            if files.is_empty() {
                return Err(Error::invalid_input(format!(
                    "no .json or .json.gz documents in {}",
                    path.display()
                )));
            }
            files.iter().map(|p| Self::load_file(p)).collect()
        } else if path.is_file() {
            Ok(vec![Self::load_file(path)?])
        } else {
            Err(Error::invalid_input(format!(
                "{} is not a valid file or directory path",
                path.display()
            )))
        }
    }

    /// Load one annotated document, transparently decompressing `.gz` input.
    pub fn load_file(path: &Path) -> Result<Document> {
        log::debug!("loading document from {}", path.display());
        let file = File::open(path)?;
        let mut contents = String::new();
        if path.extension().is_some_and(|ext| ext == "gz") {
            let mut decoder = GzDecoder::new(BufReader::new(file));
            decoder.read_to_string(&mut contents)?;
        } else {
            BufReader::new(file).read_to_string(&mut contents)?;
        }
        let doc = Self::parse_str(&contents)?;
        Self::validate_document(&doc)?;
        Ok(doc)
    }

    /// Parse a document from an in-memory JSON string.
    pub fn parse_str(contents: &str) -> Result<Document> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Validate structural invariants the extractor relies on: dependency
    /// head indices must stay within their sentence. Layer length
    /// mismatches are tolerated (the token assembler truncates with a
    /// warning), out-of-bounds edges are not.
    pub fn validate_document(doc: &Document) -> Result<()> {
        for (idx, sentence) in doc.sentences.iter().enumerate() {
            let Some(deps) = &sentence.dependencies else {
                continue;
            };
            let n = deps.len();
            for (i, edge) in deps.iter().enumerate() {
                if edge.head >= n {
                    return Err(Error::invalid_input(format!(
                        "document '{}' sentence {}: token {} has head {} out of bounds ({} tokens)",
                        doc.name, idx, i, edge.head, n
                    )));
                }
            }
            if let Some(tokens) = &sentence.tokens {
                if tokens.len() != n {
                    log::warn!(
                        "document '{}' sentence {}: {} tokens but {} dependency edges",
                        doc.name,
                        idx,
                        tokens.len(),
                        n
                    );
                }
            }
        }
        Ok(())
    }

    fn is_document_file(path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        name.ends_with(".json") || name.ends_with(".json.gz")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "sample.txt",
        "text": "Apple grew.",
        "sentences": [
            {
                "text": "Apple grew.",
                "tokens": ["Apple", "grew", "."],
                "lemmas": ["Apple", "grow", "."],
                "pos_tags": ["PROPN", "VERB", "PUNCT"],
                "tags": ["NNP", "VBD", "."],
                "ent_types": ["ORG", "O", "O"],
                "named_entities": [
                    {"text": "Apple", "label": "ORG", "start": 0, "end": 1}
                ],
                "dependencies": [
                    {"dep": "nsubj", "head": 1},
                    {"dep": "ROOT", "head": 1},
                    {"dep": "punct", "head": 1}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_annotated_document() {
        let doc = DocumentParser::parse_str(SAMPLE).unwrap();
        assert_eq!(doc.name, "sample.txt");
        assert_eq!(doc.sentence_count(), 1);
        assert!(!doc.processed);
        let sent = &doc.sentences[0];
        assert_eq!(sent.tokens.as_ref().unwrap().len(), 3);
        assert_eq!(sent.named_entities.as_ref().unwrap()[0].label, "ORG");
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_head() {
        let mut doc = DocumentParser::parse_str(SAMPLE).unwrap();
        doc.sentences[0].dependencies.as_mut().unwrap()[0].head = 9;
        let err = DocumentParser::validate_document(&doc).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_gzipped_document_loads() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let path = std::env::temp_dir().join(format!("templie-parser-{}.json.gz", std::process::id()));
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let doc = DocumentParser::load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(doc.name, "sample.txt");
        assert_eq!(doc.sentence_count(), 1);
    }

    #[test]
    fn test_missing_layers_parse_cleanly() {
        let doc =
            DocumentParser::parse_str(r#"{"name": "x", "sentences": [{"text": "Hi."}]}"#).unwrap();
        assert!(doc.sentences[0].tokens.is_none());
        assert!(doc.sentences[0].dependencies.is_none());
    }
}
