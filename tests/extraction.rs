//! End-to-end extraction over an in-memory annotated document.

use std::sync::Arc;

use templie::{
    DocumentParser, DocumentResult, ExtractionConfig, ExtractionEngine, FileLexicon, Lexicon,
};

const ANNOTATED_DOC: &str = r#"{
    "name": "companies.txt",
    "text": "Apple was founded in 1976 in California. Google acquired YouTube and sold Feedburner.",
    "sentences": [
        {
            "text": "Apple was founded in 1976 in California.",
            "tokens": ["Apple", "was", "founded", "in", "1976", "in", "California", "."],
            "lemmas": ["Apple", "be", "found", "in", "1976", "in", "California", "."],
            "pos_tags": ["PROPN", "AUX", "VERB", "ADP", "NUM", "ADP", "PROPN", "PUNCT"],
            "tags": ["NNP", "VBD", "VBN", "IN", "CD", "IN", "NNP", "."],
            "ent_types": ["ORG", "O", "O", "O", "DATE", "O", "GPE", "O"],
            "named_entities": [
                {"text": "Apple", "label": "ORG", "start": 0, "end": 1},
                {"text": "1976", "label": "DATE", "start": 4, "end": 5},
                {"text": "California", "label": "GPE", "start": 6, "end": 7}
            ],
            "dependencies": [
                {"dep": "nsubjpass", "head": 2},
                {"dep": "auxpass", "head": 2},
                {"dep": "ROOT", "head": 2},
                {"dep": "prep", "head": 2},
                {"dep": "pobj", "head": 3},
                {"dep": "prep", "head": 2},
                {"dep": "pobj", "head": 5},
                {"dep": "punct", "head": 2}
            ]
        },
        {
            "text": "Google acquired YouTube and sold Feedburner.",
            "tokens": ["Google", "acquired", "YouTube", "and", "sold", "Feedburner", "."],
            "lemmas": ["Google", "acquire", "YouTube", "and", "sell", "Feedburner", "."],
            "pos_tags": ["PROPN", "VERB", "PROPN", "CCONJ", "VERB", "PROPN", "PUNCT"],
            "tags": ["NNP", "VBD", "NNP", "CC", "VBD", "NNP", "."],
            "ent_types": ["ORG", "O", "ORG", "O", "O", "ORG", "O"],
            "named_entities": [
                {"text": "Google", "label": "ORG", "start": 0, "end": 1},
                {"text": "YouTube", "label": "ORG", "start": 2, "end": 3},
                {"text": "Feedburner", "label": "ORG", "start": 5, "end": 6}
            ],
            "dependencies": [
                {"dep": "nsubj", "head": 1},
                {"dep": "ROOT", "head": 1},
                {"dep": "dobj", "head": 1},
                {"dep": "cc", "head": 1},
                {"dep": "conj", "head": 1},
                {"dep": "dobj", "head": 4},
                {"dep": "punct", "head": 1}
            ]
        },
        {
            "text": "The cat sat.",
            "tokens": ["The", "cat", "sat", "."],
            "lemmas": ["the", "cat", "sit", "."],
            "pos_tags": ["DET", "NOUN", "VERB", "PUNCT"],
            "tags": ["DT", "NN", "VBD", "."],
            "ent_types": ["O", "O", "O", "O"],
            "named_entities": [],
            "dependencies": [
                {"dep": "det", "head": 1},
                {"dep": "nsubj", "head": 2},
                {"dep": "ROOT", "head": 2},
                {"dep": "punct", "head": 2}
            ]
        }
    ]
}"#;

fn corporate_lexicon() -> Arc<dyn Lexicon> {
    let mut lex = FileLexicon::default();
    lex.synonyms
        .insert("Google".into(), ["Google".to_string()].into());
    lex.synonyms
        .insert("YouTube".into(), ["YouTube".to_string()].into());
    lex.synonyms
        .insert("Feedburner".into(), ["Feedburner".to_string()].into());
    lex.meronyms
        .insert("Google".into(), ["YouTube".to_string()].into());
    lex.holonyms
        .insert("YouTube".into(), ["Google".to_string()].into());
    Arc::new(lex)
}

#[test]
fn test_full_document_extraction() {
    let mut doc = DocumentParser::parse_str(ANNOTATED_DOC).unwrap();
    let config = ExtractionConfig::default();
    let order = config.relation_order();
    let engine = ExtractionEngine::new(config, Some(corporate_lexicon())).unwrap();

    engine.process_document(&mut doc).unwrap();
    assert!(doc.processed);

    // Sentence 1: passive founding caught by the entity-based BORN rules,
    // with the date normalized from the raw sentence text.
    let born = doc.sentences[0].templates_for("born");
    assert_eq!(born.len(), 1);
    assert_eq!(
        born[0].argument_strings(),
        vec!["Apple", "1976", "California"]
    );

    // Sentence 2: subject propagates across the verb conjunction, but
    // only the "acquired" triple survives the ACQUIRE verb filter.
    let acquire = doc.sentences[1].templates_for("acquire");
    assert_eq!(acquire.len(), 1);
    assert_eq!(
        acquire[0].argument_strings(),
        vec!["Google", "YouTube", "<none>"]
    );

    // Sentence 2 also carries a part-whole pair from the lexicon.
    let part = doc.sentences[1].templates_for("part");
    assert_eq!(part.len(), 1);
    assert_eq!(part[0].argument_strings(), vec!["YouTube", "Google"]);

    // Sentence 3 has one noun and is gated before extraction.
    assert!(doc.sentences[2].templates.is_empty());

    // Output shape: relations in configuration order, instances flattened.
    let result = DocumentResult::from_document(&doc, &order);
    assert_eq!(result.document, "companies.txt");
    let names: Vec<&str> = result
        .extraction
        .iter()
        .map(|r| r.template.as_str())
        .collect();
    assert_eq!(names, vec!["BORN", "ACQUIRE", "PART"]);
    assert_eq!(result.template_count(), 3);

    let json = result.to_json(true).unwrap();
    assert!(json.contains("California"));
    assert!(json.contains("<none>"));
}

#[test]
fn test_document_without_dependencies_fails_entirely() {
    let mut doc = DocumentParser::parse_str(
        r#"{
            "name": "broken.txt",
            "sentences": [
                {
                    "text": "Apple was founded in 1976.",
                    "tokens": ["Apple", "was", "founded", "in", "1976", "."],
                    "lemmas": ["Apple", "be", "found", "in", "1976", "."],
                    "pos_tags": ["PROPN", "AUX", "VERB", "ADP", "NUM", "PUNCT"],
                    "tags": ["NNP", "VBD", "VBN", "IN", "CD", "."],
                    "ent_types": ["ORG", "O", "O", "O", "DATE", "O"],
                    "named_entities": []
                }
            ]
        }"#,
    )
    .unwrap();
    let engine = ExtractionEngine::with_defaults();
    let err = engine.process_document(&mut doc).unwrap_err();
    assert!(err.to_string().contains("dependencies"));
    assert!(!doc.processed);
    // No partial extraction survives the failure.
    assert!(doc.sentences[0].templates.is_empty());
}
