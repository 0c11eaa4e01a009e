//! Entity-based extraction rules for the BORN relation.
//!
//! Passive sentences like "Apple was founded in 1976 in California" carry
//! no dependency path from the verb to an object, so the SVO route never
//! sees them. These rules work directly from the sentence root and the
//! entity mentions instead: a root containing a birth/founding verb plus
//! DATE/GPE mentions governed by a preposition.

use crate::data::document::Entity;
use crate::digraph::DepGraph;
use crate::types::token::{DepRel, Token, TAG_PREPOSITION};

const ORG_LABEL: &str = "ORG";
const DATE_LABEL: &str = "DATE";
const PLACE_LABEL: &str = "GPE";

/// A raw (subject, date, place) mention before template assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMention {
    pub arg1: String,
    pub date: Option<String>,
    pub place: Option<String>,
}

/// Run all entity-based BORN rules over one sentence.
pub fn born_mentions(
    text: &str,
    tokens: &[Token],
    graph: &DepGraph,
    entities: &[Entity],
) -> Vec<EntityMention> {
    let mut mentions = Vec::new();
    if let Some(m) = born_passive(tokens, graph, entities) {
        mentions.push(m);
    }
    if let Some(m) = founded_active(tokens, graph, entities)
        .or_else(|| founded_passive(text, tokens, graph, entities))
    {
        mentions.push(m);
    }
    mentions
}

/// "X was born in DATE in PLACE": root contains "born", passive subject.
fn born_passive(tokens: &[Token], graph: &DepGraph, entities: &[Entity]) -> Option<EntityMention> {
    let root = graph.root()?;
    if !tokens[root].text.contains("born") {
        return None;
    }
    let subject = graph.children_with(root, DepRel::NsubjPass).next()?;
    Some(EntityMention {
        arg1: tokens[subject].text.clone(),
        date: prepositional_entity(tokens, graph, entities, DATE_LABEL),
        place: prepositional_entity(tokens, graph, entities, PLACE_LABEL),
    })
}

/// "Y founded X in DATE": root contains "founded", direct object present.
fn founded_active(
    tokens: &[Token],
    graph: &DepGraph,
    entities: &[Entity],
) -> Option<EntityMention> {
    let root = graph.root()?;
    if !tokens[root].text.contains("founded") {
        return None;
    }
    let object = graph.children_with(root, DepRel::Dobj).next()?;
    Some(EntityMention {
        arg1: tokens[object].text.clone(),
        date: prepositional_entity(tokens, graph, entities, DATE_LABEL),
        place: prepositional_entity(tokens, graph, entities, PLACE_LABEL),
    })
}

/// "X was founded/established in DATE": no object, so the organization
/// comes from the entity layer; a date is required to anchor the rule.
fn founded_passive(
    text: &str,
    tokens: &[Token],
    graph: &DepGraph,
    entities: &[Entity],
) -> Option<EntityMention> {
    let lowered = text.to_lowercase();
    if !lowered.contains("founded") && !lowered.contains("established") {
        return None;
    }
    let org = entities.iter().find(|e| e.label == ORG_LABEL)?;
    let date = prepositional_entity(tokens, graph, entities, DATE_LABEL)?;
    Some(EntityMention {
        arg1: org.text.clone(),
        date: Some(date),
        place: prepositional_entity(tokens, graph, entities, PLACE_LABEL),
    })
}

/// First entity with the given label whose span root is governed by a
/// preposition ("in 1976", "at California").
fn prepositional_entity(
    tokens: &[Token],
    graph: &DepGraph,
    entities: &[Entity],
    label: &str,
) -> Option<String> {
    entities
        .iter()
        .filter(|e| e.label == label)
        .find(|e| {
            entity_root(graph, e).is_some_and(|root| {
                let head = graph.head(root);
                tokens.get(head).is_some_and(|t| t.tag == TAG_PREPOSITION)
            })
        })
        .map(|e| e.text.clone())
}

/// Syntactic head of an entity mention: the token inside the span whose
/// governor lies outside it. Falls back to the last span token.
fn entity_root(graph: &DepGraph, entity: &Entity) -> Option<usize> {
    let span = entity.start..entity.end;
    if span.is_empty() || entity.end > graph.node_count() {
        return None;
    }
    span.clone()
        .find(|&i| {
            let head = graph.head(i);
            head == i || !span.contains(&head)
        })
        .or(Some(entity.end - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(i: usize, text: &str, pos: &str, tag: &str, dep: &str, head: usize) -> Token {
        Token {
            i,
            text: text.into(),
            lemma: text.to_lowercase(),
            pos: pos.into(),
            tag: tag.into(),
            ent_type: None,
            dep: DepRel::from_label(dep),
            head,
        }
    }

    // "Apple was founded in 1976 in California ."
    fn founded_sentence() -> Vec<Token> {
        vec![
            token(0, "Apple", "PROPN", "NNP", "nsubjpass", 2),
            token(1, "was", "AUX", "VBD", "auxpass", 2),
            token(2, "founded", "VERB", "VBN", "ROOT", 2),
            token(3, "in", "ADP", "IN", "prep", 2),
            token(4, "1976", "NUM", "CD", "pobj", 3),
            token(5, "in", "ADP", "IN", "prep", 2),
            token(6, "California", "PROPN", "NNP", "pobj", 5),
            token(7, ".", "PUNCT", ".", "punct", 2),
        ]
    }

    fn founded_entities() -> Vec<Entity> {
        vec![
            Entity { text: "Apple".into(), label: "ORG".into(), start: 0, end: 1 },
            Entity { text: "1976".into(), label: "DATE".into(), start: 4, end: 5 },
            Entity { text: "California".into(), label: "GPE".into(), start: 6, end: 7 },
        ]
    }

    #[test]
    fn test_founded_passive_rule() {
        let tokens = founded_sentence();
        let graph = DepGraph::from_tokens(&tokens);
        let mentions = born_mentions(
            "Apple was founded in 1976 in California.",
            &tokens,
            &graph,
            &founded_entities(),
        );
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].arg1, "Apple");
        assert_eq!(mentions[0].date.as_deref(), Some("1976"));
        assert_eq!(mentions[0].place.as_deref(), Some("California"));
    }

    #[test]
    fn test_founded_passive_requires_date() {
        let tokens = founded_sentence();
        let graph = DepGraph::from_tokens(&tokens);
        let entities = vec![Entity {
            text: "Apple".into(),
            label: "ORG".into(),
            start: 0,
            end: 1,
        }];
        let mentions = born_mentions(
            "Apple was founded in California.",
            &tokens,
            &graph,
            &entities,
        );
        assert!(mentions.is_empty());
    }

    #[test]
    fn test_born_rule_uses_passive_subject() {
        // "Turing was born in 1912 in London ."
        let tokens = vec![
            token(0, "Turing", "PROPN", "NNP", "nsubjpass", 2),
            token(1, "was", "AUX", "VBD", "auxpass", 2),
            token(2, "born", "VERB", "VBN", "ROOT", 2),
            token(3, "in", "ADP", "IN", "prep", 2),
            token(4, "1912", "NUM", "CD", "pobj", 3),
            token(5, "in", "ADP", "IN", "prep", 2),
            token(6, "London", "PROPN", "NNP", "pobj", 5),
            token(7, ".", "PUNCT", ".", "punct", 2),
        ];
        let graph = DepGraph::from_tokens(&tokens);
        let entities = vec![
            Entity { text: "1912".into(), label: "DATE".into(), start: 4, end: 5 },
            Entity { text: "London".into(), label: "GPE".into(), start: 6, end: 7 },
        ];
        let mentions = born_mentions(
            "Turing was born in 1912 in London.",
            &tokens,
            &graph,
            &entities,
        );
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].arg1, "Turing");
        assert_eq!(mentions[0].date.as_deref(), Some("1912"));
        assert_eq!(mentions[0].place.as_deref(), Some("London"));
    }

    #[test]
    fn test_non_matching_root_yields_nothing() {
        let tokens = vec![
            token(0, "The", "DET", "DT", "det", 1),
            token(1, "cat", "NOUN", "NN", "nsubj", 2),
            token(2, "sat", "VERB", "VBD", "ROOT", 2),
            token(3, ".", "PUNCT", ".", "punct", 2),
        ];
        let graph = DepGraph::from_tokens(&tokens);
        assert!(born_mentions("The cat sat.", &tokens, &graph, &[]).is_empty());
    }
}
