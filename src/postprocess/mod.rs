//! Template post-processing: turns filtered raw triples, entity-rule
//! mentions and part-whole pairs into typed argument tuples.

pub mod dates;

use crate::digraph::DepGraph;
use crate::engine::config::RelationSpec;
use crate::extract::EntityMention;
use crate::types::template::{PartTuple, RelationTemplate, Slot};
use crate::types::token::Token;
use crate::types::SvoTriple;

pub use dates::extract_date_string;

const DATE_TYPE: &str = "DATE";

/// Turn one relation's filtered triples into templates.
///
/// Slot 0 constrains the first subject token's entity type; the remaining
/// slots constrain the verb span's syntactic children, fetched fresh from
/// the dependency structure rather than read off the object span. A
/// template is emitted per verb token that resolves at least one optional
/// slot.
pub fn post_process_triples(
    spec: &RelationSpec,
    text: &str,
    tokens: &[Token],
    graph: &DepGraph,
    triples: &[SvoTriple],
) -> Vec<RelationTemplate> {
    let mut templates = Vec::new();
    let optional_slots = &spec.arguments[1..];

    for triple in triples {
        let Some(arg1) = triple.subject.first() else {
            continue;
        };
        if !tokens[arg1].has_entity_in(&spec.arguments[0]) {
            continue;
        }
        for verb in triple.verb.iter() {
            let mut resolved: Vec<Option<usize>> = vec![None; optional_slots.len()];
            for &child in graph.children(verb) {
                if child == arg1 {
                    continue;
                }
                // A child fills the first slot whose accepted set matches;
                // later children overwrite earlier fills of the same slot.
                for (slot, accepted) in optional_slots.iter().enumerate() {
                    if tokens[child].has_entity_in(accepted) {
                        resolved[slot] = Some(child);
                        break;
                    }
                }
            }
            let rest: Vec<Slot> = resolved
                .iter()
                .zip(optional_slots.iter())
                .map(|(child, accepted)| match *child {
                    Some(i) => Slot::Filled(slot_value(&tokens[i].text, accepted, text)),
                    None => Slot::Unset,
                })
                .collect();
            if let Some(template) =
                RelationTemplate::new(&spec.name, tokens[arg1].text.clone(), rest)
            {
                templates.push(template);
            }
        }
    }
    templates
}

/// Turn entity-rule mentions (BORN fallback path) into templates with the
/// same 3-slot shape as the triple path.
pub fn post_process_mentions(
    spec: &RelationSpec,
    text: &str,
    mentions: &[EntityMention],
) -> Vec<RelationTemplate> {
    let date_accepted = [DATE_TYPE.to_string()];
    mentions
        .iter()
        .filter_map(|mention| {
            let rest = vec![
                match &mention.date {
                    Some(date) => Slot::Filled(slot_value(date, &date_accepted, text)),
                    None => Slot::Unset,
                },
                match &mention.place {
                    Some(place) => Slot::Filled(place.clone()),
                    None => Slot::Unset,
                },
            ];
            RelationTemplate::new(&spec.name, mention.arg1.clone(), rest)
        })
        .collect()
}

/// One template per extracted part-whole pair, copied straight through;
/// entity-type validation already happened upstream in extraction.
pub fn post_process_part_tuples(relation: &str, tuples: &[PartTuple]) -> Vec<RelationTemplate> {
    tuples
        .iter()
        .filter_map(|tuple| {
            RelationTemplate::new(
                relation,
                tuple.part.clone(),
                vec![Slot::Filled(tuple.whole.clone())],
            )
        })
        .collect()
}

/// Resolved slot value; DATE-typed slots substitute the normalized date
/// string recovered from the raw sentence text when one is found.
fn slot_value(raw: &str, accepted: &[String], text: &str) -> String {
    if accepted.iter().any(|a| a == DATE_TYPE) {
        if let Some(date) = dates::extract_date_string(text) {
            return date;
        }
    }
    raw.to_string()
}
