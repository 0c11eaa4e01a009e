//! Extraction configuration: which relations to extract, their seed
//! verbs, and the entity-type constraints on each argument slot.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Relation name used for part-whole templates.
pub const PART_RELATION: &str = "part";

/// One verb relation: seed surface forms plus an ordered list of accepted
/// entity-type sets, one per argument slot. Slot 0 constrains the
/// subject; the rest constrain candidate argument tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationSpec {
    pub name: String,
    pub seeds: Vec<String>,
    pub arguments: Vec<Vec<String>>,
    /// Also run the entity-based root-verb rules for this relation
    /// (catches passive sentences the SVO route cannot reach).
    #[serde(default)]
    pub entity_rules: bool,
}

/// Entity labels that bucket mentions for part-whole extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartWholeSpec {
    pub location_labels: Vec<String>,
    pub organization_labels: Vec<String>,
}

impl Default for PartWholeSpec {
    fn default() -> Self {
        Self {
            location_labels: vec!["GPE".into(), "FAC".into(), "LOC".into()],
            organization_labels: vec!["ORG".into()],
        }
    }
}

/// Full extraction configuration, loadable from YAML. The compiled-in
/// default covers the BORN and ACQUIRE templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_relations")]
    pub relations: Vec<RelationSpec>,
    #[serde(default)]
    pub part_whole: PartWholeSpec,
}

fn default_relations() -> Vec<RelationSpec> {
    vec![
        RelationSpec {
            name: "born".into(),
            seeds: vec!["born".into(), "founded".into(), "created".into()],
            arguments: vec![
                vec!["PERSON".into(), "ORG".into()],
                vec!["DATE".into()],
                vec!["GPE".into()],
            ],
            entity_rules: true,
        },
        RelationSpec {
            name: "acquire".into(),
            seeds: vec!["acquire".into()],
            arguments: vec![
                vec!["ORG".into()],
                vec!["ORG".into()],
                vec!["DATE".into()],
            ],
            entity_rules: false,
        },
    ]
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            relations: default_relations(),
            part_whole: PartWholeSpec::default(),
        }
    }
}

impl ExtractionConfig {
    /// Load and validate a configuration from a YAML file.
    pub fn from_yaml_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ExtractionConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the extractor relies on.
    pub fn validate(&self) -> Result<()> {
        if self.relations.is_empty() {
            return Err(Error::Config("no relations configured".into()));
        }
        for relation in &self.relations {
            if relation.name.is_empty() {
                return Err(Error::Config("relation with empty name".into()));
            }
            if relation.name == PART_RELATION {
                return Err(Error::Config(format!(
                    "relation name '{PART_RELATION}' is reserved for part-whole templates"
                )));
            }
            if relation.seeds.is_empty() {
                return Err(Error::Config(format!(
                    "relation '{}' has no seed verbs",
                    relation.name
                )));
            }
            if relation.arguments.len() < 2 {
                return Err(Error::Config(format!(
                    "relation '{}' needs at least a subject slot and one argument slot",
                    relation.name
                )));
            }
        }
        Ok(())
    }

    /// Relation names in output order: configured relations, then part-whole.
    pub fn relation_order(&self) -> Vec<String> {
        let mut order: Vec<String> = self.relations.iter().map(|r| r.name.clone()).collect();
        order.push(PART_RELATION.to_string());
        order
    }
}
