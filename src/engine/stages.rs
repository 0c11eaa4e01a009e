//! Extraction stages composed into an ordered pipeline by the engine.

use std::sync::Arc;

use crate::data::document::{
    Sentence, LAYER_DEPENDENCIES, LAYER_ENT_TYPES, LAYER_LEMMAS, LAYER_NAMED_ENTITIES,
    LAYER_POS_TAGS, LAYER_TAGS, LAYER_TOKENS,
};
use crate::digraph::DepGraph;
use crate::engine::config::{PartWholeSpec, RelationSpec, PART_RELATION};
use crate::error::Result;
use crate::extract::{born_mentions, svo_triples, PartTupleExtractor, VerbFilter};
use crate::lexicon::Lexicon;
use crate::postprocess;
use crate::types::token::Token;
use crate::types::SvoTriple;

/// Per-sentence working state built once by the engine and shared by
/// every stage: the assembled token view, the dependency graph, and the
/// raw SVO triples before any relation filtering.
pub struct SentenceContext {
    pub tokens: Vec<Token>,
    pub graph: DepGraph,
    pub triples: Vec<SvoTriple>,
}

impl SentenceContext {
    pub fn build(sentence: &Sentence, stage: &str) -> Result<Self> {
        let tokens = sentence.assemble_tokens(stage)?;
        let graph = DepGraph::from_tokens(&tokens);
        let triples = svo_triples(&tokens, &graph);
        Ok(Self {
            tokens,
            graph,
            triples,
        })
    }
}

/// One extraction pass over a single sentence. Stages run in a fixed
/// order; the shared context is read-only, results land on the sentence.
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;

    /// Annotation layers that must be present before this stage runs.
    fn required_layers(&self) -> &'static [&'static str];

    fn apply(&self, sentence: &mut Sentence, ctx: &SentenceContext) -> Result<()>;
}

const RELATION_LAYERS: &[&str] = &[
    LAYER_TOKENS,
    LAYER_LEMMAS,
    LAYER_POS_TAGS,
    LAYER_TAGS,
    LAYER_ENT_TYPES,
    LAYER_NAMED_ENTITIES,
    LAYER_DEPENDENCIES,
];

const PART_LAYERS: &[&str] = &[LAYER_NAMED_ENTITIES];

/// Stage for one verb relation: filter the shared triples by the
/// expanded seed-verb set, then post-process into templates.
pub struct RelationStage {
    spec: RelationSpec,
    filter: VerbFilter,
}

impl RelationStage {
    pub fn new(spec: RelationSpec, lexicon: Option<&dyn Lexicon>) -> Self {
        let filter = VerbFilter::new(&spec.seeds, lexicon);
        log::debug!(
            "relation '{}': {} verb forms after expansion",
            spec.name,
            filter.forms().len()
        );
        Self { spec, filter }
    }
}

impl Stage for RelationStage {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn required_layers(&self) -> &'static [&'static str] {
        RELATION_LAYERS
    }

    fn apply(&self, sentence: &mut Sentence, ctx: &SentenceContext) -> Result<()> {
        let kept = self.filter.filter(&ctx.tokens, &ctx.triples);
        let mut templates = postprocess::post_process_triples(
            &self.spec,
            &sentence.text,
            &ctx.tokens,
            &ctx.graph,
            &kept,
        );

        if self.spec.entity_rules {
            let entities = sentence.named_entities.as_deref().unwrap_or(&[]);
            let mentions = born_mentions(&sentence.text, &ctx.tokens, &ctx.graph, entities);
            templates.extend(postprocess::post_process_mentions(
                &self.spec,
                &sentence.text,
                &mentions,
            ));
        }

        sentence.templates.insert(self.spec.name.clone(), templates);
        Ok(())
    }
}

/// Stage for part-whole extraction, independent of the SVO pipeline.
pub struct PartWholeStage {
    spec: PartWholeSpec,
    lexicon: Option<Arc<dyn Lexicon>>,
}

impl PartWholeStage {
    pub fn new(spec: PartWholeSpec, lexicon: Option<Arc<dyn Lexicon>>) -> Self {
        Self { spec, lexicon }
    }
}

impl Stage for PartWholeStage {
    fn name(&self) -> &str {
        PART_RELATION
    }

    fn required_layers(&self) -> &'static [&'static str] {
        PART_LAYERS
    }

    fn apply(&self, sentence: &mut Sentence, _ctx: &SentenceContext) -> Result<()> {
        sentence.require_layer(PART_RELATION, LAYER_NAMED_ENTITIES)?;
        let entities = sentence.named_entities.as_deref().unwrap_or(&[]);

        let extractor = PartTupleExtractor::new(
            self.lexicon.as_deref(),
            &self.spec.location_labels,
            &self.spec.organization_labels,
        );
        let tuples = extractor.extract(entities);

        let templates = postprocess::post_process_part_tuples(PART_RELATION, &tuples);
        sentence.templates.insert(PART_RELATION.into(), templates);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::document::DepEdge;
    use crate::engine::config::ExtractionConfig;

    // "Google acquired YouTube and founded Verily 2015 ."
    fn coordinated_sentence() -> Sentence {
        let mut sent = Sentence::new("Google acquired YouTube and founded Verily 2015.");
        let rows: &[(&str, &str, &str, &str, &str, &str, usize)] = &[
            ("Google", "Google", "PROPN", "NNP", "ORG", "nsubj", 1),
            ("acquired", "acquire", "VERB", "VBD", "O", "ROOT", 1),
            ("YouTube", "YouTube", "PROPN", "NNP", "ORG", "dobj", 1),
            ("and", "and", "CCONJ", "CC", "O", "cc", 1),
            ("founded", "found", "VERB", "VBD", "O", "conj", 1),
            ("Verily", "Verily", "PROPN", "NNP", "ORG", "dobj", 4),
            ("2015", "2015", "NUM", "CD", "DATE", "npadvmod", 4),
            (".", ".", "PUNCT", ".", "O", "punct", 1),
        ];
        sent.tokens = Some(rows.iter().map(|r| r.0.to_string()).collect());
        sent.lemmas = Some(rows.iter().map(|r| r.1.to_string()).collect());
        sent.pos_tags = Some(rows.iter().map(|r| r.2.to_string()).collect());
        sent.tags = Some(rows.iter().map(|r| r.3.to_string()).collect());
        sent.ent_types = Some(rows.iter().map(|r| r.4.to_string()).collect());
        sent.dependencies = Some(
            rows.iter()
                .map(|r| DepEdge {
                    dep: r.5.to_string(),
                    head: r.6,
                })
                .collect(),
        );
        sent.named_entities = Some(Vec::new());
        sent
    }

    #[test]
    fn test_relation_stages_share_one_context() {
        // Two relation stages consume the same triple set; each keeps
        // only the verb its own filter accepts.
        let mut sent = coordinated_sentence();
        let ctx = SentenceContext::build(&sent, "svo").unwrap();
        assert_eq!(ctx.triples.len(), 2);

        let config = ExtractionConfig::default();
        let acquire = RelationStage::new(config.relations[1].clone(), None);
        let mut born_spec = config.relations[0].clone();
        born_spec.entity_rules = false;
        let born = RelationStage::new(born_spec, None);

        acquire.apply(&mut sent, &ctx).unwrap();
        born.apply(&mut sent, &ctx).unwrap();

        let acquired = sent.templates_for("acquire");
        assert_eq!(acquired.len(), 1);
        assert_eq!(
            acquired[0].argument_strings(),
            vec!["Google", "YouTube", "<none>"]
        );
        let founded = sent.templates_for("born");
        assert_eq!(founded.len(), 1);
        assert_eq!(
            founded[0].argument_strings(),
            vec!["Google", "2015", "<none>"]
        );
    }
}
