//! Subject-verb-object triple reconstruction from dependency edges.

use std::collections::{BTreeMap, BTreeSet};

use crate::digraph::DepGraph;
use crate::types::span::{Span, SvoTriple};
use crate::types::token::{DepRel, Token};

#[derive(Debug, Default, Clone)]
struct VerbArgs {
    subjects: BTreeSet<usize>,
    objects: BTreeSet<usize>,
}

/// Reconstruct every (subject, verb, object) triple present in one
/// sentence.
///
/// A verb yields a triple only when both its subject set and object set
/// end up non-empty after conjunct propagation; anything else is silently
/// dropped. All spans come out deduplicated and sorted by token index.
pub fn svo_triples(tokens: &[Token], graph: &DepGraph) -> Vec<SvoTriple> {
    let mut verb_args = collect_verb_args(tokens, graph);
    propagate_conjuncts(&mut verb_args, graph);

    verb_args
        .into_iter()
        .filter(|(_, args)| !args.subjects.is_empty() && !args.objects.is_empty())
        .map(|(verb, args)| SvoTriple {
            subject: Span::from_set(&args.subjects),
            verb: Span::from_indices(expand_verb(verb, graph)),
            object: Span::from_set(&args.objects),
        })
        .collect()
}

/// Single pass over the dependency edges, connecting subjects and objects
/// to their direct verb heads.
fn collect_verb_args(tokens: &[Token], graph: &DepGraph) -> BTreeMap<usize, VerbArgs> {
    let mut verb_args: BTreeMap<usize, VerbArgs> = BTreeMap::new();

    for token in tokens {
        let i = token.i;
        let head = graph.head(i);

        // Every verb gets an entry even with no direct arguments, so that
        // conjunct propagation can reach verbs whose arguments all live on
        // a coordinated sibling.
        if token.is_verb() {
            verb_args.entry(i).or_default();
        }

        let rel = token.dep;
        if rel.is_nominal_subject() {
            if tokens[head].is_verb() {
                verb_args
                    .entry(head)
                    .or_default()
                    .subjects
                    .extend(expand_noun(i, graph));
            }
        } else if rel.is_clausal_subject() {
            // The whole clause is the subject; no noun-phrase expansion.
            if tokens[head].is_verb() {
                verb_args
                    .entry(head)
                    .or_default()
                    .subjects
                    .extend(graph.subtree(i));
            }
        } else if rel == DepRel::Dobj {
            if tokens[head].is_verb() {
                verb_args
                    .entry(head)
                    .or_default()
                    .objects
                    .extend(expand_noun(i, graph));
            }
        } else if rel == DepRel::Pobj {
            // Prepositional object acting as agent of a passive verb:
            // "was founded by X".
            let grand = graph.head(head);
            if graph.rel(head) == DepRel::Agent && tokens[grand].is_verb() {
                verb_args
                    .entry(grand)
                    .or_default()
                    .objects
                    .extend(expand_noun(i, graph));
            }
        } else if rel == DepRel::Xcomp {
            // Open clausal complement, unless the verb already has a
            // direct object that would double-count the arguments.
            if tokens[head].is_verb() && !graph.has_child_with(head, DepRel::Dobj) {
                verb_args
                    .entry(head)
                    .or_default()
                    .objects
                    .extend(graph.subtree(i));
            }
        }
    }
    verb_args
}

/// Fill in indirect relationships connected via verb conjuncts:
/// "Company A founded X and acquired Y" shares the first verb's subject
/// with the second. Subjects push outward, objects pull inward. The pass
/// is idempotent.
fn propagate_conjuncts(verb_args: &mut BTreeMap<usize, VerbArgs>, graph: &DepGraph) {
    let verbs: Vec<usize> = verb_args.keys().copied().collect();
    for &verb in &verbs {
        let subjects = verb_args[&verb].subjects.clone();
        if !subjects.is_empty() {
            for conj in graph.conjuncts(verb) {
                if let Some(args) = verb_args.get_mut(&conj) {
                    if args.subjects.is_empty() {
                        args.subjects.extend(subjects.iter().copied());
                    }
                }
            }
        }
        if verb_args[&verb].objects.is_empty() {
            let pulled: BTreeSet<usize> = graph
                .conjuncts(verb)
                .into_iter()
                .filter_map(|conj| verb_args.get(&conj))
                .flat_map(|args| args.objects.iter().copied())
                .collect();
            if let Some(args) = verb_args.get_mut(&verb) {
                args.objects.extend(pulled);
            }
        }
    }
}

/// Expand a noun token into its full phrase: the token, its conjuncts,
/// and the compound modifiers of all of those.
pub fn expand_noun(i: usize, graph: &DepGraph) -> BTreeSet<usize> {
    let mut phrase: BTreeSet<usize> = BTreeSet::new();
    phrase.insert(i);
    phrase.extend(graph.conjuncts(i));
    let compounds: Vec<usize> = phrase
        .iter()
        .flat_map(|&t| graph.children_with(t, DepRel::Compound))
        .collect();
    phrase.extend(compounds);
    phrase
}

/// Expand a verb token with its auxiliary and negation modifiers.
pub fn expand_verb(v: usize, graph: &DepGraph) -> Vec<usize> {
    let mut phrase = vec![v];
    phrase.extend(
        graph
            .children(v)
            .iter()
            .copied()
            .filter(|&c| graph.rel(c).is_verb_modifier()),
    );
    phrase
}
