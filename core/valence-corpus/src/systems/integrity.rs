use hecs::World;
use valence_protocol::{NodeId, NodeKind, PartOfSpeech};

use crate::components::{Children, ClauseData, NodeMeta, PhraseData, WordData};
use crate::view::CorpusView;
use crate::Corpus;

/// A structural oddity that loading tolerates but the pipeline may trip over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityIssue {
    pub node: NodeId,
    pub details: String,
}

pub fn check_integrity(corpus: &Corpus) -> Vec<IntegrityIssue> {
    let world = corpus.inner();
    let mut issues = Vec::new();

    issues.extend(check_empty_phrases(world));
    issues.extend(check_verb_stems(world));
    issues.extend(check_predicates(corpus, world));
    issues.extend(check_cross_sentence_mothers(corpus, world));

    issues.sort_by_key(|issue| (corpus.position(issue.node), issue.details.clone()));
    issues
}

fn check_empty_phrases(world: &World) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    for (_e, (meta, phrase, children)) in world.query::<(&NodeMeta, &PhraseData, &Children)>().iter() {
        if children.0.is_empty() {
            issues.push(IntegrityIssue {
                node: meta.id,
                details: format!("{} phrase without words", phrase.function),
            });
        }
    }
    issues
}

fn check_verb_stems(world: &World) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    for (_e, (meta, data)) in world.query::<(&NodeMeta, &WordData)>().iter() {
        if data.word.sp == PartOfSpeech::Verb && data.word.vs.as_deref().map_or(true, str::is_empty) {
            issues.push(IntegrityIssue {
                node: meta.id,
                details: format!("verb {} has no stem", data.word.lex),
            });
        }
    }
    issues
}

// Only the first predicate phrase of a clause is used.
fn check_predicates(corpus: &Corpus, world: &World) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    for (_e, (meta, _clause)) in world.query::<(&NodeMeta, &ClauseData)>().iter() {
        let predicates = corpus
            .contained(meta.id, NodeKind::Phrase)
            .into_iter()
            .filter(|p| corpus.function(*p).is_some_and(|f| f.is_predicate()))
            .count();
        if predicates > 1 {
            issues.push(IntegrityIssue {
                node: meta.id,
                details: format!("{predicates} predicate phrases"),
            });
        }
    }
    issues
}

// Object clauses are only looked for inside the sentence of their mother.
fn check_cross_sentence_mothers(corpus: &Corpus, world: &World) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    for (_e, (meta, _clause)) in world.query::<(&NodeMeta, &ClauseData)>().iter() {
        let Some(mother) = corpus.mother(meta.id) else { continue };
        let own = corpus.container(meta.id, NodeKind::Sentence);
        let theirs = corpus.container(mother, NodeKind::Sentence);
        if own != theirs {
            issues.push(IntegrityIssue {
                node: meta.id,
                details: format!("mother clause {mother} lies in another sentence"),
            });
        }
    }
    issues
}
