use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::info;
use valence_corpus::CorpusView;
use valence_lexicon::verb_lexeme;
use valence_protocol::{NodeId, NodeKind, PartOfSpeech};

use crate::corrections::Corrections;

/// A verb word with the context the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerbOccurrence {
    pub word: NodeId,
    pub phrase: NodeId,
    pub clause: NodeId,
    /// Canonical lexeme, paradigm markers stripped.
    pub lexeme: String,
    pub stem: Option<String>,
    pub text: String,
    /// The (corrected) function of its phrase is a predicate function.
    pub in_predicate: bool,
}

/// Verb occurrences per clause and per lexeme, built once per corpus.
///
/// Only verbs in predicate phrases make a clause eligible; the other
/// occurrences are kept per lexeme for correction sheets.
#[derive(Debug, Clone, Default)]
pub struct ClauseVerbIndex {
    clauses: Vec<NodeId>,
    by_clause: HashMap<NodeId, Vec<VerbOccurrence>>,
    by_lexeme: BTreeMap<String, Vec<(NodeId, NodeId)>>,
    occurrences: BTreeMap<String, Vec<VerbOccurrence>>,
}

impl ClauseVerbIndex {
    pub fn build<V: CorpusView + ?Sized>(view: &V, corrections: &Corrections) -> Self {
        let mut index = Self::default();

        for word in view.nodes(NodeKind::Word) {
            let Some(w) = view.word(word) else { continue };
            if w.sp != PartOfSpeech::Verb {
                continue;
            }
            let (Some(phrase), Some(clause)) = (
                view.container(word, NodeKind::Phrase),
                view.container(word, NodeKind::Clause),
            ) else {
                continue;
            };
            let in_predicate = corrections
                .effective(view, phrase)
                .is_some_and(|f| f.is_predicate());

            let occurrence = VerbOccurrence {
                word,
                phrase,
                clause,
                lexeme: verb_lexeme(&w.lex).to_string(),
                stem: w.vs.clone(),
                text: w.text.clone(),
                in_predicate,
            };

            if in_predicate {
                let verbs = index.by_clause.entry(clause).or_default();
                if verbs.is_empty() {
                    index.clauses.push(clause);
                }
                verbs.push(occurrence.clone());
                index
                    .by_lexeme
                    .entry(occurrence.lexeme.clone())
                    .or_default()
                    .push((clause, word));
            }
            index
                .occurrences
                .entry(occurrence.lexeme.clone())
                .or_default()
                .push(occurrence);
        }

        info!(
            clauses = index.clauses.len(),
            lexemes = index.by_lexeme.len(),
            "indexed predicate verbs"
        );
        index
    }

    /// Clauses with at least one predicate verb, in corpus order.
    pub fn clauses(&self) -> &[NodeId] {
        &self.clauses
    }

    pub fn verbs(&self, clause: NodeId) -> &[VerbOccurrence] {
        self.by_clause.get(&clause).map(Vec::as_slice).unwrap_or_default()
    }

    /// The verb whose rules label the clause: its first predicate verb.
    pub fn main_verb(&self, clause: NodeId) -> Option<&VerbOccurrence> {
        self.verbs(clause).first()
    }

    /// (clause, verb word) pairs of a lexeme, in corpus order.
    pub fn clauses_of(&self, lexeme: &str) -> &[(NodeId, NodeId)] {
        self.by_lexeme.get(lexeme).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn lexemes(&self) -> impl Iterator<Item = &str> {
        self.by_lexeme.keys().map(String::as_str)
    }

    /// Every occurrence of a lexeme, also outside predicate phrases.
    pub fn occurrences(&self, lexeme: &str) -> &[VerbOccurrence] {
        self.occurrences.get(lexeme).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn occurrence(&self, clause: NodeId, word: NodeId) -> Option<&VerbOccurrence> {
        self.verbs(clause).iter().find(|v| v.word == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use valence_protocol::PhraseFunction;

    #[test]
    fn test_predicate_verbs_only() {
        let mut b = builder();
        let first = b.clause("WayX", "NA");
        let give = b.verb("NTN[", "qal");
        let give_id = give.id;
        b.phrase(PhraseFunction::Pred, vec![give]);
        let participle = b.verb("HLK[", "qal");
        b.phrase(PhraseFunction::Subj, vec![participle]);
        let second = b.clause("xQtX", "NA");
        let go = b.verb("HLK[", "qal");
        let go_id = go.id;
        b.phrase(PhraseFunction::PreS, vec![go]);
        let corpus = load(b);

        let index = ClauseVerbIndex::build(&corpus, &Corrections::new());
        assert_eq!(index.clauses(), &[first, second]);
        assert_eq!(index.main_verb(first).map(|v| v.word), Some(give_id));
        assert_eq!(index.clauses_of("HLK"), &[(second, go_id)]);
        assert_eq!(index.occurrences("HLK").len(), 2);
        assert!(!index.occurrences("HLK")[0].in_predicate);
        assert_eq!(index.lexemes().collect::<Vec<_>>(), vec!["HLK", "NTN"]);
    }

    #[test]
    fn test_corrections_change_eligibility() {
        let mut b = builder();
        let clause = b.clause("WayX", "NA");
        let verb = b.verb("<FH[", "qal");
        let phrase = b.phrase(PhraseFunction::Subj, vec![verb]);
        let corpus = load(b);

        assert!(ClauseVerbIndex::build(&corpus, &Corrections::new()).clauses().is_empty());

        let mut corrections = Corrections::new();
        corrections.insert(phrase, PhraseFunction::PreO);
        let index = ClauseVerbIndex::build(&corpus, &corrections);
        assert_eq!(index.clauses(), &[clause]);
        assert_eq!(index.verbs(clause)[0].lexeme, "<FH");
    }
}
