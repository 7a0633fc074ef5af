use valence_corpus::CorpusView;
use valence_protocol::{NodeId, NodeKind, PhraseFunction, Word};

use crate::corrections::Corrections;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedPhrase {
    pub id: NodeId,
    pub position: u32,
    /// Effective function: the correction if there is one.
    pub function: PhraseFunction,
    pub corrected: bool,
    pub typ: String,
    pub words: Vec<Word>,
}

/// A clause depending directly on the scanned clause, as object or infinitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedClause {
    pub id: NodeId,
    pub position: u32,
    pub typ: String,
    pub rela: String,
    pub words: Vec<Word>,
}

impl ScannedClause {
    pub fn is_object(&self) -> bool {
        self.rela == "Objc"
    }

    pub fn is_infinitive(&self) -> bool {
        self.typ == "InfC"
    }

    pub fn first_lex(&self) -> Option<&str> {
        self.words.first().map(|w| w.lex.as_str())
    }
}

/// A scanned phrase or dependent clause, as seen by the enrichment rules.
#[derive(Debug, Clone, Copy)]
pub enum Constituent<'s> {
    Phrase(&'s ScannedPhrase),
    Clause(&'s ScannedClause),
}

impl<'s> Constituent<'s> {
    pub fn id(&self) -> NodeId {
        match self {
            Constituent::Phrase(p) => p.id,
            Constituent::Clause(c) => c.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Constituent::Phrase(_) => NodeKind::Phrase,
            Constituent::Clause(_) => NodeKind::Clause,
        }
    }

    pub fn words(&self) -> &'s [Word] {
        match self {
            Constituent::Phrase(p) => &p.words,
            Constituent::Clause(c) => &c.words,
        }
    }

    /// Role features: the effective `function` of a phrase, `typ` of both, `rela` of a clause.
    pub fn feature(&self, name: &str) -> Option<&'s str> {
        match (self, name) {
            (Constituent::Phrase(p), "function") => Some(p.function.as_str()),
            (Constituent::Phrase(p), "typ") => Some(p.typ.as_str()),
            (Constituent::Clause(c), "typ") => Some(c.typ.as_str()),
            (Constituent::Clause(c), "rela") => Some(c.rela.as_str()),
            _ => None,
        }
    }
}

/// The local frame of one clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseScan {
    pub clause: NodeId,
    pub phrases: Vec<ScannedPhrase>,
    pub dependents: Vec<ScannedClause>,
}

impl ClauseScan {
    pub fn phrase(&self, id: NodeId) -> Option<&ScannedPhrase> {
        self.phrases.iter().find(|p| p.id == id)
    }

    pub fn dependent(&self, id: NodeId) -> Option<&ScannedClause> {
        self.dependents.iter().find(|c| c.id == id)
    }

    /// Phrases first, then dependent clauses, each in corpus order.
    pub fn constituents(&self) -> impl Iterator<Item = Constituent<'_>> + '_ {
        self.phrases
            .iter()
            .map(Constituent::Phrase)
            .chain(self.dependents.iter().map(Constituent::Clause))
    }

    pub fn position(&self, id: NodeId) -> Option<u32> {
        self.phrase(id)
            .map(|p| p.position)
            .or_else(|| self.dependent(id).map(|c| c.position))
    }
}

/// Collects the phrases of a clause and the object and infinitive clauses that
/// depend on it. Only direct containment and direct mothers are followed.
pub struct ConstituentScanner<'a, V: CorpusView + ?Sized> {
    view: &'a V,
    corrections: &'a Corrections,
}

impl<'a, V: CorpusView + ?Sized> ConstituentScanner<'a, V> {
    pub fn new(view: &'a V, corrections: &'a Corrections) -> Self {
        Self { view, corrections }
    }

    pub fn scan(&self, clause: NodeId) -> ClauseScan {
        let view = self.view;

        let phrases = view
            .contained(clause, NodeKind::Phrase)
            .into_iter()
            .filter_map(|id| {
                let function = self.corrections.effective(view, id)?;
                Some(ScannedPhrase {
                    id,
                    position: view.position(id)?,
                    function,
                    corrected: self.corrections.is_corrected(id),
                    typ: view.feature(id, "typ").unwrap_or_default(),
                    words: view.words(id),
                })
            })
            .collect();

        let sentence = view.container(clause, NodeKind::Sentence);
        let mut dependents: Vec<ScannedClause> = view
            .daughters(clause)
            .into_iter()
            .filter(|d| view.container(*d, NodeKind::Sentence) == sentence)
            .filter_map(|id| {
                Some(ScannedClause {
                    id,
                    position: view.position(id)?,
                    typ: view.feature(id, "typ").unwrap_or_default(),
                    rela: view.feature(id, "rela").unwrap_or_default(),
                    words: view.words(id),
                })
            })
            .filter(|c| c.is_object() || c.is_infinitive())
            .collect();
        dependents.sort_by_key(|c| c.position);

        ClauseScan {
            clause,
            phrases,
            dependents,
        }
    }
}
