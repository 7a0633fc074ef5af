use std::collections::BTreeSet;

use serde::Serialize;
use valence_lexicon::{Lexicon, OBJECT_MARKER, PREPOSITION_K, PREPOSITION_L};
use valence_protocol::{NodeId, ObjectKind, PhraseFunction, WordFlags};

use crate::scanner::{ClauseScan, ScannedPhrase};

/// The object buckets of one clause. Every constituent is in at most one
/// bucket and there is at most one principal object.
///
/// Object clauses always stay in `clause`, also when they count as direct
/// object evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectKindSet {
    pub principal: Option<NodeId>,
    pub direct: BTreeSet<NodeId>,
    pub np: BTreeSet<NodeId>,
    pub l: BTreeSet<NodeId>,
    pub k: BTreeSet<NodeId>,
    pub clause: BTreeSet<NodeId>,
    pub infinitive: BTreeSet<NodeId>,
}

impl ObjectKindSet {
    pub fn kind_of(&self, node: NodeId) -> Option<ObjectKind> {
        ObjectKind::ALL
            .into_iter()
            .find(|kind| self.members(*kind).contains(&node))
    }

    pub fn members(&self, kind: ObjectKind) -> Vec<NodeId> {
        match kind {
            ObjectKind::Principal => self.principal.into_iter().collect(),
            ObjectKind::Direct => self.direct.iter().copied().collect(),
            ObjectKind::Np => self.np.iter().copied().collect(),
            ObjectKind::L => self.l.iter().copied().collect(),
            ObjectKind::K => self.k.iter().copied().collect(),
            ObjectKind::Clause => self.clause.iter().copied().collect(),
            ObjectKind::Infinitive => self.infinitive.iter().copied().collect(),
        }
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Principal => usize::from(self.principal.is_some()),
            ObjectKind::Direct => self.direct.len(),
            ObjectKind::Np => self.np.len(),
            ObjectKind::L => self.l.len(),
            ObjectKind::K => self.k.len(),
            ObjectKind::Clause => self.clause.len(),
            ObjectKind::Infinitive => self.infinitive.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        ObjectKind::ALL.into_iter().all(|kind| self.count(kind) == 0)
    }

    /// No constituent sits in two buckets.
    pub fn is_partition(&self) -> bool {
        let total: usize = ObjectKind::ALL.into_iter().map(|kind| self.count(kind)).sum();
        let distinct: BTreeSet<NodeId> = ObjectKind::ALL
            .into_iter()
            .flat_map(|kind| self.members(kind))
            .collect();
        total == distinct.len()
    }

    /// Direct object evidence: undifferentiated phrase objects, the principal
    /// and NP objects, and object clauses.
    fn evidence(&self) -> usize {
        self.count(ObjectKind::Principal) + self.direct.len() + self.np.len() + self.clause.len()
    }
}

/// How the principal object was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrincipalRule {
    /// The earliest object suffix on a predicate (`PreO`, `PtcO`).
    PredicateSuffix,
    /// The only `Objc` phrase among several objects.
    SoleObjectPhrase,
    /// The earliest `Objc` phrase with the object marker.
    MarkedObject,
    /// The earliest `Objc` phrase, none being marked.
    UnmarkedObject,
    /// A single direct object next to L-, K- or infinitive objects.
    Promoted,
}

/// Every intermediate bucket set of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTrace {
    /// Raw classification by phrase function and clause relation.
    pub candidates: ObjectKindSet,
    /// Infinitive objects dropped when there is no direct object evidence.
    pub infinitives_checked: ObjectKindSet,
    /// Principal selected; the other phrase objects moved to `np`.
    pub principal_split: ObjectKindSet,
    pub resolved: ObjectKindSet,
    pub rule: Option<PrincipalRule>,
}

/// Decides which constituents of a clause are objects, and which of them is the principal one.
pub struct ObjectResolver<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> ObjectResolver<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn resolve(&self, scan: &ClauseScan) -> ObjectKindSet {
        self.trace(scan).resolved
    }

    pub fn trace(&self, scan: &ClauseScan) -> ResolutionTrace {
        let candidates = self.candidates(scan);
        let infinitives_checked = drop_lonely_infinitives(&candidates);
        let principal = select_principal(scan, &infinitives_checked);
        let principal_split = split_principal(&infinitives_checked, principal.map(|(id, _)| id));
        let (resolved, promoted) = promote(&principal_split);

        let rule = match principal {
            Some((_, rule)) => Some(rule),
            None if promoted => Some(PrincipalRule::Promoted),
            None => None,
        };

        ResolutionTrace {
            candidates,
            infinitives_checked,
            principal_split,
            resolved,
            rule,
        }
    }

    fn candidates(&self, scan: &ClauseScan) -> ObjectKindSet {
        let mut set = ObjectKindSet::default();

        for phrase in &scan.phrases {
            if phrase.function.is_object() {
                set.direct.insert(phrase.id);
            } else if phrase.function == PhraseFunction::Cmpl {
                match self.preposition_object(phrase) {
                    Some(ObjectKind::K) => {
                        set.k.insert(phrase.id);
                    }
                    Some(ObjectKind::L) => {
                        set.l.insert(phrase.id);
                    }
                    _ => {}
                }
            }
        }

        for clause in &scan.dependents {
            if clause.is_object() {
                set.clause.insert(clause.id);
            } else if clause.is_infinitive() && clause.first_lex() == Some(PREPOSITION_L) {
                set.infinitive.insert(clause.id);
            }
        }
        set
    }

    /// A complement headed by a bare `K` or `L` counts as a K- or L-object,
    /// except for `L` followed by a body part.
    fn preposition_object(&self, phrase: &ScannedPhrase) -> Option<ObjectKind> {
        let first = phrase.words.first()?;
        if first.flags().contains(WordFlags::PRONOMINAL_SUFFIX) {
            return None;
        }
        match first.lex.as_str() {
            PREPOSITION_K => Some(ObjectKind::K),
            PREPOSITION_L if !self.lexicon.is_body_part_idiom(&phrase.words) => Some(ObjectKind::L),
            _ => None,
        }
    }
}

fn drop_lonely_infinitives(set: &ObjectKindSet) -> ObjectKindSet {
    if set.evidence() > 0 {
        return set.clone();
    }
    ObjectKindSet {
        infinitive: BTreeSet::new(),
        ..set.clone()
    }
}

/// The tie-break cascade. Only runs when there are at least two objects.
fn select_principal(scan: &ClauseScan, set: &ObjectKindSet) -> Option<(NodeId, PrincipalRule)> {
    if set.evidence() < 2 {
        return None;
    }

    let position = |id: &NodeId| scan.position(*id).unwrap_or(u32::MAX);
    let object_phrases = || {
        set.direct
            .iter()
            .filter_map(|id| scan.phrase(*id))
    };

    let suffixed = object_phrases()
        .filter(|p| matches!(p.function, PhraseFunction::PreO | PhraseFunction::PtcO))
        .map(|p| p.id)
        .min_by_key(position);
    if let Some(id) = suffixed {
        return Some((id, PrincipalRule::PredicateSuffix));
    }

    let objc: Vec<&ScannedPhrase> = object_phrases()
        .filter(|p| p.function == PhraseFunction::Objc)
        .collect();
    match objc.as_slice() {
        [] => None,
        [only] => Some((only.id, PrincipalRule::SoleObjectPhrase)),
        several => {
            let marked = several
                .iter()
                .filter(|p| p.words.iter().any(|w| w.lex == OBJECT_MARKER))
                .map(|p| p.id)
                .min_by_key(position);
            match marked {
                Some(id) => Some((id, PrincipalRule::MarkedObject)),
                None => several
                    .iter()
                    .map(|p| p.id)
                    .min_by_key(position)
                    .map(|id| (id, PrincipalRule::UnmarkedObject)),
            }
        }
    }
}

fn split_principal(set: &ObjectKindSet, principal: Option<NodeId>) -> ObjectKindSet {
    let Some(principal) = principal else {
        return set.clone();
    };
    ObjectKindSet {
        principal: Some(principal),
        direct: BTreeSet::new(),
        np: set.direct.iter().copied().filter(|id| *id != principal).collect(),
        ..set.clone()
    }
}

/// Without a principal, a direct object next to other object kinds becomes the principal one.
fn promote(set: &ObjectKindSet) -> (ObjectKindSet, bool) {
    let others = !set.np.is_empty() || !set.l.is_empty() || !set.k.is_empty() || !set.infinitive.is_empty();
    if set.principal.is_some() || set.evidence() == 0 || !others {
        return (set.clone(), false);
    }
    let mut direct = set.direct.iter().copied();
    match direct.next() {
        Some(first) => (
            ObjectKindSet {
                principal: Some(first),
                direct: BTreeSet::new(),
                np: set.np.iter().copied().chain(direct).collect(),
                ..set.clone()
            },
            true,
        ),
        None => (set.clone(), false),
    }
}
