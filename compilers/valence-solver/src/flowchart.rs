use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::warn;
use valence_corpus::CorpusView;
use valence_protocol::label::{grammatical, predication, semantic, valence};
use valence_protocol::{
    ComplementShape, ConstituentKind, LabelRecord, NodeId, NodeKind, ObjectShape, Section, SenseLabel, Status,
};

use crate::config::ValenceConfig;
use crate::diagnostics::{Diagnostics, OutcomeStats, Repair};
use crate::index::VerbOccurrence;
use crate::merge::MergedRecord;

/// The constituents of a clause per flowchart kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConstituentSets {
    sets: BTreeMap<ConstituentKind, BTreeSet<NodeId>>,
}

impl ConstituentSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ConstituentKind, node: NodeId) {
        self.sets.entry(kind).or_default().insert(node);
    }

    pub fn count(&self, kind: ConstituentKind) -> usize {
        self.sets.get(&kind).map_or(0, BTreeSet::len)
    }

    pub fn members(&self, kind: ConstituentKind) -> impl Iterator<Item = NodeId> + '_ {
        self.sets.get(&kind).into_iter().flatten().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.values().all(BTreeSet::is_empty)
    }

    /// Moves every member of `from` into `to`.
    fn moved(mut self, from: ConstituentKind, to: ConstituentKind) -> Self {
        if let Some(members) = self.sets.remove(&from) {
            self.sets.entry(to).or_default().extend(members);
        }
        self
    }

    /// `2 dos; 1 pdos; 0 ndos; ...` over every kind.
    pub fn summary(&self) -> String {
        ConstituentKind::ALL
            .into_iter()
            .map(|kind| format!("{} {}", self.count(kind), kind))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The flowchart kind of a phrase, from its label record.
pub fn phrase_kind(record: &LabelRecord) -> Option<ConstituentKind> {
    match record.grammatical.as_str() {
        grammatical::PRINCIPAL_DIRECT_OBJECT => return Some(ConstituentKind::Pdos),
        grammatical::NP_DIRECT_OBJECT => return Some(ConstituentKind::Ndos),
        grammatical::L_OBJECT => return Some(ConstituentKind::Ldos),
        grammatical::K_OBJECT => return Some(ConstituentKind::Kdos),
        grammatical::DIRECT_OBJECT | grammatical::INFINITIVE_OBJECT => return Some(ConstituentKind::Dos),
        grammatical::INDIRECT_OBJECT => return Some(ConstituentKind::Inds),
        _ => {}
    }
    if record.semantic == semantic::BENEFACTIVE {
        return Some(ConstituentKind::Bens);
    }
    if record.semantic == semantic::LOCATION
        && matches!(record.valence.as_str(), valence::COMPLEMENT | valence::ADJUNCT)
    {
        return Some(ConstituentKind::Locs);
    }
    (record.grammatical == grammatical::COMPLEMENT).then_some(ConstituentKind::Cpls)
}

/// The flowchart kind of a clause depending on the verb's clause.
pub fn clause_kind(record: &LabelRecord) -> Option<ConstituentKind> {
    match record.grammatical.as_str() {
        grammatical::DIRECT_OBJECT => Some(ConstituentKind::Cdos),
        grammatical::INFINITIVE_OBJECT => Some(ConstituentKind::Idos),
        _ => None,
    }
}

/// Result of the decision automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub label: SenseLabel,
    /// The sets after merges and repairs.
    pub constituents: ConstituentSets,
    pub repair: Option<Repair>,
}

/// The sense label of one verb occurrence, with everything needed to report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenseDecision {
    pub verb: NodeId,
    pub phrase: NodeId,
    pub clause: NodeId,
    pub lexeme: String,
    pub text: String,
    pub section: Option<Section>,
    pub label: SenseLabel,
    /// The flowchart the label comes from, if the lexeme has one.
    pub sense: Option<String>,
    pub status: Status,
    pub constituents: ConstituentSets,
    pub repair: Option<Repair>,
}

pub struct FlowchartEngine<'a> {
    config: &'a ValenceConfig,
}

impl<'a> FlowchartEngine<'a> {
    pub fn new(config: &'a ValenceConfig) -> Self {
        Self { config }
    }

    /// Object shape from the raw counts, with merges and repairs, then the
    /// complement shape from what is left.
    pub fn decide(sets: &ConstituentSets) -> Outcome {
        use ConstituentKind::*;

        let mut constituents = sets.clone();
        let mut repair = None;

        let object = if sets.count(Pdos) > 0 {
            let second = [
                (Ndos, ObjectShape::Np),
                (Cdos, ObjectShape::Clause),
                (Ldos, ObjectShape::L),
                (Kdos, ObjectShape::K),
                (Idos, ObjectShape::Infinitive),
            ]
            .into_iter()
            .find(|(kind, _)| sets.count(*kind) > 0)
            .map(|(_, shape)| shape);
            match second {
                Some(shape) => shape,
                None if sets.count(Dos) > 0 => {
                    repair = Some(Repair::PdosWithDos);
                    constituents = constituents.moved(Dos, Ndos);
                    ObjectShape::Np
                }
                None => {
                    repair = Some(Repair::LonelyPdos);
                    constituents = constituents.moved(Pdos, Dos);
                    ObjectShape::Direct
                }
            }
        } else {
            // without a principal object, clause and NP objects are plain direct objects
            constituents = constituents.moved(Cdos, Dos).moved(Ndos, Dos);
            if constituents.count(Dos) > 0 {
                ObjectShape::Direct
            } else {
                ObjectShape::None
            }
        };

        let complement = if object.is_double() {
            ComplementShape::NotApplicable
        } else {
            [
                (Inds, ComplementShape::IndirectObject),
                (Bens, ComplementShape::Benefactive),
                (Locs, ComplementShape::Locative),
                (Cpls, ComplementShape::Complement),
            ]
            .into_iter()
            .find(|(kind, _)| constituents.count(*kind) > 0)
            .map_or(ComplementShape::None, |(_, shape)| shape)
        };

        Outcome {
            label: SenseLabel::new(object, complement),
            constituents,
            repair,
        }
    }

    /// The phrases of the clause and the clauses depending on it in the same
    /// sentence, sorted into flowchart kinds by their merged records.
    pub fn gather<V: CorpusView + ?Sized>(
        view: &V,
        clause: NodeId,
        records: &BTreeMap<NodeId, MergedRecord>,
    ) -> ConstituentSets {
        let mut sets = ConstituentSets::new();
        for phrase in view.contained(clause, NodeKind::Phrase) {
            if let Some(kind) = records.get(&phrase).and_then(|m| phrase_kind(&m.record)) {
                sets.insert(kind, phrase);
            }
        }
        let sentence = view.container(clause, NodeKind::Sentence);
        for daughter in view.daughters(clause) {
            if view.container(daughter, NodeKind::Sentence) != sentence {
                continue;
            }
            if let Some(kind) = records.get(&daughter).and_then(|m| clause_kind(&m.record)) {
                sets.insert(kind, daughter);
            }
        }
        sets
    }

    /// Regular predications in the configured stems only.
    pub fn applies(&self, occurrence: &VerbOccurrence, records: &BTreeMap<NodeId, MergedRecord>) -> bool {
        let regular = records
            .get(&occurrence.phrase)
            .is_some_and(|m| m.record.predication == predication::REGULAR);
        regular && self.config.applies_to_stem(occurrence.stem.as_deref())
    }

    pub fn run<V: CorpusView + ?Sized>(
        &self,
        view: &V,
        occurrence: &VerbOccurrence,
        records: &BTreeMap<NodeId, MergedRecord>,
        diagnostics: &mut Diagnostics,
        stats: &mut OutcomeStats,
    ) -> SenseDecision {
        let sets = Self::gather(view, occurrence.clause, records);
        let outcome = Self::decide(&sets);
        let section = view.section(occurrence.word);
        let lexeme = occurrence.lexeme.as_str();

        if let Some(repair) = outcome.repair {
            let location = section.as_ref().map(ToString::to_string).unwrap_or_default();
            warn!(lexeme, verb = %occurrence.word, %location, repair = repair.as_str(), "{}", sets.summary());
            diagnostics.push(lexeme, repair, occurrence.word, location, sets.summary());
        }
        stats.record(lexeme, outcome.label);

        let registered = self.config.has_flowchart(lexeme);
        SenseDecision {
            verb: occurrence.word,
            phrase: occurrence.phrase,
            clause: occurrence.clause,
            lexeme: lexeme.to_string(),
            text: occurrence.text.clone(),
            section,
            label: outcome.label,
            sense: registered.then(|| lexeme.to_string()),
            status: if registered { Status::Confident } else { Status::Uncertain },
            constituents: outcome.constituents,
            repair: outcome.repair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ConstituentKind::*;

    fn sets(counts: &[(ConstituentKind, usize)]) -> ConstituentSets {
        let mut sets = ConstituentSets::new();
        let mut next = 1;
        for (kind, n) in counts {
            for _ in 0..*n {
                sets.insert(*kind, NodeId(next));
                next += 1;
            }
        }
        sets
    }

    fn label(counts: &[(ConstituentKind, usize)]) -> String {
        FlowchartEngine::decide(&sets(counts)).label.code()
    }

    #[test]
    fn test_double_objects() {
        assert_eq!(label(&[(Pdos, 1), (Ndos, 1)]), "n.");
        assert_eq!(label(&[(Pdos, 1), (Cdos, 1), (Inds, 1)]), "c.");
        assert_eq!(label(&[(Pdos, 1), (Ldos, 1), (Kdos, 1)]), "l.");
        assert_eq!(label(&[(Pdos, 1), (Kdos, 2)]), "k.");
        assert_eq!(label(&[(Pdos, 1), (Idos, 1)]), "i.");
    }

    #[test]
    fn test_single_objects_and_complements() {
        assert_eq!(label(&[]), "--");
        assert_eq!(label(&[(Dos, 1), (Inds, 1)]), "di");
        assert_eq!(label(&[(Locs, 1)]), "-p");
        assert_eq!(label(&[(Dos, 1), (Bens, 1), (Locs, 1)]), "db");
        assert_eq!(label(&[(Cpls, 2)]), "-c");
        assert_eq!(label(&[(Ndos, 1)]), "d-");
        assert_eq!(label(&[(Cdos, 1), (Locs, 1)]), "dp");
    }

    #[test]
    fn test_pdos_with_dos_repair() {
        let input = sets(&[(Pdos, 1), (Dos, 1)]);
        let outcome = FlowchartEngine::decide(&input);
        assert_eq!(outcome.label.code(), "n.");
        assert_eq!(outcome.repair, Some(Repair::PdosWithDos));
        assert_eq!(outcome.constituents.count(Ndos), 1);
        assert_eq!(outcome.constituents.count(Dos), 0);
        assert_eq!(outcome.constituents.count(Pdos), 1);
    }

    #[test]
    fn test_lonely_pdos_becomes_direct() {
        let outcome = FlowchartEngine::decide(&sets(&[(Pdos, 1), (Locs, 1)]));
        assert_eq!(outcome.label.code(), "dp");
        assert_eq!(outcome.repair, Some(Repair::LonelyPdos));
        assert_eq!(outcome.constituents.count(Pdos), 0);
        assert_eq!(outcome.constituents.count(Dos), 1);
    }

    #[test]
    fn test_phrase_kinds() {
        let record = |v: [&str; 6]| LabelRecord::from_values(&v);
        assert_eq!(phrase_kind(&record(["complement", "NA", "principal_direct_object", "", "", ""])), Some(Pdos));
        assert_eq!(phrase_kind(&record(["complement", "NA", "infinitive_object", "", "", ""])), Some(Dos));
        assert_eq!(phrase_kind(&record(["adjunct", "NA", "NA", "", "", "benefactive"])), Some(Bens));
        assert_eq!(phrase_kind(&record(["adjunct", "NA", "NA", "", "location", "location"])), Some(Locs));
        assert_eq!(phrase_kind(&record(["core", "NA", "NA", "", "", "location"])), None);
        assert_eq!(phrase_kind(&record(["complement", "NA", "*", "", "", ""])), Some(Cpls));
        assert_eq!(phrase_kind(&record(["core", "regular", "NA", "", "", ""])), None);
        assert_eq!(clause_kind(&record(["complement", "NA", "direct_object", "", "", ""])), Some(Cdos));
        assert_eq!(clause_kind(&record(["complement", "NA", "infinitive_object", "", "", ""])), Some(Idos));
        assert_eq!(clause_kind(&record(["", "", "", "", "", ""])), None);
    }

    #[test]
    fn test_summary() {
        let summary = sets(&[(Pdos, 1), (Dos, 2)]).summary();
        assert!(summary.starts_with("2 dos; 1 pdos; 0 ndos"));
        assert!(summary.ends_with("0 bens"));
    }

    proptest! {
        #[test]
        fn prop_labels_stay_in_alphabet(counts in prop::collection::vec(0usize..3, 11)) {
            let counts: Vec<(ConstituentKind, usize)> = ConstituentKind::ALL.into_iter().zip(counts).collect();
            let input = sets(&counts);
            let outcome = FlowchartEngine::decide(&input);
            let code = outcome.label.code();
            prop_assert!(SenseLabel::ALPHABET.contains(&code.as_str()));
            prop_assert_eq!(code.parse::<SenseLabel>().ok(), Some(outcome.label));

            // repairs and merges only move constituents around
            let before: usize = ConstituentKind::ALL.into_iter().map(|k| input.count(k)).sum();
            let after: usize = ConstituentKind::ALL.into_iter().map(|k| outcome.constituents.count(k)).sum();
            prop_assert_eq!(before, after);
            prop_assert_eq!(outcome.repair.is_some(), input.count(Pdos) > 0
                && [Ndos, Cdos, Ldos, Kdos, Idos].into_iter().all(|k| input.count(k) == 0));

            // deciding again on the repaired sets changes nothing
            let again = FlowchartEngine::decide(&outcome.constituents);
            prop_assert_eq!(again.label, outcome.label);
            prop_assert_eq!(again.repair, None);
        }
    }
}
