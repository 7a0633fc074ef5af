use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;
use valence_lexicon::Lexicon;
use valence_protocol::label::{grammatical, semantic};
use valence_protocol::{Field, LabelRecord, NodeId, NodeKind, PhraseFunction};

use crate::baseline::Baseline;
use crate::complements::{ComplementKind, ComplementVerdict};
use crate::objects::ObjectKindSet;
use crate::rules::{RuleBook, RuleId};
use crate::scanner::{ClauseScan, Constituent};

/// The rules that apply to every verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GenericRule {
    Pdos,
    PdosX,
    Ndos,
    NdosX,
    Dos,
    Ldos,
    Kdos,
    IndsC,
    LocsC,
    IndsP,
    LocsP,
    Cdos,
    CdosX,
    Idos,
    IdosX,
}

impl GenericRule {
    pub const ALL: [GenericRule; 15] = [
        GenericRule::Pdos,
        GenericRule::PdosX,
        GenericRule::Ndos,
        GenericRule::NdosX,
        GenericRule::Dos,
        GenericRule::Ldos,
        GenericRule::Kdos,
        GenericRule::IndsC,
        GenericRule::LocsC,
        GenericRule::IndsP,
        GenericRule::LocsP,
        GenericRule::Cdos,
        GenericRule::CdosX,
        GenericRule::Idos,
        GenericRule::IdosX,
    ];

    pub fn id(self) -> &'static str {
        match self {
            GenericRule::Pdos => "pdos",
            GenericRule::PdosX => "pdos-x",
            GenericRule::Ndos => "ndos",
            GenericRule::NdosX => "ndos-x",
            GenericRule::Dos => "dos",
            GenericRule::Ldos => "ldos",
            GenericRule::Kdos => "kdos",
            GenericRule::IndsC => "inds-c",
            GenericRule::LocsC => "locs-c",
            GenericRule::IndsP => "inds-p",
            GenericRule::LocsP => "locs-p",
            GenericRule::Cdos => "cdos",
            GenericRule::CdosX => "cdos-x",
            GenericRule::Idos => "idos",
            GenericRule::IdosX => "idos-x",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GenericRule::Pdos => "direct_object => principal_direct_object",
            GenericRule::PdosX => "non-object => principal_direct_object",
            GenericRule::Ndos => "direct_object => NP_direct_object",
            GenericRule::NdosX => "non-object => NP_direct_object",
            GenericRule::Dos => "non-object => direct_object",
            GenericRule::Ldos => "non-object => L_object",
            GenericRule::Kdos => "non-object => K_object",
            GenericRule::IndsC => "complement => indirect_object",
            GenericRule::LocsC => "complement => location",
            GenericRule::IndsP => "predicate complement => indirect_object",
            GenericRule::LocsP => "predicate complement => location",
            GenericRule::Cdos => "direct-object =(superfluously)=> direct object (clause)",
            GenericRule::CdosX => "non-object => direct object (clause)",
            GenericRule::Idos => "infinitive_object =(superfluously)=> infinitive_object (clause)",
            GenericRule::IdosX => "infinitive clause => infinitive_object",
        }
    }
}

impl fmt::Display for GenericRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id(), self.description())
    }
}

/// The generated record of one constituent and the rules that shaped it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrichment {
    pub node: NodeId,
    #[serde(serialize_with = "serialize_kind")]
    pub kind: NodeKind,
    pub record: LabelRecord,
    pub generic: Option<GenericRule>,
    pub specific: Vec<RuleId>,
}

fn serialize_kind<S: serde::Serializer>(kind: &NodeKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    Generic,
    Specific,
}

impl RuleScope {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleScope::Generic => "generic",
            RuleScope::Specific => "specific",
        }
    }
}

/// How often each rule fired. Keeps the smallest node ids as samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTally {
    cases: BTreeMap<(RuleScope, NodeKind, String), (usize, BTreeSet<NodeId>)>,
}

impl RuleTally {
    pub const SAMPLES: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, scope: RuleScope, kind: NodeKind, rule: &str, node: NodeId) {
        let (count, samples) = self.cases.entry((scope, kind, rule.to_string())).or_default();
        *count += 1;
        samples.insert(node);
        if samples.len() > Self::SAMPLES {
            samples.pop_last();
        }
    }

    /// Order independent: merging in any order gives the same tally.
    pub fn merge(&mut self, other: RuleTally) {
        for (key, (count, samples)) in other.cases {
            let (total, kept) = self.cases.entry(key).or_default();
            *total += count;
            kept.extend(samples);
            while kept.len() > Self::SAMPLES {
                kept.pop_last();
            }
        }
    }

    pub fn count(&self, scope: RuleScope, kind: NodeKind, rule: &str) -> usize {
        self.cases
            .get(&(scope, kind, rule.to_string()))
            .map_or(0, |(count, _)| *count)
    }

    pub fn samples(&self, scope: RuleScope, kind: NodeKind, rule: &str) -> Vec<NodeId> {
        self.cases
            .get(&(scope, kind, rule.to_string()))
            .map(|(_, samples)| samples.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.cases.values().map(|(count, _)| count).sum()
    }

    /// One line per rule: scope, kind, count, rule and sample nodes.
    pub fn render(&self) -> Vec<String> {
        self.cases
            .iter()
            .map(|((scope, kind, rule), (count, samples))| {
                let description = match scope {
                    RuleScope::Generic => GenericRule::ALL
                        .into_iter()
                        .find(|g| g.id() == rule)
                        .map_or_else(|| rule.clone(), |g| g.to_string()),
                    RuleScope::Specific => rule.clone(),
                };
                let nodes: Vec<String> = samples.iter().map(ToString::to_string).collect();
                format!(
                    "{:<8} {:<6} {:>6} x {}: {}",
                    scope.as_str(),
                    kind.as_str(),
                    count,
                    description,
                    nodes.join(" "),
                )
            })
            .collect()
    }
}

/// Baseline record, then generic object and complement rules, then the verb rules
/// in order.
pub struct EnrichmentRuleEngine<'a> {
    baseline: &'a Baseline,
    rules: &'a RuleBook,
    lexicon: &'a Lexicon,
}

impl<'a> EnrichmentRuleEngine<'a> {
    pub fn new(baseline: &'a Baseline, rules: &'a RuleBook, lexicon: &'a Lexicon) -> Self {
        Self {
            baseline,
            rules,
            lexicon,
        }
    }

    pub fn enrich_clause(
        &self,
        scan: &ClauseScan,
        objects: &ObjectKindSet,
        complements: &BTreeMap<NodeId, ComplementVerdict>,
        lexeme: &str,
        tally: &mut RuleTally,
    ) -> Vec<Enrichment> {
        let enrichments: Vec<Enrichment> = scan
            .constituents()
            .map(|c| self.enrich(&c, objects, complements, lexeme, tally))
            .collect();
        debug!(clause = %scan.clause, lexeme, constituents = enrichments.len(), "enriched clause");
        enrichments
    }

    pub fn enrich(
        &self,
        constituent: &Constituent<'_>,
        objects: &ObjectKindSet,
        complements: &BTreeMap<NodeId, ComplementVerdict>,
        lexeme: &str,
        tally: &mut RuleTally,
    ) -> Enrichment {
        let id = constituent.id();
        let kind = constituent.kind();

        let baseline = match constituent {
            Constituent::Phrase(p) => self.baseline.phrase(p.function),
            Constituent::Clause(c) => self.baseline.clause(&c.typ, &c.rela),
        };
        let (mut record, generic) = match constituent {
            Constituent::Phrase(p) => generic_phrase(baseline, id, p.function, objects, complements.get(&id)),
            Constituent::Clause(_) => generic_clause(baseline, id, objects),
        };
        if let Some(rule) = generic {
            tally.record(RuleScope::Generic, kind, rule.id(), id);
        }

        let mut specific = Vec::new();
        for (i, rule) in self.rules.rules(kind, lexeme).iter().enumerate() {
            if !rule.matches(self.lexicon, constituent) {
                continue;
            }
            for (field, value) in &rule.assignments {
                record = record.with(*field, value.as_str());
            }
            let rule_id = RuleId {
                lexeme: lexeme.to_string(),
                number: i + 1,
            };
            tally.record(RuleScope::Specific, kind, &rule_id.to_string(), id);
            specific.push(rule_id);
        }

        Enrichment {
            node: id,
            kind,
            record,
            generic,
            specific,
        }
    }
}

/// Rewrites `grammatical` and keeps the old value in `original`, unless the old
/// value already was `unchanged_from`.
fn regrade(
    record: LabelRecord,
    value: &str,
    unchanged_from: Option<&str>,
    same: GenericRule,
    changed: GenericRule,
) -> (LabelRecord, Option<GenericRule>) {
    let old = record.grammatical.clone();
    if unchanged_from == Some(old.as_str()) {
        (record.with(Field::Grammatical, value), Some(same))
    } else {
        let record = record.with(Field::Original, old).with(Field::Grammatical, value);
        (record, Some(changed))
    }
}

fn generic_phrase(
    record: LabelRecord,
    id: NodeId,
    function: PhraseFunction,
    objects: &ObjectKindSet,
    verdict: Option<&ComplementVerdict>,
) -> (LabelRecord, Option<GenericRule>) {
    let direct = Some(grammatical::DIRECT_OBJECT);
    if objects.principal == Some(id) {
        return regrade(
            record,
            grammatical::PRINCIPAL_DIRECT_OBJECT,
            direct,
            GenericRule::Pdos,
            GenericRule::PdosX,
        );
    }
    if objects.np.contains(&id) {
        return regrade(
            record,
            grammatical::NP_DIRECT_OBJECT,
            direct,
            GenericRule::Ndos,
            GenericRule::NdosX,
        );
    }
    if objects.direct.contains(&id) {
        if record.grammatical == grammatical::DIRECT_OBJECT {
            return (record, None);
        }
        return regrade(record, grammatical::DIRECT_OBJECT, None, GenericRule::Dos, GenericRule::Dos);
    }
    if objects.l.contains(&id) {
        return regrade(record, grammatical::L_OBJECT, None, GenericRule::Ldos, GenericRule::Ldos);
    }
    if objects.k.contains(&id) {
        return regrade(record, grammatical::K_OBJECT, None, GenericRule::Kdos, GenericRule::Kdos);
    }

    let Some(verdict) = verdict else {
        return (record, None);
    };
    let predicative = match function {
        PhraseFunction::Cmpl => false,
        PhraseFunction::PreC => true,
        _ => return (record, None),
    };
    match (verdict.kind, predicative) {
        (ComplementKind::IndirectObject, false) => (
            record.with(Field::Grammatical, grammatical::INDIRECT_OBJECT),
            Some(GenericRule::IndsC),
        ),
        (ComplementKind::IndirectObject, true) => (
            record.with(Field::Grammatical, grammatical::INDIRECT_OBJECT),
            Some(GenericRule::IndsP),
        ),
        (ComplementKind::Locative, predicative) => (
            record
                .with(Field::Lexical, semantic::LOCATION)
                .with(Field::Semantic, semantic::LOCATION),
            Some(if predicative { GenericRule::LocsP } else { GenericRule::LocsC }),
        ),
        (ComplementKind::Complement, _) => (record, None),
    }
}

fn generic_clause(record: LabelRecord, id: NodeId, objects: &ObjectKindSet) -> (LabelRecord, Option<GenericRule>) {
    if objects.clause.contains(&id) {
        return regrade(
            record,
            grammatical::DIRECT_OBJECT,
            Some(grammatical::DIRECT_OBJECT),
            GenericRule::Cdos,
            GenericRule::CdosX,
        );
    }
    if objects.infinitive.contains(&id) {
        return regrade(
            record,
            grammatical::INFINITIVE_OBJECT,
            Some(grammatical::INFINITIVE_OBJECT),
            GenericRule::Idos,
            GenericRule::IdosX,
        );
    }
    (record, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complements::ComplementClassifier;
    use crate::corrections::Corrections;
    use crate::objects::ObjectResolver;
    use crate::scanner::ConstituentScanner;
    use crate::testing::*;
    use crate::vocabulary::Vocabulary;
    use valence_corpus::CorpusBuilder;

    struct Fixture {
        baseline: Baseline,
        rules: RuleBook,
        lexicon: Lexicon,
    }

    impl Fixture {
        fn new() -> Self {
            let vocabulary = Vocabulary::standard().unwrap();
            Self {
                baseline: Baseline::standard(&vocabulary).unwrap(),
                rules: RuleBook::standard(),
                lexicon: Lexicon::standard(),
            }
        }

        fn run(&self, b: CorpusBuilder, clause: NodeId, lexeme: &str) -> (Vec<Enrichment>, RuleTally) {
            let corpus = load(b);
            let corrections = Corrections::new();
            let scan = ConstituentScanner::new(&corpus, &corrections).scan(clause);
            let objects = ObjectResolver::new(&self.lexicon).resolve(&scan);
            let complements = ComplementClassifier::new(&self.lexicon).classify_clause(&scan, &objects);
            let engine = EnrichmentRuleEngine::new(&self.baseline, &self.rules, &self.lexicon);
            let mut tally = RuleTally::new();
            let enrichments = engine.enrich_clause(&scan, &objects, &complements, lexeme, &mut tally);
            (enrichments, tally)
        }
    }

    fn record_of(enrichments: &[Enrichment], node: NodeId) -> &Enrichment {
        enrichments.iter().find(|e| e.node == node).unwrap()
    }

    #[test]
    fn test_double_object_clause() {
        let fx = Fixture::new();
        let mut b = builder();
        let c = b.clause("WayX", "NA");
        let v = b.verb("FJM[", "qal");
        let pred = b.phrase(PhraseFunction::Pred, vec![v]);
        let words = vec![b.word(">T", valence_protocol::PartOfSpeech::Prep), noun(&mut b, "<BD/")];
        let first = b.phrase(PhraseFunction::Objc, words);
        let words = vec![noun(&mut b, "MLK/")];
        let second = b.phrase(PhraseFunction::Objc, words);
        let words = vec![prep(&mut b, "B"), noun(&mut b, "BJT/")];
        let place = b.phrase(PhraseFunction::Cmpl, words);

        let (enrichments, tally) = fx.run(b, c, "FJM");

        let principal = record_of(&enrichments, first);
        assert_eq!(principal.record.grammatical, grammatical::PRINCIPAL_DIRECT_OBJECT);
        assert_eq!(principal.record.original, "");
        assert_eq!(principal.generic, Some(GenericRule::Pdos));

        let np = record_of(&enrichments, second);
        assert_eq!(np.record.grammatical, grammatical::NP_DIRECT_OBJECT);
        assert_eq!(np.generic, Some(GenericRule::Ndos));

        let location = record_of(&enrichments, place);
        assert_eq!(location.generic, Some(GenericRule::LocsC));
        assert_eq!(location.record.semantic, semantic::LOCATION);
        // the verb rule for locative lexemes fires on top of the generic one
        assert_eq!(location.specific, vec![RuleId { lexeme: "FJM".to_string(), number: 3 }]);

        let verb = record_of(&enrichments, pred);
        assert_eq!(verb.record.predication, "regular");
        assert_eq!(verb.generic, None);

        assert_eq!(tally.count(RuleScope::Generic, NodeKind::Phrase, "pdos"), 1);
        assert_eq!(tally.count(RuleScope::Specific, NodeKind::Phrase, "FJM-3"), 1);
        assert_eq!(tally.samples(RuleScope::Generic, NodeKind::Phrase, "ndos"), vec![second]);
    }

    #[test]
    fn test_l_object_keeps_original() {
        let fx = Fixture::new();
        let mut b = builder();
        let c = b.clause("WayX", "NA");
        let v = b.verb("FJM[", "qal");
        b.phrase(PhraseFunction::PreO, vec![v]);
        let words = vec![prep(&mut b, "L"), noun(&mut b, "<BD/")];
        let l_obj = b.phrase(PhraseFunction::Cmpl, words);

        let (enrichments, _) = fx.run(b, c, "FJM");
        let l = record_of(&enrichments, l_obj);
        assert_eq!(l.generic, Some(GenericRule::Ldos));
        assert_eq!(l.record.grammatical, grammatical::L_OBJECT);
        assert_eq!(l.record.original, grammatical::COMPLEMENT);
    }

    #[test]
    fn test_indirect_object_and_benefactive() {
        let fx = Fixture::new();
        let mut b = builder();
        let c = b.clause("WayX", "NA");
        let v = b.verb("NTN[", "qal");
        b.phrase(PhraseFunction::Pred, vec![v]);
        let words = vec![prep(&mut b, ">L"), noun(&mut b, ">JC/")];
        let to = b.phrase(PhraseFunction::Cmpl, words);
        let words = vec![prep(&mut b, "L"), noun(&mut b, ">JC/")];
        let adjunct = b.phrase(PhraseFunction::Adju, words);

        let (enrichments, _) = fx.run(b.clone(), c, "NTN");
        let indirect = record_of(&enrichments, to);
        assert_eq!(indirect.generic, Some(GenericRule::IndsC));
        assert_eq!(indirect.record.grammatical, grammatical::INDIRECT_OBJECT);
        assert!(record_of(&enrichments, adjunct).specific.is_empty());

        let (enrichments, _) = fx.run(b, c, "CJT");
        let benefactive = record_of(&enrichments, adjunct);
        assert_eq!(benefactive.record.semantic, semantic::BENEFACTIVE);
        assert_eq!(benefactive.specific.len(), 1);
    }

    #[test]
    fn test_object_clause_rules() {
        let fx = Fixture::new();
        let mut b = builder();
        b.sentence();
        let c = b.clause("WayX", "NA");
        let v = b.verb("R>H[", "qal");
        b.phrase(PhraseFunction::Pred, vec![v]);
        let object = b.clause("xYqX", "Objc");
        b.mother(object, c);

        let (enrichments, tally) = fx.run(b, c, "R>H");
        let clause = record_of(&enrichments, object);
        assert_eq!(clause.kind, NodeKind::Clause);
        assert_eq!(clause.generic, Some(GenericRule::Cdos));
        assert_eq!(clause.record.grammatical, grammatical::DIRECT_OBJECT);
        assert_eq!(tally.count(RuleScope::Generic, NodeKind::Clause, "cdos"), 1);
    }

    #[test]
    fn test_tally_merge_is_commutative() {
        let mut a = RuleTally::new();
        let mut b = RuleTally::new();
        for i in 0..8 {
            a.record(RuleScope::Generic, NodeKind::Phrase, "dos", NodeId(100 - i));
            b.record(RuleScope::Generic, NodeKind::Phrase, "dos", NodeId(i));
        }
        b.record(RuleScope::Specific, NodeKind::Phrase, "CJT-1", NodeId(7));

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b;
        ba.merge(a);
        assert_eq!(ab, ba);
        assert_eq!(ab.count(RuleScope::Generic, NodeKind::Phrase, "dos"), 16);
        assert_eq!(ab.samples(RuleScope::Generic, NodeKind::Phrase, "dos").len(), RuleTally::SAMPLES);
        assert_eq!(ab.total(), 17);
        assert!(ab.render()[0].contains("dos-non-object => direct_object"));
    }
}
