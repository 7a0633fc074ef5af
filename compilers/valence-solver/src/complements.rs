use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use valence_lexicon::{Lexicon, INDIRECT_PREPOSITIONS, PREPOSITION_B};
use valence_protocol::{NodeId, Word, WordFlags};

use crate::objects::ObjectKindSet;
use crate::scanner::ClauseScan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ComplementKind {
    Locative,
    IndirectObject,
    Complement,
}

impl ComplementKind {
    pub fn symbol(self) -> char {
        match self {
            ComplementKind::Locative => 'L',
            ComplementKind::IndirectObject => 'I',
            ComplementKind::Complement => 'C',
        }
    }
}

impl fmt::Display for ComplementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplementVerdict {
    /// Locativity score.
    pub loca: u32,
    /// Indirect object score.
    pub indi: u32,
    pub kind: ComplementKind,
}

/// Weighs locative against indirect object evidence in the words of a complement.
pub struct ComplementClassifier<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> ComplementClassifier<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn classify(&self, words: &[Word]) -> ComplementVerdict {
        let loca = self.locativity(words);
        let indi = self.indirectness(words);
        ComplementVerdict {
            loca,
            indi,
            kind: Self::decide(loca, indi),
        }
    }

    /// The decision table. The order of the arms matters.
    pub fn decide(loca: u32, indi: u32) -> ComplementKind {
        if loca == 0 && indi > 0 {
            ComplementKind::IndirectObject
        } else if loca > 0 && indi == 0 {
            ComplementKind::Locative
        } else if loca > indi + 1 {
            ComplementKind::Locative
        } else if loca + 1 < indi {
            ComplementKind::IndirectObject
        } else {
            ComplementKind::Complement
        }
    }

    /// Verdicts for the complement phrases of a clause that are not objects.
    pub fn classify_clause(
        &self,
        scan: &ClauseScan,
        objects: &ObjectKindSet,
    ) -> BTreeMap<NodeId, ComplementVerdict> {
        scan.phrases
            .iter()
            .filter(|p| p.function.is_complement() && objects.kind_of(p.id).is_none())
            .map(|p| (p.id, self.classify(&p.words)))
            .collect()
    }

    fn locativity(&self, words: &[Word]) -> u32 {
        let lexemes: BTreeSet<&str> = words.iter().map(|w| w.lex.as_str()).collect();

        let locatives = lexemes.iter().filter(|lex| self.lexicon.is_locative(lex)).count();
        let b = usize::from(lexemes.contains(PREPOSITION_B));
        let toponyms = count_flag(words, WordFlags::TOPONYM);
        let directional = count_flag(words, WordFlags::DIRECTIONAL);
        let body_part = if self.lexicon.is_body_part_idiom(words) { 2 } else { 0 };

        (locatives + b + toponyms + directional + body_part) as u32
    }

    fn indirectness(&self, words: &[Word]) -> u32 {
        let mut indi = 0;
        for (i, word) in words.iter().enumerate() {
            if !INDIRECT_PREPOSITIONS.contains(&word.lex.as_str()) {
                continue;
            }
            if word.flags().contains(WordFlags::PRONOMINAL_SUFFIX) {
                indi += 1;
            }
            if words.get(i + 1).is_some_and(|next| self.is_personal_referent(next)) {
                indi += 1;
            }
        }
        indi
    }

    fn is_personal_referent(&self, word: &Word) -> bool {
        let flags = word.flags();
        self.lexicon.is_personal(&word.lex)
            || flags.contains(WordFlags::GENTILIC)
            || flags.contains(WordFlags::PROPER_NOUN | WordFlags::PERSON_NAME)
    }
}

fn count_flag(words: &[Word], flag: WordFlags) -> usize {
    words.iter().filter(|w| w.flags().contains(flag)).count()
}

/// Per-verdict totals, for the stage log.
pub fn tally<'v>(verdicts: impl IntoIterator<Item = &'v ComplementVerdict>) -> BTreeMap<ComplementKind, usize> {
    let mut counts = BTreeMap::new();
    for verdict in verdicts {
        *counts.entry(verdict.kind).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use valence_protocol::PartOfSpeech;

    fn word(id: u32, lex: &str, sp: PartOfSpeech) -> Word {
        Word::new(NodeId(id), lex, lex, sp)
    }

    fn classify(words: &[Word]) -> ComplementVerdict {
        ComplementClassifier::new(&Lexicon::standard()).classify(words)
    }

    #[test]
    fn test_decision_table() {
        use ComplementKind::*;
        assert_eq!(ComplementClassifier::decide(0, 0), Complement);
        assert_eq!(ComplementClassifier::decide(2, 0), Locative);
        assert_eq!(ComplementClassifier::decide(0, 3), IndirectObject);
        assert_eq!(ComplementClassifier::decide(3, 2), Complement);
        assert_eq!(ComplementClassifier::decide(2, 3), Complement);
        assert_eq!(ComplementClassifier::decide(3, 1), Locative);
        assert_eq!(ComplementClassifier::decide(1, 3), IndirectObject);
    }

    #[test]
    fn test_locative_phrase() {
        // "in the house"
        let words = [word(1, "B", PartOfSpeech::Prep), word(2, "BJT/", PartOfSpeech::Subs)];
        let verdict = classify(&words);
        assert_eq!((verdict.loca, verdict.indi), (2, 0));
        assert_eq!(verdict.kind, ComplementKind::Locative);
    }

    #[test]
    fn test_repeated_b_counts_once() {
        let words = [
            word(1, "B", PartOfSpeech::Prep),
            word(2, "MLK/", PartOfSpeech::Subs),
            word(3, "B", PartOfSpeech::Prep),
            word(4, "MLK/", PartOfSpeech::Subs),
        ];
        assert_eq!(classify(&words).loca, 1);
    }

    #[test]
    fn test_recipient_phrase() {
        // "to the man": preposition without suffix, followed by a personal lexeme
        let words = [word(1, "L", PartOfSpeech::Prep), word(2, ">JC/", PartOfSpeech::Subs)];
        let verdict = classify(&words);
        assert_eq!((verdict.loca, verdict.indi), (0, 1));
        assert_eq!(verdict.kind, ComplementKind::IndirectObject);

        // "to him"
        let mut l = word(3, "L", PartOfSpeech::Prep);
        l.prs = Some("W".to_string());
        assert_eq!(classify(&[l]).indi, 1);
    }

    #[test]
    fn test_named_and_gentilic_referents() {
        let mut name = word(2, "MCH=/", PartOfSpeech::Nmpr);
        name.nametype = Some("pers".to_string());
        let mut people = word(4, "MYRJ/", PartOfSpeech::Subs);
        people.ls = Some("gntl".to_string());
        let words = [word(1, ">L", PartOfSpeech::Prep), name, word(3, "L", PartOfSpeech::Prep), people];
        assert_eq!(classify(&words).indi, 2);
    }

    #[test]
    fn test_body_part_idiom_is_locative() {
        let words = [word(1, "L", PartOfSpeech::Prep), word(2, "PNH/", PartOfSpeech::Subs)];
        let verdict = classify(&words);
        assert_eq!(verdict.loca, 2);
        assert_eq!(verdict.kind, ComplementKind::Locative);
    }

    #[test]
    fn test_toponym_and_directional() {
        let mut place = word(1, "GRR/", PartOfSpeech::Nmpr);
        place.nametype = Some("topo".to_string());
        place.uvf = Some("H".to_string());
        let verdict = classify(&[place]);
        assert_eq!(verdict.loca, 2);

        // a locative lexeme that is also a toponym scores twice
        let mut egypt = word(2, "MYRJM/", PartOfSpeech::Nmpr);
        egypt.nametype = Some("topo".to_string());
        assert_eq!(classify(&[egypt]).loca, 2);
    }

    #[test]
    fn test_tally() {
        let a = ComplementVerdict { loca: 1, indi: 0, kind: ComplementKind::Locative };
        let b = ComplementVerdict { loca: 0, indi: 0, kind: ComplementKind::Complement };
        let counts = tally([&a, &a, &b]);
        assert_eq!(counts[&ComplementKind::Locative], 2);
        assert_eq!(counts[&ComplementKind::Complement], 1);
    }

    fn arb_word() -> impl Strategy<Value = Word> {
        let lexemes = prop::sample::select(vec!["L", ">L", "B", "BJT/", ">JC/", "PNH/", "MLK/", "CM"]);
        (1u32..100, lexemes, prop::option::of(prop::sample::select(vec!["W", "absent", "n/a"])), any::<bool>())
            .prop_map(|(id, lex, prs, directional)| {
                let mut w = Word::new(NodeId(id), lex, lex, PartOfSpeech::Subs);
                w.prs = prs.map(str::to_string);
                if directional {
                    w.uvf = Some("H".to_string());
                }
                w
            })
    }

    proptest! {
        #[test]
        fn prop_verdict_is_pure(words in prop::collection::vec(arb_word(), 0..6)) {
            let first = classify(&words);
            let second = classify(&words.clone());
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.kind, ComplementClassifier::decide(first.loca, first.indi));
        }

        #[test]
        fn prop_decision_margins(loca in 0u32..8, indi in 0u32..8) {
            let kind = ComplementClassifier::decide(loca, indi);
            if loca > 0 && indi > 0 && loca.abs_diff(indi) <= 1 {
                prop_assert_eq!(kind, ComplementKind::Complement);
            }
            if loca == 0 && indi == 0 {
                prop_assert_eq!(kind, ComplementKind::Complement);
            }
            if kind == ComplementKind::Locative {
                prop_assert!(loca > indi);
            }
            if kind == ComplementKind::IndirectObject {
                prop_assert!(indi > loca);
            }
        }
    }
}
