//! Lexeme handling: canonical verb lexemes and the closed word lists that the
//! object and complement heuristics consult.

use std::collections::HashSet;

use valence_protocol::Word;

mod lists;

/// The object marker `>T`.
pub const OBJECT_MARKER: &str = ">T";
/// Preposition `B` (in, at), evidence for a locative.
pub const PREPOSITION_B: &str = "B";
/// Preposition `L` (to, for).
pub const PREPOSITION_L: &str = "L";
/// Preposition `K` (as, like).
pub const PREPOSITION_K: &str = "K";
/// Preposition `>L` (to, towards).
pub const PREPOSITION_EL: &str = ">L";

/// Prepositions that turn a complement into a K- or L-object.
pub const OBJECT_PREPOSITIONS: [&str; 2] = [PREPOSITION_K, PREPOSITION_L];
/// Prepositions that introduce an indirect object.
pub const INDIRECT_PREPOSITIONS: [&str; 2] = [PREPOSITION_L, PREPOSITION_EL];

const PARADIGM_MARKERS: [char; 2] = ['[', '='];

/// Strips the paradigm markers (`[` for verbs, `=` for homonym numbering) from a verb lexeme.
///
/// `NTN[` becomes `NTN`, `BR>=[` becomes `BR>`. Nominal lexemes keep their markers:
/// the word lists below spell them out in full (`>RY/`, `<YM==/`).
pub fn verb_lexeme(raw: &str) -> &str {
    raw.trim_end_matches(&PARADIGM_MARKERS[..])
}

/// The lexical sets used by the valence heuristics.
#[derive(Debug, Clone)]
pub struct Lexicon {
    body_parts: HashSet<String>,
    locatives: HashSet<String>,
    personals: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::standard()
    }
}

impl Lexicon {
    /// The lists compiled into the engine.
    pub fn standard() -> Self {
        Self {
            body_parts: to_set(lists::BODY_PARTS),
            locatives: to_set(lists::LOCATIVES),
            personals: to_set(lists::PERSONALS),
        }
    }

    pub fn is_body_part(&self, lex: &str) -> bool {
        self.body_parts.contains(lex)
    }

    pub fn is_locative(&self, lex: &str) -> bool {
        self.locatives.contains(lex)
    }

    pub fn is_personal(&self, lex: &str) -> bool {
        self.personals.contains(lex)
    }

    /// `L` followed by a body part forms an idiom ("at the hand of", "before the face of")
    /// rather than an object or a recipient.
    pub fn is_body_part_idiom(&self, words: &[Word]) -> bool {
        match words {
            [first, second, ..] => first.lex == PREPOSITION_L && self.is_body_part(&second.lex),
            _ => false,
        }
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (self.body_parts.len(), self.locatives.len(), self.personals.len())
    }
}

fn to_set(list: &str) -> HashSet<String> {
    list.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use valence_protocol::{NodeId, PartOfSpeech};

    #[test]
    fn test_verb_lexeme() {
        assert_eq!(verb_lexeme("NTN["), "NTN");
        assert_eq!(verb_lexeme("BR>=["), "BR>");
        assert_eq!(verb_lexeme("<FH["), "<FH");
        assert_eq!(verb_lexeme("QR>"), "QR>");
    }

    #[test]
    fn test_standard_lists() {
        let lexicon = Lexicon::standard();
        assert!(lexicon.is_body_part("JD/"));
        assert!(lexicon.is_body_part("<YM==/"));
        assert!(lexicon.is_locative("BJT/"));
        assert!(lexicon.is_locative("CM"));
        assert!(lexicon.is_personal(">JC/"));
        assert!(!lexicon.is_personal("JD/"));
        let (body, loc, pers) = lexicon.counts();
        assert!(body > 50 && loc > 40 && pers > 250);
    }

    #[test]
    fn test_body_part_idiom() {
        let lexicon = Lexicon::standard();
        let l = Word::new(NodeId(1), "L", "L", PartOfSpeech::Prep);
        let face = Word::new(NodeId(2), "PNJ", "PNH/", PartOfSpeech::Subs);
        let king = Word::new(NodeId(3), "MLK", "MLK/", PartOfSpeech::Subs);
        assert!(lexicon.is_body_part_idiom(&[l.clone(), face]));
        assert!(!lexicon.is_body_part_idiom(&[l.clone(), king]));
        assert!(!lexicon.is_body_part_idiom(&[l]));
    }

    proptest! {
        #[test]
        fn test_verb_lexeme_is_canonical(stem in "[A-Z<>]{1,4}", markers in "[\\[=]{0,3}") {
            let raw = format!("{}{}", stem, markers);
            let canonical = verb_lexeme(&raw);
            prop_assert_eq!(canonical, stem.as_str());
            prop_assert_eq!(verb_lexeme(canonical), canonical);
        }
    }
}
