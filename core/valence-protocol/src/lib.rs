pub mod ids;
pub mod label;
pub mod model;
pub mod morphology;
pub mod sense;

// Re-export core types for convenience
pub use ids::NodeId;
pub use label::{Field, LabelRecord, BLANK_TOKEN, NA};
pub use model::*;
pub use morphology::*;
pub use sense::*;

#[cfg(test)]
mod tests {
    use super::*;
    use rkyv::{from_bytes, to_bytes};

    fn tiny_snapshot() -> CorpusSnapshot {
        let mut verb = Word::new(NodeId(1), "NTN", "NTN[", PartOfSpeech::Verb);
        verb.vs = Some("qal".to_string());
        CorpusSnapshot {
            version: "c".to_string(),
            books: vec![Book {
                id: NodeId(100),
                name: "Genesis".to_string(),
                chapters: vec![Chapter {
                    id: NodeId(101),
                    number: 1,
                    verses: vec![Verse {
                        id: NodeId(102),
                        number: 29,
                        sentences: vec![Sentence {
                            id: NodeId(103),
                            clauses: vec![Clause {
                                id: NodeId(104),
                                typ: "WayX".to_string(),
                                rela: "NA".to_string(),
                                mother: None,
                                phrases: vec![Phrase {
                                    id: NodeId(105),
                                    function: PhraseFunction::Pred,
                                    typ: "VP".to_string(),
                                    words: vec![verb],
                                }],
                            }],
                        }],
                    }],
                }],
            }],
        }
    }

    #[test]
    fn test_snapshot_archive() {
        let original = tiny_snapshot();

        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize snapshot");
        let restored: CorpusSnapshot = from_bytes(&bytes).expect("Failed to deserialize snapshot");

        let phrase = &restored.books[0].chapters[0].verses[0].sentences[0].clauses[0].phrases[0];
        assert_eq!(phrase.function, PhraseFunction::Pred);
        assert_eq!(phrase.words[0].vs.as_deref(), Some("qal"));
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<NodeId>(), 4);
    }

    #[test]
    fn test_function_codes() {
        assert_eq!("PreO".parse::<PhraseFunction>(), Ok(PhraseFunction::PreO));
        assert_eq!(PhraseFunction::BoundErr.as_str(), "BoundErr");
        assert!("Obj".parse::<PhraseFunction>().is_err());
        assert_eq!(PhraseFunction::ALL.len(), 31);
        assert!(PhraseFunction::PtcO.is_object() && PhraseFunction::PtcO.is_predicate());
    }

    #[test]
    fn test_word_flags() {
        let mut w = Word::new(NodeId(7), "LW", "L", PartOfSpeech::Prep);
        w.prs = Some("W".to_string());
        assert!(w.flags().contains(WordFlags::PRONOMINAL_SUFFIX));

        w.prs = Some("absent".to_string());
        assert!(!w.flags().contains(WordFlags::PRONOMINAL_SUFFIX));

        let mut place = Word::new(NodeId(8), "MYRJMH", "MYRJM/", PartOfSpeech::Nmpr);
        place.uvf = Some("H".to_string());
        place.nametype = Some("topo".to_string());
        assert_eq!(
            place.flags(),
            WordFlags::DIRECTIONAL | WordFlags::TOPONYM | WordFlags::PROPER_NOUN
        );
    }

    #[test]
    fn test_sense_alphabet() {
        for code in SenseLabel::ALPHABET {
            let label: SenseLabel = code.parse().expect("alphabet member must parse");
            assert_eq!(label.to_string(), code);
        }
        // well formed characters, but not a label the flowchart emits
        assert!("n-".parse::<SenseLabel>().is_err());
    }

    #[test]
    fn test_record_is_rebuilt_not_mutated() {
        let base = LabelRecord::from_values(&["complement", "NA", "*", "", "", ""]);
        let next = base.with(Field::Grammatical, label::grammatical::L_OBJECT);
        assert_eq!(base.grammatical, "*");
        assert_eq!(next.grammatical, "L_object");
        assert_eq!(next.to_string(), "complement;NA;L_object;;;");
    }
}
