//! Fixture helpers shared by the unit tests.

use valence_corpus::{Corpus, CorpusBuilder};
use valence_protocol::{PartOfSpeech, Word};

pub fn builder() -> CorpusBuilder {
    CorpusBuilder::new("test")
}

pub fn load(builder: CorpusBuilder) -> Corpus {
    Corpus::from_snapshot(&builder.build()).expect("fixture corpus is consistent")
}

pub fn noun(b: &mut CorpusBuilder, lex: &str) -> Word {
    b.word(lex, PartOfSpeech::Subs)
}

pub fn prep(b: &mut CorpusBuilder, lex: &str) -> Word {
    b.word(lex, PartOfSpeech::Prep)
}

pub fn suffixed(mut word: Word, prs: &str) -> Word {
    word.prs = Some(prs.to_string());
    word
}
