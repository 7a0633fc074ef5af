use std::collections::HashMap;

use valence_protocol::{
    Book, Chapter, Clause, CorpusSnapshot, NodeId, PartOfSpeech, Phrase, PhraseFunction, Sentence,
    Verse, Word,
};

/// Incremental construction of a [`CorpusSnapshot`], mainly for fixtures.
///
/// Ids are handed out in creation order, so creating nodes in reading order
/// yields ids that agree with corpus order. Missing containers are created on
/// demand (`Genesis 1:1`, one sentence).
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    snapshot: CorpusSnapshot,
    mothers: HashMap<NodeId, NodeId>,
    next_id: u32,
}

impl CorpusBuilder {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            snapshot: CorpusSnapshot {
                version: version.into(),
                books: Vec::new(),
            },
            mothers: HashMap::new(),
            next_id: 1,
        }
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn book(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.allocate();
        self.snapshot.books.push(Book {
            id,
            name: name.into(),
            chapters: Vec::new(),
        });
        id
    }

    pub fn chapter(&mut self, number: u32) -> NodeId {
        let id = self.allocate();
        self.current_book().chapters.push(Chapter {
            id,
            number,
            verses: Vec::new(),
        });
        id
    }

    pub fn verse(&mut self, number: u32) -> NodeId {
        let id = self.allocate();
        self.current_chapter().verses.push(Verse {
            id,
            number,
            sentences: Vec::new(),
        });
        id
    }

    pub fn sentence(&mut self) -> NodeId {
        let id = self.allocate();
        self.current_verse().sentences.push(Sentence {
            id,
            clauses: Vec::new(),
        });
        id
    }

    pub fn clause(&mut self, typ: &str, rela: &str) -> NodeId {
        let id = self.allocate();
        self.current_sentence().clauses.push(Clause {
            id,
            typ: typ.to_string(),
            rela: rela.to_string(),
            mother: None,
            phrases: Vec::new(),
        });
        id
    }

    /// Record that `clause` depends on `mother`. Applied at [`build`](Self::build).
    pub fn mother(&mut self, clause: NodeId, mother: NodeId) {
        self.mothers.insert(clause, mother);
    }

    /// A fresh word. Its text is the lexeme without paradigm markers; adjust
    /// the returned value before handing it to [`phrase`](Self::phrase).
    pub fn word(&mut self, lex: &str, sp: PartOfSpeech) -> Word {
        let id = self.allocate();
        let text: String = lex.chars().filter(|c| !matches!(c, '[' | '/' | '=')).collect();
        Word::new(id, text, lex, sp)
    }

    pub fn verb(&mut self, lex: &str, stem: &str) -> Word {
        let mut verb = self.word(lex, PartOfSpeech::Verb);
        verb.vs = Some(stem.to_string());
        verb
    }

    /// Append a phrase to the current clause.
    pub fn phrase(&mut self, function: PhraseFunction, words: Vec<Word>) -> NodeId {
        let id = self.allocate();
        let typ = if function.is_predicate() {
            "VP"
        } else if words.first().map(|w| w.sp) == Some(PartOfSpeech::Prep) {
            "PP"
        } else {
            "NP"
        };
        self.current_clause().phrases.push(Phrase {
            id,
            function,
            typ: typ.to_string(),
            words,
        });
        id
    }

    pub fn build(mut self) -> CorpusSnapshot {
        let mothers = std::mem::take(&mut self.mothers);
        for book in &mut self.snapshot.books {
            for chapter in &mut book.chapters {
                for verse in &mut chapter.verses {
                    for sentence in &mut verse.sentences {
                        for clause in &mut sentence.clauses {
                            if let Some(mother) = mothers.get(&clause.id) {
                                clause.mother = Some(*mother);
                            }
                        }
                    }
                }
            }
        }
        self.snapshot
    }

    fn current_book(&mut self) -> &mut Book {
        if self.snapshot.books.is_empty() {
            self.book("Genesis");
        }
        let last = self.snapshot.books.len() - 1;
        &mut self.snapshot.books[last]
    }

    fn current_chapter(&mut self) -> &mut Chapter {
        if self.current_book().chapters.is_empty() {
            self.chapter(1);
        }
        let book = self.current_book();
        let last = book.chapters.len() - 1;
        &mut book.chapters[last]
    }

    fn current_verse(&mut self) -> &mut Verse {
        if self.current_chapter().verses.is_empty() {
            self.verse(1);
        }
        let chapter = self.current_chapter();
        let last = chapter.verses.len() - 1;
        &mut chapter.verses[last]
    }

    fn current_sentence(&mut self) -> &mut Sentence {
        if self.current_verse().sentences.is_empty() {
            self.sentence();
        }
        let verse = self.current_verse();
        let last = verse.sentences.len() - 1;
        &mut verse.sentences[last]
    }

    fn current_clause(&mut self) -> &mut Clause {
        if self.current_sentence().clauses.is_empty() {
            self.clause("NA", "NA");
        }
        let sentence = self.current_sentence();
        let last = sentence.clauses.len() - 1;
        &mut sentence.clauses[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containers_are_created_on_demand() {
        let mut b = CorpusBuilder::new("t");
        let w = b.word("DBR/", PartOfSpeech::Subs);
        assert_eq!(w.text, "DBR");
        b.phrase(PhraseFunction::Subj, vec![w]);

        let snapshot = b.build();
        assert_eq!(snapshot.books.len(), 1);
        assert_eq!(snapshot.books[0].name, "Genesis");
        let clause = &snapshot.books[0].chapters[0].verses[0].sentences[0].clauses[0];
        assert_eq!(clause.phrases[0].typ, "NP");
    }

    #[test]
    fn test_mothers_applied_on_build() {
        let mut b = CorpusBuilder::new("t");
        let main = b.clause("WayX", "NA");
        let obj = b.clause("xYqX", "Objc");
        b.mother(obj, main);

        let snapshot = b.build();
        let clauses = &snapshot.books[0].chapters[0].verses[0].sentences[0].clauses;
        assert_eq!(clauses[0].mother, None);
        assert_eq!(clauses[1].mother, Some(main));
    }
}
