use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

use crate::ids::NodeId;
use crate::morphology::{PartOfSpeech, PhraseFunction, WordFlags, NO_SUFFIX};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A complete annotated corpus, nested book → chapter → verse → sentence → clause → phrase → word.
///
/// Nesting order is corpus order. The only non-containment relation is the clause `mother` edge.
#[derive(Debug, Clone, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct CorpusSnapshot {
    pub version: String,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Book {
    pub id: NodeId,
    pub name: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Chapter {
    pub id: NodeId,
    pub number: u32,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Verse {
    pub id: NodeId,
    pub number: u32,
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Sentence {
    pub id: NodeId,
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Clause {
    pub id: NodeId,
    /// Clause type (`typ`), e.g. `InfC`, `WayX`.
    pub typ: String,
    /// Clause relation (`rela`), e.g. `Objc`, `NA`.
    pub rela: String,
    /// The clause this clause depends on, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mother: Option<NodeId>,
    pub phrases: Vec<Phrase>,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Phrase {
    pub id: NodeId,
    pub function: PhraseFunction,
    /// Phrase type (`typ`), e.g. `VP`, `PP`.
    pub typ: String,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Word {
    pub id: NodeId,
    /// Consonantal transliteration.
    pub text: String,
    /// Lexeme with its paradigm markers (e.g. `NTN[`, `>RY/`).
    pub lex: String,
    pub sp: PartOfSpeech,
    /// Verbal stem (`vs`), only on verbs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vs: Option<String>,
    /// Pronominal suffix (`prs`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub prs: Option<String>,
    /// Univalent final (`uvf`), `H` for the directional ending.
    #[cfg_attr(feature = "serde", serde(default))]
    pub uvf: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nametype: Option<String>,
    /// Lexical set (`ls`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub ls: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gloss: Option<String>,
}

impl Word {
    /// A bare word; optional features can be filled in afterwards.
    pub fn new(id: NodeId, text: impl Into<String>, lex: impl Into<String>, sp: PartOfSpeech) -> Self {
        Self {
            id,
            text: text.into(),
            lex: lex.into(),
            sp,
            vs: None,
            prs: None,
            uvf: None,
            nametype: None,
            ls: None,
            gloss: None,
        }
    }

    pub fn flags(&self) -> WordFlags {
        let mut flags = WordFlags::empty();
        if let Some(prs) = self.prs.as_deref() {
            if !prs.is_empty() && !NO_SUFFIX.contains(&prs) {
                flags |= WordFlags::PRONOMINAL_SUFFIX;
            }
        }
        if self.uvf.as_deref() == Some("H") {
            flags |= WordFlags::DIRECTIONAL;
        }
        match self.nametype.as_deref() {
            Some("topo") => flags |= WordFlags::TOPONYM,
            Some("pers") => flags |= WordFlags::PERSON_NAME,
            _ => {}
        }
        if self.ls.as_deref() == Some("gntl") {
            flags |= WordFlags::GENTILIC;
        }
        if self.sp == PartOfSpeech::Nmpr {
            flags |= WordFlags::PROPER_NOUN;
        }
        flags
    }
}

/// Book, chapter and verse of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Section {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}
