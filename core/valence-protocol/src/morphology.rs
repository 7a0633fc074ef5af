use core::fmt;

use bitflags::bitflags;
use rkyv::{Archive, Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A textual code that is not part of a closed code list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value `{value}`")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! define_codes {
    ($(#[$meta:meta])* $name:ident, $what:expr, { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[archive(check_bytes)]
        #[repr(u8)]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $code))]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl core::str::FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    other => Err(UnknownCode { kind: $what, value: other.to_string() }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_codes!(
    /// The levels of the corpus hierarchy.
    NodeKind, "node kind", {
        Book => "book",
        Chapter => "chapter",
        Verse => "verse",
        Sentence => "sentence",
        Clause => "clause",
        Phrase => "phrase",
        Word => "word",
    }
);

define_codes!(
    /// Part of speech of a word (`sp`).
    PartOfSpeech, "part of speech", {
        Subs => "subs",
        Verb => "verb",
        Prep => "prep",
        Conj => "conj",
        Nmpr => "nmpr",
        Art => "art",
        Adjv => "adjv",
        Nega => "nega",
        Prps => "prps",
        Advb => "advb",
        Prde => "prde",
        Intj => "intj",
        Inrg => "inrg",
        Prin => "prin",
    }
);

define_codes!(
    /// Syntactic function of a phrase (`function`), plus the `BoundErr` error value
    /// used by correctors for phrases that do not merit a function of their own.
    PhraseFunction, "phrase function", {
        Adju => "Adju",
        Cmpl => "Cmpl",
        Conj => "Conj",
        EPPr => "EPPr",
        ExsS => "ExsS",
        Exst => "Exst",
        Frnt => "Frnt",
        Intj => "Intj",
        IntS => "IntS",
        Loca => "Loca",
        Modi => "Modi",
        ModS => "ModS",
        NCop => "NCop",
        NCoS => "NCoS",
        Nega => "Nega",
        Objc => "Objc",
        PrAd => "PrAd",
        PrcS => "PrcS",
        PreC => "PreC",
        Pred => "Pred",
        PreO => "PreO",
        PreS => "PreS",
        PtcO => "PtcO",
        Ques => "Ques",
        Rela => "Rela",
        Subj => "Subj",
        Supp => "Supp",
        Time => "Time",
        Unkn => "Unkn",
        Voct => "Voct",
        BoundErr => "BoundErr",
    }
);

impl PhraseFunction {
    /// Functions of phrases that contain the predicate of their clause.
    pub fn is_predicate(self) -> bool {
        matches!(
            self,
            Self::Pred | Self::PreS | Self::PreO | Self::PreC | Self::PtcO | Self::PrcS
        )
    }

    /// Functions that mark a phrase as a direct object candidate.
    pub fn is_object(self) -> bool {
        matches!(self, Self::Objc | Self::PreO | Self::PtcO)
    }

    /// Functions whose phrases are weighed as locative or indirect object.
    pub fn is_complement(self) -> bool {
        matches!(self, Self::Cmpl | Self::PreC)
    }

    pub fn is_error(self) -> bool {
        self == Self::BoundErr
    }
}

/// Values of the pronominal suffix feature that mean "no suffix".
pub const NO_SUFFIX: [&str; 2] = ["absent", "n/a"];

bitflags! {
    /// Lexical and morphological markers of a word, derived once at corpus load.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct WordFlags: u16 {
        /// Carries a real pronominal suffix (`prs` not absent / n/a).
        const PRONOMINAL_SUFFIX = 1;
        /// Directional he ending (`uvf = H`).
        const DIRECTIONAL = 2;
        /// Named place (`nametype = topo`).
        const TOPONYM = 4;
        /// Named person (`nametype = pers`).
        const PERSON_NAME = 8;
        /// Gentilic (`ls = gntl`).
        const GENTILIC = 16;
        /// Proper noun (`sp = nmpr`).
        const PROPER_NOUN = 32;
    }
}
