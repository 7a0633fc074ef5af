use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Values shared by every enrichment field.
pub const NA: &str = "NA";

/// Sheet token that blanks a field on purpose.
pub const BLANK_TOKEN: &str = "X";

/// `grammatical` / `original` values.
pub mod grammatical {
    pub const SUBJECT: &str = "subject";
    pub const PRINCIPAL_DIRECT_OBJECT: &str = "principal_direct_object";
    pub const DIRECT_OBJECT: &str = "direct_object";
    pub const NP_DIRECT_OBJECT: &str = "NP_direct_object";
    pub const INDIRECT_OBJECT: &str = "indirect_object";
    pub const L_OBJECT: &str = "L_object";
    pub const K_OBJECT: &str = "K_object";
    pub const INFINITIVE_OBJECT: &str = "infinitive_object";
    /// Undifferentiated complement.
    pub const COMPLEMENT: &str = "*";
}

/// `lexical` / `semantic` values.
pub mod semantic {
    pub const LOCATION: &str = "location";
    pub const TIME: &str = "time";
    pub const BENEFACTIVE: &str = "benefactive";
    pub const INSTRUMENT: &str = "instrument";
    pub const MANNER: &str = "manner";
}

pub mod valence {
    pub const ADJUNCT: &str = "adjunct";
    pub const COMPLEMENT: &str = "complement";
    pub const CORE: &str = "core";
}

pub mod predication {
    pub const REGULAR: &str = "regular";
    pub const COPULA: &str = "copula";
}

/// The six enrichment fields, in sheet column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Field {
    Valence,
    Predication,
    Grammatical,
    Original,
    Lexical,
    Semantic,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Valence,
        Field::Predication,
        Field::Grammatical,
        Field::Original,
        Field::Lexical,
        Field::Semantic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Valence => "valence",
            Field::Predication => "predication",
            Field::Grammatical => "grammatical",
            Field::Original => "original",
            Field::Lexical => "lexical",
            Field::Semantic => "semantic",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived labels of one constituent. Every value is `""`, `NA` or a member of
/// the field's closed vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct LabelRecord {
    pub valence: String,
    pub predication: String,
    pub grammatical: String,
    pub original: String,
    pub lexical: String,
    pub semantic: String,
}

impl LabelRecord {
    /// A record with every field empty (used for error functions such as `BoundErr`).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_values<S: AsRef<str>>(values: &[S; 6]) -> Self {
        Self {
            valence: values[0].as_ref().to_string(),
            predication: values[1].as_ref().to_string(),
            grammatical: values[2].as_ref().to_string(),
            original: values[3].as_ref().to_string(),
            lexical: values[4].as_ref().to_string(),
            semantic: values[5].as_ref().to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Valence => &self.valence,
            Field::Predication => &self.predication,
            Field::Grammatical => &self.grammatical,
            Field::Original => &self.original,
            Field::Lexical => &self.lexical,
            Field::Semantic => &self.semantic,
        }
    }

    /// Returns a copy with one field replaced; records are never edited in place.
    pub fn with(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            Field::Valence => &mut next.valence,
            Field::Predication => &mut next.predication,
            Field::Grammatical => &mut next.grammatical,
            Field::Original => &mut next.original,
            Field::Lexical => &mut next.lexical,
            Field::Semantic => &mut next.semantic,
        };
        *slot = value.into();
        next
    }

    pub fn values(&self) -> [&str; 6] {
        Field::ALL.map(|f| self.get(f))
    }
}

impl fmt::Display for LabelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values().join(";"))
    }
}
