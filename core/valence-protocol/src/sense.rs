use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::morphology::UnknownCode;

/// Buckets of object-like constituents of one clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum ObjectKind {
    Principal,
    Direct,
    Np,
    L,
    K,
    Clause,
    Infinitive,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 7] = [
        ObjectKind::Principal,
        ObjectKind::Direct,
        ObjectKind::Np,
        ObjectKind::L,
        ObjectKind::K,
        ObjectKind::Clause,
        ObjectKind::Infinitive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Principal => "principal",
            ObjectKind::Direct => "direct",
            ObjectKind::Np => "NP",
            ObjectKind::L => "L",
            ObjectKind::K => "K",
            ObjectKind::Clause => "clause",
            ObjectKind::Infinitive => "infinitive",
        }
    }
}

/// The constituent kinds the flowchart counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConstituentKind {
    Dos,
    Pdos,
    Ndos,
    Kdos,
    Ldos,
    Idos,
    Cdos,
    Inds,
    Locs,
    Cpls,
    Bens,
}

impl ConstituentKind {
    pub const ALL: [ConstituentKind; 11] = [
        ConstituentKind::Dos,
        ConstituentKind::Pdos,
        ConstituentKind::Ndos,
        ConstituentKind::Kdos,
        ConstituentKind::Ldos,
        ConstituentKind::Idos,
        ConstituentKind::Cdos,
        ConstituentKind::Inds,
        ConstituentKind::Locs,
        ConstituentKind::Cpls,
        ConstituentKind::Bens,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConstituentKind::Dos => "dos",
            ConstituentKind::Pdos => "pdos",
            ConstituentKind::Ndos => "ndos",
            ConstituentKind::Kdos => "kdos",
            ConstituentKind::Ldos => "ldos",
            ConstituentKind::Idos => "idos",
            ConstituentKind::Cdos => "cdos",
            ConstituentKind::Inds => "inds",
            ConstituentKind::Locs => "locs",
            ConstituentKind::Cpls => "cpls",
            ConstituentKind::Bens => "bens",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ConstituentKind::Dos => "direct object",
            ConstituentKind::Pdos => "principal direct object",
            ConstituentKind::Ndos => "NP-object",
            ConstituentKind::Kdos => "K-object",
            ConstituentKind::Ldos => "L-object",
            ConstituentKind::Idos => "infinitive object clause",
            ConstituentKind::Cdos => "direct object clause",
            ConstituentKind::Inds => "indirect object",
            ConstituentKind::Locs => "locative",
            ConstituentKind::Cpls => "complement",
            ConstituentKind::Bens => "benefactive",
        }
    }
}

impl fmt::Display for ConstituentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First character of a sense label: the shape of the objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectShape {
    /// `-` no object
    None,
    /// `d` a single (kind of) direct object
    Direct,
    /// `n` principal object plus NP object
    Np,
    /// `c` principal object plus object clause
    Clause,
    /// `l` principal object plus L-object
    L,
    /// `k` principal object plus K-object
    K,
    /// `i` principal object plus infinitive object
    Infinitive,
}

impl ObjectShape {
    pub fn symbol(self) -> char {
        match self {
            ObjectShape::None => '-',
            ObjectShape::Direct => 'd',
            ObjectShape::Np => 'n',
            ObjectShape::Clause => 'c',
            ObjectShape::L => 'l',
            ObjectShape::K => 'k',
            ObjectShape::Infinitive => 'i',
        }
    }

    /// Shapes that record a second object; they leave no room for a complement.
    pub fn is_double(self) -> bool {
        !matches!(self, ObjectShape::None | ObjectShape::Direct)
    }

    fn from_symbol(c: char) -> Option<Self> {
        Some(match c {
            '-' => ObjectShape::None,
            'd' => ObjectShape::Direct,
            'n' => ObjectShape::Np,
            'c' => ObjectShape::Clause,
            'l' => ObjectShape::L,
            'k' => ObjectShape::K,
            'i' => ObjectShape::Infinitive,
            _ => return None,
        })
    }
}

/// Second character of a sense label: the shape of the complements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComplementShape {
    /// `-` nothing
    None,
    /// `.` not applicable after a double object
    NotApplicable,
    /// `i` indirect object
    IndirectObject,
    /// `b` benefactive
    Benefactive,
    /// `p` locative
    Locative,
    /// `c` plain complement
    Complement,
}

impl ComplementShape {
    pub fn symbol(self) -> char {
        match self {
            ComplementShape::None => '-',
            ComplementShape::NotApplicable => '.',
            ComplementShape::IndirectObject => 'i',
            ComplementShape::Benefactive => 'b',
            ComplementShape::Locative => 'p',
            ComplementShape::Complement => 'c',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        Some(match c {
            '-' => ComplementShape::None,
            '.' => ComplementShape::NotApplicable,
            'i' => ComplementShape::IndirectObject,
            'b' => ComplementShape::Benefactive,
            'p' => ComplementShape::Locative,
            'c' => ComplementShape::Complement,
            _ => return None,
        })
    }
}

/// Two character sense label, e.g. `dp` or `n.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SenseLabel {
    pub object: ObjectShape,
    pub complement: ComplementShape,
}

impl SenseLabel {
    /// Every label the flowchart can produce.
    pub const ALPHABET: [&'static str; 15] = [
        "--", "-i", "-b", "-p", "-c", "d-", "di", "db", "dp", "dc", "n.", "l.", "k.", "i.", "c.",
    ];

    pub fn new(object: ObjectShape, complement: ComplementShape) -> Self {
        Self { object, complement }
    }

    pub fn code(&self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.object.symbol());
        code.push(self.complement.symbol());
        code
    }
}

impl fmt::Display for SenseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.object.symbol(), self.complement.symbol())
    }
}

impl FromStr for SenseLabel {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownCode {
            kind: "sense label",
            value: s.to_string(),
        };
        if !Self::ALPHABET.contains(&s) {
            return Err(unknown());
        }
        let mut chars = s.chars();
        let object = chars.next().and_then(ObjectShape::from_symbol).ok_or_else(unknown)?;
        let complement = chars
            .next()
            .and_then(ComplementShape::from_symbol)
            .ok_or_else(unknown)?;
        Ok(Self { object, complement })
    }
}

#[cfg(feature = "serde")]
impl SerdeSerialize for SenseLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> SerdeDeserialize<'de> for SenseLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// How much trust a sense decision deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    /// The lexeme has a registered flowchart.
    Confident,
    /// No flowchart; labelled for manual follow-up.
    Uncertain,
}

impl Status {
    /// Note symbol. `-` is reserved for erroneous notes and never produced here.
    pub fn symbol(self) -> char {
        match self {
            Status::Confident => '!',
            Status::Uncertain => '?',
        }
    }
}
