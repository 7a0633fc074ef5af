use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use valence_lexicon::{verb_lexeme, Lexicon, PREPOSITION_L};
use valence_protocol::{label, Field, NodeKind, PhraseFunction, WordFlags};

use crate::error::ConfigError;
use crate::scanner::Constituent;
use crate::vocabulary::Vocabulary;

/// Named tests over the words of a constituent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The first word is the preposition `L`.
    HasL,
    /// The second word is a personal lexeme or a person name.
    LexPersonal,
    /// Some word is a locative lexeme.
    LexLocal,
    /// Some word carries the directional `H` ending.
    HeLocale,
}

impl Predicate {
    pub fn name(self) -> &'static str {
        match self {
            Predicate::HasL => "has_L",
            Predicate::LexPersonal => "is_lex_personal",
            Predicate::LexLocal => "is_lex_local",
            Predicate::HeLocale => "has_H_locale",
        }
    }

    pub fn evaluate(self, lexicon: &Lexicon, constituent: &Constituent<'_>) -> bool {
        let words = constituent.words();
        match self {
            Predicate::HasL => words.first().is_some_and(|w| w.lex == PREPOSITION_L),
            Predicate::LexPersonal => words.get(1).is_some_and(|w| {
                lexicon.is_personal(&w.lex) || w.flags().contains(WordFlags::PERSON_NAME)
            }),
            Predicate::LexLocal => words.iter().any(|w| lexicon.is_locative(&w.lex)),
            Predicate::HeLocale => words.iter().any(|w| w.flags().contains(WordFlags::DIRECTIONAL)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    FeatureEquals { feature: &'static str, value: String },
    Custom(Predicate),
}

impl Condition {
    pub fn feature(feature: &'static str, value: impl Into<String>) -> Self {
        Condition::FeatureEquals {
            feature,
            value: value.into(),
        }
    }

    pub fn holds(&self, lexicon: &Lexicon, constituent: &Constituent<'_>) -> bool {
        match self {
            Condition::FeatureEquals { feature, value } => constituent.feature(feature) == Some(value.as_str()),
            Condition::Custom(predicate) => predicate.evaluate(lexicon, constituent),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::FeatureEquals { feature, value } => write!(f, "{:<10} = {:<8}", feature, value),
            Condition::Custom(predicate) => write!(f, "{:<15}", predicate.name()),
        }
    }
}

/// If every condition holds, every assignment is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbRule {
    pub assignments: Vec<(Field, String)>,
    pub conditions: Vec<Condition>,
}

impl VerbRule {
    pub fn new(assignments: &[(Field, &str)], conditions: Vec<Condition>) -> Self {
        Self {
            assignments: assignments.iter().map(|(f, v)| (*f, v.to_string())).collect(),
            conditions,
        }
    }

    pub fn matches(&self, lexicon: &Lexicon, constituent: &Constituent<'_>) -> bool {
        self.conditions.iter().all(|c| c.holds(lexicon, constituent))
    }
}

/// Identifies one verb rule: lexeme plus 1-based position in its list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleId {
    pub lexeme: String,
    pub number: usize,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lexeme, self.number)
    }
}

/// Ordered verb-specific rules per lexeme, for phrases and for clauses.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    phrase: BTreeMap<String, Vec<VerbRule>>,
    clause: BTreeMap<String, Vec<VerbRule>>,
}

impl RuleBook {
    /// Double object verbs: benefactives after `L`, locative complements.
    pub fn standard() -> Self {
        let double_object = vec![
            VerbRule::new(
                &[(Field::Semantic, label::semantic::BENEFACTIVE)],
                vec![
                    Condition::feature("function", "Adju"),
                    Condition::Custom(Predicate::HasL),
                    Condition::Custom(Predicate::LexPersonal),
                ],
            ),
            VerbRule::new(
                &[(Field::Lexical, label::semantic::LOCATION)],
                vec![Condition::feature("function", "Cmpl"), Condition::Custom(Predicate::HeLocale)],
            ),
            VerbRule::new(
                &[
                    (Field::Lexical, label::semantic::LOCATION),
                    (Field::Semantic, label::semantic::LOCATION),
                ],
                vec![Condition::feature("function", "Cmpl"), Condition::Custom(Predicate::LexLocal)],
            ),
        ];

        let mut book = Self::default();
        book.insert(NodeKind::Phrase, "CJT", double_object.clone());
        book.insert(NodeKind::Phrase, "FJM", double_object);
        book
    }

    pub fn insert(&mut self, kind: NodeKind, lexeme: &str, rules: Vec<VerbRule>) {
        let table = match kind {
            NodeKind::Clause => &mut self.clause,
            _ => &mut self.phrase,
        };
        table.insert(verb_lexeme(lexeme).to_string(), rules);
    }

    pub fn rules(&self, kind: NodeKind, lexeme: &str) -> &[VerbRule] {
        let table = match kind {
            NodeKind::Clause => &self.clause,
            _ => &self.phrase,
        };
        table.get(lexeme).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.phrase.values().chain(self.clause.values()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks every assignment against the vocabulary and every feature condition
    /// against the role features in use.
    pub fn validate(&self, vocabulary: &Vocabulary) -> Result<(), ConfigError> {
        for (kind, table) in [(NodeKind::Phrase, &self.phrase), (NodeKind::Clause, &self.clause)] {
            for (lexeme, rules) in table {
                for (i, rule) in rules.iter().enumerate() {
                    let id = RuleId {
                        lexeme: lexeme.clone(),
                        number: i + 1,
                    };
                    validate_rule(kind, &id, rule, vocabulary)?;
                }
            }
        }
        Ok(())
    }

    /// Multi-line rendering of a rule, for the rule report.
    pub fn describe(&self, kind: NodeKind, id: &RuleId) -> Option<String> {
        let rule = self.rules(kind, &id.lexeme).get(id.number.checked_sub(1)?)?;
        let conditions: Vec<String> = rule.conditions.iter().map(ToString::to_string).collect();
        let mut out = format!("{}\n\tIF   {}\n\tTHEN\n", id, conditions.join("\n\tAND  "));
        for (field, value) in &rule.assignments {
            out.push_str(&format!("\t\t{:<10} => {:<15}\n", field.as_str(), value));
        }
        Some(out)
    }
}

fn validate_rule(kind: NodeKind, id: &RuleId, rule: &VerbRule, vocabulary: &Vocabulary) -> Result<(), ConfigError> {
    if rule.conditions.is_empty() {
        return Err(ConfigError::EmptyRule(id.to_string()));
    }
    for (field, value) in &rule.assignments {
        if !vocabulary.allows(*field, value) {
            return Err(ConfigError::RuleValue {
                rule: id.to_string(),
                field: *field,
                value: value.clone(),
            });
        }
    }
    for condition in &rule.conditions {
        let Condition::FeatureEquals { feature, value } = condition else {
            continue;
        };
        let legal = match (kind, *feature) {
            (NodeKind::Clause, "typ" | "rela") | (NodeKind::Phrase, "typ") => !value.is_empty(),
            (NodeKind::Phrase, "function") => value.parse::<PhraseFunction>().is_ok(),
            _ => {
                return Err(ConfigError::RuleFeature {
                    rule: id.to_string(),
                    feature: feature.to_string(),
                })
            }
        };
        if !legal {
            return Err(ConfigError::RuleFeatureValue {
                rule: id.to_string(),
                feature: feature.to_string(),
                value: value.clone(),
            });
        }
    }
    Ok(())
}
